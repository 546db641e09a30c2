use serde_json::json;

use crate::common::{TestApp, routes};

mod create_case {
    use super::*;

    #[tokio::test]
    async fn generates_case_id_when_absent() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CASES,
                &json!({
                    "date": "2024-03-01",
                    "investigatorName": "Jordan Blake",
                    "organization": "Northside District",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let case_id = res.body["caseId"].as_str().unwrap();
        assert!(case_id.starts_with("CASE-"), "unexpected id: {case_id}");
    }

    #[tokio::test]
    async fn uses_explicit_case_id() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CASES,
                &json!({
                    "caseId": "CASE-EXPLICIT-1",
                    "date": "2024-03-01",
                    "investigatorName": "Jordan Blake",
                    "organization": "Northside District",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["caseId"].as_str().unwrap(), "CASE-EXPLICIT-1");
    }

    #[tokio::test]
    async fn generated_ids_are_distinct() {
        let app = TestApp::spawn().await;
        let first = app.create_case(None).await;
        let second = app.create_case(None).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn rejects_missing_required_fields() {
        let app = TestApp::spawn().await;

        for missing in ["date", "investigatorName", "organization"] {
            let mut body = json!({
                "date": "2024-03-01",
                "investigatorName": "Jordan Blake",
                "organization": "Northside District",
            });
            body.as_object_mut().unwrap().remove(missing);

            let res = app.post(routes::CASES, &body).await;
            assert_eq!(res.status, 400, "field {missing}: {}", res.text);
            assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn rejects_blank_required_field() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CASES,
                &json!({
                    "date": "  ",
                    "investigatorName": "Jordan Blake",
                    "organization": "Northside District",
                }),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn rejects_duplicate_explicit_id() {
        let app = TestApp::spawn().await;
        app.create_case(Some("CASE-DUP")).await;

        let res = app
            .post(
                routes::CASES,
                &json!({
                    "caseId": "CASE-DUP",
                    "date": "2024-03-02",
                    "investigatorName": "Sam Reyes",
                    "organization": "Northside District",
                }),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn does_not_create_a_soc() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;

        let res = app.get(&routes::socs(&case_id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"].as_u64().unwrap(), 0);
    }
}

mod get_case {
    use super::*;

    #[tokio::test]
    async fn returns_stored_fields() {
        let app = TestApp::spawn().await;

        app.post(
            routes::CASES,
            &json!({
                "caseId": "CASE-FIELDS",
                "date": "2024-03-01",
                "investigatorName": "Jordan Blake",
                "organization": "Northside District",
                "socStatus": "known",
                "discoveryMethod": "peer report",
                "studentInfo": {"name": "Alex"},
            }),
        )
        .await;

        let res = app.get(&routes::case("CASE-FIELDS")).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["investigatorName"].as_str().unwrap(), "Jordan Blake");
        assert_eq!(res.body["socStatus"].as_str().unwrap(), "known");
        assert_eq!(res.body["studentInfo"]["name"].as_str().unwrap(), "Alex");
    }

    #[tokio::test]
    async fn unknown_case_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::case("CASE-NOPE")).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }
}

mod upsert_case {
    use super::*;

    #[tokio::test]
    async fn creates_then_updates_in_place() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::case("CASE-UP"),
                &json!({
                    "date": "2024-03-01",
                    "investigatorName": "Jordan Blake",
                    "organization": "Northside District",
                }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app
            .put(
                &routes::case("CASE-UP"),
                &json!({
                    "date": "2024-03-05",
                    "investigatorName": "Sam Reyes",
                    "organization": "Northside District",
                }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["investigatorName"].as_str().unwrap(), "Sam Reyes");

        // Still a single record.
        let list = app.get(routes::CASES).await;
        assert_eq!(list.body["total"].as_u64().unwrap(), 1);
    }
}

mod list_cases {
    use super::*;

    #[tokio::test]
    async fn returns_all_cases() {
        let app = TestApp::spawn().await;
        app.create_case(Some("CASE-A")).await;
        app.create_case(Some("CASE-B")).await;

        let res = app.get(routes::CASES).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"].as_u64().unwrap(), 2);
        assert_eq!(res.body["cases"].as_array().unwrap().len(), 2);
    }
}
