use serde_json::json;

use crate::common::{TestApp, routes};

mod upsert_platform {
    use super::*;

    #[tokio::test]
    async fn creates_on_first_write() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .put_with_case(
                &routes::platform(&soc_id, "mastodon"),
                &json!({"username": "@alex"}),
                &case_id,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["platformName"].as_str().unwrap(), "mastodon");
        assert_eq!(res.body["username"].as_str().unwrap(), "@alex");
    }

    #[tokio::test]
    async fn second_write_updates_instead_of_duplicating() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let before = app.get(&routes::platforms(&soc_id)).await;
        let count_before = before.body["total"].as_u64().unwrap();

        // "instagram" already exists from the bootstrap set.
        let first = app
            .put_with_case(
                &routes::platform(&soc_id, "instagram"),
                &json!({"username": "@alex"}),
                &case_id,
            )
            .await;
        assert_eq!(first.status, 200, "{}", first.text);

        let second = app
            .put_with_case(
                &routes::platform(&soc_id, "instagram"),
                &json!({"displayName": "Alex"}),
                &case_id,
            )
            .await;
        assert_eq!(second.status, 200, "{}", second.text);

        // Partial update preserved the earlier username.
        assert_eq!(second.body["username"].as_str().unwrap(), "@alex");
        assert_eq!(second.body["displayName"].as_str().unwrap(), "Alex");

        let after = app.get(&routes::platforms(&soc_id)).await;
        assert_eq!(after.body["total"].as_u64().unwrap(), count_before);
    }

    #[tokio::test]
    async fn requires_case_context() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .put(&routes::platform(&soc_id, "instagram"), &json!({}))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn rejects_soc_from_another_case() {
        let app = TestApp::spawn().await;
        let case_a = app.create_case(None).await;
        let case_b = app.create_case(None).await;
        let soc_in_a = app.create_soc(&case_a).await;

        let res = app
            .put_with_case(
                &routes::platform(&soc_in_a, "instagram"),
                &json!({"username": "@x"}),
                &case_b,
            )
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
    }
}

mod get_platform {
    use super::*;

    #[tokio::test]
    async fn returns_record_and_photos() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        app.put_with_case(
            &routes::platform(&soc_id, "instagram"),
            &json!({"username": "@alex", "profileUrl": "https://instagram.com/alex"}),
            &case_id,
        )
        .await;
        app.upload_photo(&case_id, &soc_id, "instagram", "a.jpg", b"JPEG".to_vec())
            .await;

        let res = app
            .get_with_case(&routes::platform(&soc_id, "instagram"), &case_id)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["username"].as_str().unwrap(), "@alex");
        assert_eq!(res.body["photos"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn never_configured_platform_is_not_found() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;

        // The default SOC path creates no platform records.
        let res = app.post(&routes::default_soc(&case_id), &json!({})).await;
        let soc_id = res.body["id"].as_str().unwrap();

        let res = app
            .get_with_case(&routes::platform(soc_id, "instagram"), &case_id)
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
    }
}
