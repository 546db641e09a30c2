use serde_json::json;

use crate::common::{TestApp, routes};

mod upload_photo {
    use super::*;

    #[tokio::test]
    async fn new_photo_starts_with_zeroed_engagement() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .upload_photo(&case_id, &soc_id, "instagram", "a.jpg", b"JPEG_DATA".to_vec())
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["tags"].as_array().unwrap().len(), 0);
        assert_eq!(res.body["analysisTags"].as_object().unwrap().len(), 0);
        assert_eq!(res.body["notes"].as_str().unwrap(), "");
        assert_eq!(res.body["metadata"]["likes"].as_i64().unwrap(), 0);
        assert_eq!(res.body["metadata"]["comments"].as_i64().unwrap(), 0);
        assert_eq!(res.body["metadata"]["engagementRate"].as_str().unwrap(), "0%");
        assert!(!res.body["file_path"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blob_lands_under_the_canonical_key() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(Some("CASE-KEYS")).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .upload_photo(&case_id, &soc_id, "tiktok", "clip.png", b"PNG_DATA".to_vec())
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let file_path = res.body["file_path"].as_str().unwrap();
        let photo_id = res.body["id"].as_str().unwrap();
        assert_eq!(
            file_path,
            format!("/uploads/CASE-KEYS/{soc_id}/tiktok/{photo_id}.png")
        );

        let on_disk = app.blob_disk_path(file_path);
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"PNG_DATA");
    }

    #[tokio::test]
    async fn fetching_after_upload_round_trips() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let uploaded = app
            .upload_photo(&case_id, &soc_id, "instagram", "a.gif", b"GIF_DATA".to_vec())
            .await;
        let photo_id = uploaded.body["id"].as_str().unwrap();

        let res = app
            .get_with_case(&routes::photo(&soc_id, "instagram", photo_id), &case_id)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"].as_str().unwrap(), photo_id);
        assert_eq!(res.body["tags"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn rejects_disallowed_extension() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .upload_photo(&case_id, &soc_id, "instagram", "doc.pdf", b"PDF".to_vec())
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn requires_case_context() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let part = reqwest::multipart::Part::bytes(b"JPEG".to_vec())
            .file_name("a.jpg")
            .mime_str("image/jpeg")
            .unwrap();
        let form = reqwest::multipart::Form::new().part("photo", part);
        let res = app
            .client
            .post(format!(
                "http://{}{}",
                app.addr,
                routes::photos(&soc_id, "instagram")
            ))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn rejects_soc_belonging_to_a_different_case() {
        let app = TestApp::spawn().await;
        let case_a = app.create_case(None).await;
        let case_b = app.create_case(None).await;
        let soc_in_a = app.create_soc(&case_a).await;

        let res = app
            .upload_photo(&case_b, &soc_in_a, "instagram", "a.jpg", b"JPEG".to_vec())
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn unknown_case_is_not_found() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .upload_photo("CASE-GHOST", &soc_id, "instagram", "a.jpg", b"JPEG".to_vec())
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
    }
}

mod update_photo {
    use super::*;

    async fn uploaded_photo(app: &TestApp) -> (String, String, String) {
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;
        let res = app
            .upload_photo(&case_id, &soc_id, "instagram", "a.jpg", b"JPEG".to_vec())
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let photo_id = res.body["id"].as_str().unwrap().to_string();
        (case_id, soc_id, photo_id)
    }

    #[tokio::test]
    async fn analysis_tags_merge_key_by_key() {
        let app = TestApp::spawn().await;
        let (case_id, soc_id, photo_id) = uploaded_photo(&app).await;
        let path = routes::photo(&soc_id, "instagram", &photo_id);

        app.patch_with_case(&path, &json!({"analysisTags": {"a": 1}}), &case_id)
            .await;
        let res = app
            .patch_with_case(&path, &json!({"analysisTags": {"b": 2}}), &case_id)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["analysisTags"]["a"].as_i64().unwrap(), 1);
        assert_eq!(res.body["analysisTags"]["b"].as_i64().unwrap(), 2);
    }

    #[tokio::test]
    async fn tags_replace_wholesale() {
        let app = TestApp::spawn().await;
        let (case_id, soc_id, photo_id) = uploaded_photo(&app).await;
        let path = routes::photo(&soc_id, "instagram", &photo_id);

        app.patch_with_case(&path, &json!({"tags": ["x"]}), &case_id)
            .await;
        let res = app
            .patch_with_case(&path, &json!({"tags": ["y"]}), &case_id)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["tags"], json!(["y"]));
    }

    #[tokio::test]
    async fn metadata_merges_and_preserves_defaults() {
        let app = TestApp::spawn().await;
        let (case_id, soc_id, photo_id) = uploaded_photo(&app).await;
        let path = routes::photo(&soc_id, "instagram", &photo_id);

        let res = app
            .patch_with_case(&path, &json!({"metadata": {"likes": 42}}), &case_id)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["metadata"]["likes"].as_i64().unwrap(), 42);
        // Untouched keys survive the merge.
        assert_eq!(res.body["metadata"]["engagementRate"].as_str().unwrap(), "0%");
    }

    #[tokio::test]
    async fn absent_notes_are_preserved_but_empty_string_clears() {
        let app = TestApp::spawn().await;
        let (case_id, soc_id, photo_id) = uploaded_photo(&app).await;
        let path = routes::photo(&soc_id, "instagram", &photo_id);

        let res = app
            .patch_with_case(&path, &json!({"notes": "observed in feed"}), &case_id)
            .await;
        assert_eq!(res.body["notes"].as_str().unwrap(), "observed in feed");

        // A body without `notes` leaves it alone.
        let res = app
            .patch_with_case(&path, &json!({"tags": ["t"]}), &case_id)
            .await;
        assert_eq!(res.body["notes"].as_str().unwrap(), "observed in feed");

        // An explicit empty string clears it.
        let res = app
            .patch_with_case(&path, &json!({"notes": ""}), &case_id)
            .await;
        assert_eq!(res.body["notes"].as_str().unwrap(), "");
    }

    #[tokio::test]
    async fn nested_values_replace_wholesale() {
        let app = TestApp::spawn().await;
        let (case_id, soc_id, photo_id) = uploaded_photo(&app).await;
        let path = routes::photo(&soc_id, "instagram", &photo_id);

        app.patch_with_case(
            &path,
            &json!({"analysisTags": {"faces": {"count": 2, "blurred": true}}}),
            &case_id,
        )
        .await;
        let res = app
            .patch_with_case(
                &path,
                &json!({"analysisTags": {"faces": {"count": 3}}}),
                &case_id,
            )
            .await;

        assert_eq!(res.body["analysisTags"]["faces"], json!({"count": 3}));
    }

    #[tokio::test]
    async fn wrong_case_context_is_not_found() {
        let app = TestApp::spawn().await;
        let (_case_id, soc_id, photo_id) = uploaded_photo(&app).await;
        let other_case = app.create_case(None).await;

        let res = app
            .patch_with_case(
                &routes::photo(&soc_id, "instagram", &photo_id),
                &json!({"tags": ["x"]}),
                &other_case,
            )
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
    }
}

mod delete_photo {
    use super::*;

    #[tokio::test]
    async fn removes_metadata_and_blob() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let uploaded = app
            .upload_photo(&case_id, &soc_id, "instagram", "a.jpg", b"JPEG".to_vec())
            .await;
        let photo_id = uploaded.body["id"].as_str().unwrap();
        let on_disk = app.blob_disk_path(uploaded.body["file_path"].as_str().unwrap());
        assert!(on_disk.exists());

        let res = app
            .delete_with_case(&routes::photo(&soc_id, "instagram", photo_id), &case_id)
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let res = app
            .get_with_case(&routes::photo(&soc_id, "instagram", photo_id), &case_id)
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");

        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn succeeds_even_when_blob_is_already_gone() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let uploaded = app
            .upload_photo(&case_id, &soc_id, "instagram", "a.jpg", b"JPEG".to_vec())
            .await;
        let photo_id = uploaded.body["id"].as_str().unwrap();
        let on_disk = app.blob_disk_path(uploaded.body["file_path"].as_str().unwrap());
        std::fs::remove_file(&on_disk).unwrap();

        let res = app
            .delete_with_case(&routes::photo(&soc_id, "instagram", photo_id), &case_id)
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let res = app
            .get_with_case(&routes::photo(&soc_id, "instagram", photo_id), &case_id)
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn invalid_photo_id_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let case_id = app.create_case(None).await;
        let soc_id = app.create_soc(&case_id).await;

        let res = app
            .delete_with_case(
                &routes::photo(&soc_id, "instagram", "not-a-uuid"),
                &case_id,
            )
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
    }
}
