use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use lang_registry::api::{create_router, AppState};
use lang_registry::db::{Database, SqliteProgrammingLangRepository};
use lang_registry::models::*;
use lang_registry::service::ProgrammingLangService;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.ensure_schema().expect("Failed to create schema");
    let service = ProgrammingLangService::new(SqliteProgrammingLangRepository::new(&db));
    let app = create_router(AppState::new(service).with_request_timeout(Some(Duration::from_secs(5))));
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_lang(server: &TestServer, name: &str, feature: &str) -> ProgrammingLang {
    server
        .post("/v1/langs")
        .json(&ProgrammingLangInput::new(name, feature))
        .await
        .json::<ProgrammingLang>()
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn create_get_update_delete_round_trip() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .json(&serde_json::json!({ "name": "Go", "feature": "fast, concurrent" }))
            .await;
        response.assert_status_ok();
        let created: ProgrammingLang = response.json();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let response = server.get(&format!("/v1/langs/{}", created.id)).await;
        response.assert_status_ok();
        let fetched: ProgrammingLang = response.json();
        assert_eq!(fetched, created);

        let response = server
            .put(&format!("/v1/langs/{}", created.id))
            .json(&serde_json::json!({ "name": "Go", "feature": "fast, concurrent, simple" }))
            .await;
        response.assert_status_ok();
        let updated: ProgrammingLang = response.json();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.feature, "fast, concurrent, simple");
        assert!(updated.updated_at > created.updated_at);

        let response = server.delete(&format!("/v1/langs/{}", created.id)).await;
        response.assert_status_ok();
        assert!(response.text().is_empty());

        let response = server.get(&format!("/v1/langs/{}", created.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn entity_json_uses_camel_case_fields() {
        let server = setup();
        let created = create_lang(&server, "Rust", "safe").await;

        let body: serde_json::Value = server
            .get(&format!("/v1/langs/{}", created.id))
            .await
            .json();
        for field in ["id", "name", "feature", "createdAt", "updatedAt"] {
            assert!(body.get(field).is_some(), "missing field {field}");
        }
    }
}

mod list_langs {
    use super::*;

    async fn seed(server: &TestServer, count: usize) {
        for i in 0..count {
            create_lang(server, &format!("lang{i:03}"), "").await;
        }
    }

    #[tokio::test]
    async fn returns_empty_list_when_no_langs_exist() {
        let server = setup();

        let response = server.get("/v1/langs").await;

        response.assert_status_ok();
        let langs: Vec<ProgrammingLang> = response.json();
        assert!(langs.is_empty());
    }

    #[tokio::test]
    async fn defaults_to_twenty_without_limit() {
        let server = setup();
        seed(&server, 30).await;

        let langs: Vec<ProgrammingLang> = server.get("/v1/langs").await.json();
        assert_eq!(langs.len(), 20);
    }

    #[tokio::test]
    async fn honours_limit_inside_bounds() {
        let server = setup();
        seed(&server, 30).await;

        let langs: Vec<ProgrammingLang> = server.get("/v1/langs?limit=5").await.json();
        assert_eq!(langs.len(), 5);
        assert_eq!(langs[0].name, "lang000");
    }

    #[tokio::test]
    async fn falls_back_to_default_outside_bounds() {
        let server = setup();
        seed(&server, 30).await;

        let below: Vec<ProgrammingLang> = server.get("/v1/langs?limit=4").await.json();
        assert_eq!(below.len(), 20);

        let above: Vec<ProgrammingLang> = server.get("/v1/langs?limit=101").await.json();
        assert_eq!(above.len(), 20);
    }

    #[tokio::test]
    async fn orders_by_name() {
        let server = setup();
        create_lang(&server, "Zig", "").await;
        create_lang(&server, "Ada", "").await;
        create_lang(&server, "Go", "").await;

        let langs: Vec<ProgrammingLang> = server.get("/v1/langs").await.json();
        let names: Vec<_> = langs.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Go", "Zig"]);
    }

    #[tokio::test]
    async fn rejects_non_integer_limit() {
        let server = setup();

        let response = server.get("/v1/langs?limit=ten").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let message: String = response.json();
        assert_eq!(message, "Limit is invalid. Limit Should be int");
    }
}

mod get_lang {
    use super::*;

    #[tokio::test]
    async fn returns_404_for_missing_id() {
        let server = setup();

        let response = server.get("/v1/langs/42").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let message: String = response.json();
        assert_eq!(message, "ProgrammingLang is not found. ID : 42");
    }

    #[tokio::test]
    async fn rejects_non_integer_id() {
        let server = setup();

        let response = server.get("/v1/langs/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let message: String = response.json();
        assert_eq!(message, "ID is invalid. ID Should be int");
    }

    #[tokio::test]
    async fn rejects_id_with_encoded_whitespace() {
        let server = setup();
        let created = create_lang(&server, "Go", "").await;

        let response = server.get(&format!("/v1/langs/%20{}", created.id)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod create_lang {
    use super::*;

    #[tokio::test]
    async fn rejects_duplicate_name_with_conflict() {
        let server = setup();
        let first = create_lang(&server, "Go", "fast").await;

        let response = server
            .post("/v1/langs")
            .json(&ProgrammingLangInput::new("Go", "again"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let message: String = response.json();
        assert_eq!(
            message,
            format!("ProgrammingLang already exists. ID : {}, Name : Go", first.id)
        );
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .json(&ProgrammingLangInput::new("", "nothing"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_name_longer_than_twenty() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .json(&ProgrammingLangInput::new("a".repeat(21), ""))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn accepts_name_of_exactly_twenty() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .json(&ProgrammingLangInput::new("a".repeat(20), ""))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn rejects_missing_name_as_required() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .json(&serde_json::json!({ "feature": "no name" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let message: String = response.json();
        assert_eq!(message, "Name is required.");
    }

    #[tokio::test]
    async fn rejects_malformed_body() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .text("{ not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ignores_client_supplied_id() {
        let server = setup();

        let response = server
            .post("/v1/langs")
            .json(&serde_json::json!({ "id": 777, "name": "Go", "feature": "" }))
            .await;

        response.assert_status_ok();
        let created: ProgrammingLang = response.json();
        assert_ne!(created.id, 777);
    }
}

mod update_lang {
    use super::*;

    #[tokio::test]
    async fn returns_404_for_missing_id() {
        let server = setup();

        let response = server
            .put("/v1/langs/9")
            .json(&ProgrammingLangInput::new("Zig", ""))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let message: String = response.json();
        assert_eq!(message, "ProgrammingLang is not found. ID : 9, Name : Zig");
    }

    #[tokio::test]
    async fn ignores_id_in_body() {
        let server = setup();
        let created = create_lang(&server, "Go", "fast").await;

        let response = server
            .put(&format!("/v1/langs/{}", created.id))
            .json(&serde_json::json!({ "id": 999, "name": "Go", "feature": "simple" }))
            .await;

        response.assert_status_ok();
        let updated: ProgrammingLang = response.json();
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn validates_name() {
        let server = setup();
        let created = create_lang(&server, "Go", "fast").await;

        let response = server
            .put(&format!("/v1/langs/{}", created.id))
            .json(&ProgrammingLangInput::new("", ""))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod delete_lang {
    use super::*;

    #[tokio::test]
    async fn returns_404_for_missing_id() {
        let server = setup();

        let response = server.delete("/v1/langs/31337").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_non_integer_id() {
        let server = setup();

        let response = server.delete("/v1/langs/one").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}
