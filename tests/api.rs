use std::sync::Arc;
use std::time::Duration;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{test, App};
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, RuntimeErr};
use serde_json::{json, Value};
use bug_tracker::api;
use bug_tracker::entity::bug::{BugFields, Model as BugModel};
use bug_tracker::service::query::{BugFilter, SortDirection, SortKey};
use bug_tracker::service::BugService;
use bug_tracker::store::{BugStore, InMemoryBugStore, StoreError};

macro_rules! test_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::new(BugService::new($store)))
                .configure(api::configure),
        )
        .await
    };
}

macro_rules! create_bug {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post().uri("/api/bugs").set_json($body).to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["data"].clone()
    }};
}

fn sample_bug() -> Value {
    json!({
        "title": "Test Bug",
        "description": "This is a test bug",
        "reporter": "John Doe",
        "severity": "medium",
        "status": "open",
    })
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    serde_json::from_value(value.clone()).unwrap()
}

#[actix_web::test]
async fn create_returns_created_record() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let req = test::TestRequest::post().uri("/api/bugs").set_json(sample_bug()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Bug created successfully"));
    assert_eq!(body["data"]["title"], json!("Test Bug"));
    assert_eq!(body["data"]["description"], json!("This is a test bug"));
    assert_eq!(body["data"]["reporter"], json!("John Doe"));
    assert!(body["data"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
}

#[actix_web::test]
async fn create_sanitizes_text_fields() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let bug = create_bug!(app, json!({
        "title": "  <b>hi</b>  ",
        "description": "<script>alert(1)</script>",
        "reporter": " Ann ",
        "assignee": "<Bob>",
    }));

    assert_eq!(bug["title"], json!("bhi/b"));
    assert_eq!(bug["description"], json!("scriptalert(1)/script"));
    assert_eq!(bug["reporter"], json!("Ann"));
    assert_eq!(bug["assignee"], json!("Bob"));
    assert_eq!(bug["severity"], json!("medium"));
    assert_eq!(bug["status"], json!("open"));
}

#[actix_web::test]
async fn create_missing_title_reports_title_required() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    let mut body = sample_bug();
    body.as_object_mut().unwrap().remove("title");

    let req = test::TestRequest::post().uri("/api/bugs").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation failed"));
    assert_eq!(body["errors"], json!(["Title is required"]));
}

#[actix_web::test]
async fn create_missing_description_persists_nothing() {
    let store = Arc::new(InMemoryBugStore::new());
    let app = test_app!(store.clone());
    let mut body = sample_bug();
    body.as_object_mut().unwrap().remove("description");

    let req = test::TestRequest::post().uri("/api/bugs").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("Description is required")));

    let stored = store
        .find_all(&BugFilter::default(), &SortKey::CreatedAt, SortDirection::Desc)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[actix_web::test]
async fn create_with_several_problems_lists_them_all() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let req = test::TestRequest::post()
        .uri("/api/bugs")
        .set_json(json!({
            "title": "x".repeat(101),
            "reporter": "   ",
            "severity": "invalid",
            "status": "done",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"],
        json!([
            "Title cannot exceed 100 characters",
            "Description is required",
            "Reporter name is required",
            "Invalid severity level",
            "Invalid status",
        ])
    );
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request_envelope() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let req = test::TestRequest::post()
        .uri("/api/bugs")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "message": "Invalid request body" }));
}

#[actix_web::test]
async fn malformed_query_string_is_a_bad_request_envelope() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let req = test::TestRequest::get().uri("/api/bugs?status=open&status=closed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "message": "Invalid query string" }));
}

#[actix_web::test]
async fn get_returns_record_or_not_found() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    let bug = create_bug!(app, sample_bug());
    let id = bug["id"].as_str().unwrap();

    let req = test::TestRequest::get().uri(&format!("/api/bugs/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], bug);

    let req = test::TestRequest::get().uri("/api/bugs/does-not-exist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "message": "Bug not found" }));
}

#[actix_web::test]
async fn update_replaces_fields_and_refreshes_updated_at() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    let bug = create_bug!(app, sample_bug());
    let id = bug["id"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let mut changes = sample_bug();
    changes["status"] = json!("in-progress");
    let req = test::TestRequest::put()
        .uri(&format!("/api/bugs/{id}"))
        .set_json(changes)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Bug updated successfully"));

    let req = test::TestRequest::get().uri(&format!("/api/bugs/{id}")).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    let fetched = &fetched["data"];

    assert_eq!(fetched["status"], json!("in-progress"));
    assert_eq!(fetched["id"], bug["id"]);
    assert_eq!(fetched["createdAt"], bug["createdAt"]);
    assert!(timestamp(&fetched["updatedAt"]) > timestamp(&bug["createdAt"]));
}

#[actix_web::test]
async fn update_is_a_full_replace() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    let mut original = sample_bug();
    original["assignee"] = json!("Alice");
    original["severity"] = json!("critical");
    let bug = create_bug!(app, original);
    let id = bug["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/bugs/{id}"))
        .set_json(json!({
            "title": "Renamed",
            "description": "New description",
            "reporter": "John Doe",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["title"], json!("Renamed"));
    assert_eq!(body["data"]["assignee"], Value::Null);
    assert_eq!(body["data"]["severity"], json!("medium"));
    assert_eq!(body["data"]["status"], json!("open"));
}

#[actix_web::test]
async fn invalid_update_leaves_record_untouched() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    let bug = create_bug!(app, sample_bug());
    let id = bug["id"].as_str().unwrap();

    let mut changes = sample_bug();
    changes["status"] = json!("wontfix");
    let req = test::TestRequest::put()
        .uri(&format!("/api/bugs/{id}"))
        .set_json(changes)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"], json!(["Invalid status"]));

    let req = test::TestRequest::get().uri(&format!("/api/bugs/{id}")).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["data"], bug);
}

#[actix_web::test]
async fn update_unknown_id_is_not_found_even_when_invalid() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let req = test::TestRequest::put()
        .uri("/api/bugs/missing")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_removes_record() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    let bug = create_bug!(app, sample_bug());
    let id = bug["id"].as_str().unwrap();

    let req = test::TestRequest::delete().uri(&format!("/api/bugs/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true, "message": "Bug deleted successfully" }));

    let req = test::TestRequest::get().uri(&format!("/api/bugs/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_unknown_id_is_not_found() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));

    let req = test::TestRequest::delete().uri("/api/bugs/never-created").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Bug not found"));
}

#[actix_web::test]
async fn list_filters_by_severity_regardless_of_status() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    create_bug!(app, sample_bug());
    let mut high_open = sample_bug();
    high_open["title"] = json!("Another Bug");
    high_open["severity"] = json!("high");
    create_bug!(app, high_open);
    let mut high_closed = sample_bug();
    high_closed["title"] = json!("Closed Bug");
    high_closed["severity"] = json!("high");
    high_closed["status"] = json!("closed");
    create_bug!(app, high_closed);

    let req = test::TestRequest::get().uri("/api/bugs").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all["success"], json!(true));
    assert_eq!(all["count"], json!(3));

    let req = test::TestRequest::get().uri("/api/bugs?severity=high").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], json!(2));
    for bug in body["data"].as_array().unwrap() {
        assert_eq!(bug["severity"], json!("high"));
    }

    let req = test::TestRequest::get().uri("/api/bugs?severity=high&status=closed").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["title"], json!("Closed Bug"));
}

#[actix_web::test]
async fn list_sorts_by_requested_key() {
    let app = test_app!(Arc::new(InMemoryBugStore::new()));
    for title in ["Bravo", "Alpha", "Charlie"] {
        let mut bug = sample_bug();
        bug["title"] = json!(title);
        create_bug!(app, bug);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let titles = |body: &Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|bug| bug["title"].as_str().unwrap().to_string())
            .collect()
    };

    let req = test::TestRequest::get().uri("/api/bugs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["Charlie", "Alpha", "Bravo"]);

    let req = test::TestRequest::get().uri("/api/bugs?sortBy=title&order=asc").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["Alpha", "Bravo", "Charlie"]);

    let req = test::TestRequest::get().uri("/api/bugs?sortBy=title&order=sideways").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["Charlie", "Bravo", "Alpha"]);

    let req = test::TestRequest::get().uri("/api/bugs?sortBy=colour").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

struct FailingStore;

fn refused() -> StoreError {
    StoreError::Database(DbErr::Conn(RuntimeErr::Internal("connection refused by 10.0.0.7".to_string())))
}

#[async_trait::async_trait]
impl BugStore for FailingStore {
    async fn find_all(
        &self,
        _filter: &BugFilter,
        _sort_key: &SortKey,
        _direction: SortDirection,
    ) -> Result<Vec<BugModel>, StoreError> {
        Err(refused())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<BugModel>, StoreError> {
        Err(refused())
    }

    async fn insert(&self, _fields: BugFields, _now: DateTime<Utc>) -> Result<BugModel, StoreError> {
        Err(refused())
    }

    async fn replace(
        &self,
        _id: &str,
        _fields: BugFields,
        _now: DateTime<Utc>,
    ) -> Result<Option<BugModel>, StoreError> {
        Err(refused())
    }

    async fn remove(&self, _id: &str) -> Result<bool, StoreError> {
        Err(refused())
    }
}

#[actix_web::test]
async fn storage_faults_map_to_generic_server_errors() {
    let app = test_app!(Arc::new(FailingStore));

    let requests = [
        test::TestRequest::get().uri("/api/bugs").to_request(),
        test::TestRequest::get().uri("/api/bugs/abc").to_request(),
        test::TestRequest::post().uri("/api/bugs").set_json(sample_bug()).to_request(),
        test::TestRequest::delete().uri("/api/bugs/abc").to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["message"].is_string());
        assert!(!body.to_string().contains("10.0.0.7"));
    }
}

#[actix_web::test]
async fn validation_runs_before_storage_on_create() {
    let app = test_app!(Arc::new(FailingStore));

    let req = test::TestRequest::post().uri("/api/bugs").set_json(json!({})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
