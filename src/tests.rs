//! Integration tests for the worship backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::RwLock;

use crate::db::{init_database, MemberRepository};
use crate::roster::RosterStore;
use crate::schedule::ScheduleBook;
use crate::{create_router, AppState};

const SCHEDULE_JSON: &str = r#"{
    "Q3-2025": {
        "quarter": "Q3 2025",
        "months": ["July", "August", "September"],
        "schedule": {
            "July": [
                {
                    "date": "July 6",
                    "assignments": {
                        "LEAD": "Jane Doe",
                        "BACKUP VOCALS": ["Sam Park", "Ada Lane"],
                        "DRUMS": "Chris Bell"
                    }
                },
                {
                    "date": "July 13",
                    "assignments": {
                        "LEAD": "Sam Park"
                    }
                }
            ]
        }
    }
}"#;

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let schedule_path = temp_dir.path().join("schedule.json");
        std::fs::write(&schedule_path, SCHEDULE_JSON).expect("Failed to write schedule");

        // Initialize database and roster store
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let table = Arc::new(MemberRepository::new(pool));
        let mut store = RosterStore::new(table);
        store.load().await;

        let schedule =
            Arc::new(ScheduleBook::load_from_file(&schedule_path).expect("Failed to load book"));

        let state = AppState {
            roster: Arc::new(RwLock::new(store)),
            schedule,
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_member(&self, body: Value) -> Value {
        let resp = self
            .client
            .post(self.url("/api/members"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_member_crud() {
    let fixture = TestFixture::new().await;

    // Create member
    let create_body = fixture
        .create_member(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "(555) 123-4567",
            "role": "Lead Vocalist",
            "instruments": ["Vocals"],
            "availability": "Sundays",
            "birthday": "1990-04-12"
        }))
        .await;

    assert_eq!(create_body["success"], true);
    let member_id = create_body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(create_body["data"]["name"], "Jane Doe");
    assert_eq!(create_body["data"]["role"], "Lead Vocalist");
    // Status defaults to active when the form omits it
    assert_eq!(create_body["data"]["status"], "active");

    // Get member
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/members/{}", member_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(get_resp.status(), 200);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["name"], "Jane Doe");
    assert_eq!(get_body["data"]["birthday"], "1990-04-12");

    // Update member
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/members/{}", member_id)))
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "(555) 123-4567",
            "role": "Lead Vocalist",
            "instruments": ["Vocals"],
            "availability": "Sundays, Wednesdays",
            "birthday": "1990-04-12"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["availability"], "Sundays, Wednesdays");
    assert_eq!(update_body["data"]["id"], member_id.as_str());

    // List members
    let list_resp = fixture
        .client
        .get(fixture.url("/api/members"))
        .send()
        .await
        .unwrap();

    assert_eq!(list_resp.status(), 200);
    let list_body: Value = list_resp.json().await.unwrap();
    let members = list_body["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["availability"], "Sundays, Wednesdays");

    // Delete member
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/members/{}", member_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(delete_resp.status(), 200);

    // Verify deleted
    let get_deleted_resp = fixture
        .client
        .get(fixture.url(&format!("/api/members/{}", member_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(get_deleted_resp.status(), 404);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let fixture = TestFixture::new().await;

    let create_body = fixture
        .create_member(json!({
            "name": "Sam Park",
            "role": "Drums"
        }))
        .await;
    let member_id = create_body["data"]["id"].as_str().unwrap().to_string();

    let first = fixture
        .client
        .delete(fixture.url(&format!("/api/members/{}", member_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    // Deleting an already-absent id is a no-op, not an error
    let second = fixture
        .client
        .delete(fixture.url(&format!("/api/members/{}", member_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 200);

    let list_resp = fixture
        .client
        .get(fixture.url("/api/members"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    assert!(list_body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Create member with empty name
    let resp = fixture
        .client
        .post(fixture.url("/api/members"))
        .json(&json!({
            "name": "",
            "role": "Drums"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Create member without a role
    let resp2 = fixture
        .client
        .post(fixture.url("/api/members"))
        .json(&json!({
            "name": "No Role"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 400);

    // Nothing was persisted
    let list_resp = fixture
        .client
        .get(fixture.url("/api/members"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    assert!(list_body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/members/non-existent-id"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    // Updating a missing member is also a 404
    let resp2 = fixture
        .client
        .put(fixture.url("/api/members/non-existent-id"))
        .json(&json!({ "name": "Ghost", "role": "Drums" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 404);
}

#[tokio::test]
async fn test_member_stats() {
    let fixture = TestFixture::new().await;

    fixture
        .create_member(json!({
            "name": "Jane Doe",
            "role": "Lead Vocalist",
            "instruments": ["Vocals"]
        }))
        .await;
    fixture
        .create_member(json!({
            "name": "Sam Park",
            "role": "Drums",
            "instruments": ["Drums"]
        }))
        .await;
    fixture
        .create_member(json!({
            "name": "Old Member",
            "role": "Sound Tech",
            "status": "inactive"
        }))
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/members/stats"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["activeMembers"], 2);
    assert_eq!(body["data"]["vocalists"], 1);
    assert_eq!(body["data"]["musicians"], 1);
    assert_eq!(body["data"]["techTeam"], 0);
}

#[tokio::test]
async fn test_schedule_endpoints() {
    let fixture = TestFixture::new().await;

    // Quarters
    let quarters_resp = fixture
        .client
        .get(fixture.url("/api/schedule/quarters"))
        .send()
        .await
        .unwrap();
    assert_eq!(quarters_resp.status(), 200);
    let quarters_body: Value = quarters_resp.json().await.unwrap();
    assert_eq!(quarters_body["data"], json!(["Q3-2025"]));

    // Slice for an explicit month
    let resp = fixture
        .client
        .get(fixture.url("/api/schedule?quarter=Q3-2025&month=July"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["quarter"], "Q3 2025");
    assert_eq!(body["data"]["month"], "July");
    let services = body["data"]["services"].as_array().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0]["date"], "July 6");
    assert_eq!(services[0]["assignments"]["LEAD"], "Jane Doe");
    assert_eq!(
        services[0]["assignments"]["BACKUP VOCALS"],
        json!(["Sam Park", "Ada Lane"])
    );

    // Month defaults to the quarter's first month
    let default_resp = fixture
        .client
        .get(fixture.url("/api/schedule?quarter=Q3-2025"))
        .send()
        .await
        .unwrap();
    let default_body: Value = default_resp.json().await.unwrap();
    assert_eq!(default_body["data"]["month"], "July");

    // A month with no services renders an empty table
    let empty_resp = fixture
        .client
        .get(fixture.url("/api/schedule?quarter=Q3-2025&month=August"))
        .send()
        .await
        .unwrap();
    let empty_body: Value = empty_resp.json().await.unwrap();
    assert!(empty_body["data"]["services"].as_array().unwrap().is_empty());

    // Unknown quarter is a 404
    let missing_resp = fixture
        .client
        .get(fixture.url("/api/schedule?quarter=Q1-2020"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_resp.status(), 404);
}

#[tokio::test]
async fn test_roster_survives_restart() {
    let fixture = TestFixture::new().await;

    let create_body = fixture
        .create_member(json!({
            "name": "Jane Doe",
            "role": "Lead Vocalist",
            "instruments": ["Vocals", "Piano"]
        }))
        .await;
    let member_id = create_body["data"]["id"].as_str().unwrap().to_string();

    // A fresh store over the same database sees the persisted record
    let pool = init_database(&fixture._temp_dir.path().join("test.sqlite"))
        .await
        .unwrap();
    let table = Arc::new(MemberRepository::new(pool));
    let mut store = RosterStore::new(table);
    store.load().await;

    let member = store.member(&member_id).expect("member was persisted");
    assert_eq!(member.name, "Jane Doe");
    assert_eq!(member.instruments.len(), 2);
}
