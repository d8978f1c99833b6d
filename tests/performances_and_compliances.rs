mod common;

use axum::http::StatusCode;
use chrono::{Days, Local};
use common::TestApp;

async fn review(app: &TestApp, employee_id: &str, date: &str, score: &str) -> common::TestResponse {
    app.post_form(
        "/Performances/Create",
        &[
            ("employee_id", employee_id),
            ("review_date", date),
            ("score", score),
            ("comments", "Solid quarter"),
        ],
    )
    .await
}

#[tokio::test]
async fn score_must_stay_between_one_and_five() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    for (score, accepted) in [("0.999", false), ("1.0", true), ("5.0", true), ("5.001", false)] {
        let response = review(&app, &id, "2024-06-30", score).await;
        if accepted {
            assert_eq!(response.status, StatusCode::SEE_OTHER, "score {score}");
        } else {
            assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "score {score}");
            assert_eq!(response.errors_for("score"), vec!["Score must be between 1.0 and 5.0."]);
        }
    }
    assert_eq!(app.count("performances").await, 2);
}

#[tokio::test]
async fn review_date_cannot_be_in_the_future() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();
    let today = Local::now().date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

    let response = review(&app, &id, &tomorrow.to_string(), "4.0").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.errors_for("review_date"), vec!["Review date cannot be in the future."]);

    let response = review(&app, &id, &today.to_string(), "4.0").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        app.follow_flash(&response).await.as_deref(),
        Some("Performance record created successfully!")
    );
}

#[tokio::test]
async fn performance_details_include_the_employee() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();
    review(&app, &id, "2024-06-30", "4.5").await;

    let list = app.get("/Performances").await;
    let record = &list.body["model"][0];
    assert_eq!(record["score"].as_f64(), Some(4.5));
    assert_eq!(record["comments"], "Solid quarter");

    let record_id = record["id"].as_i64().unwrap();
    let details = app.get(&format!("/Performances/Details/{record_id}")).await;
    assert_eq!(details.body["view"], "Performances/Details");
    assert_eq!(details.body["model"]["employee"]["department"], "Engineering");
}

#[tokio::test]
async fn compliance_acknowledgment_cannot_be_in_the_future() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();
    let tomorrow = Local::now().date_naive().checked_add_days(Days::new(1)).unwrap().to_string();

    let response = app
        .post_form(
            "/Compliances/Create",
            &[
                ("employee_id", &id),
                ("policy", "Code of Conduct"),
                ("acknowledged_on", &tomorrow),
                ("status", "Acknowledged"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!response.errors_for("acknowledged_on").is_empty());

    let response = app
        .post_form(
            "/Compliances/Create",
            &[
                ("employee_id", &id),
                ("policy", "Code of Conduct"),
                ("acknowledged_on", "2024-01-05"),
                ("status", "Acknowledged"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        app.follow_flash(&response).await.as_deref(),
        Some("Compliance record created successfully!")
    );
}

#[tokio::test]
async fn unknown_compliance_ids_redirect() {
    let app = TestApp::new().await;

    let missing = app.get("/Compliances/Delete").await;
    assert_eq!(app.follow_flash(&missing).await.as_deref(), Some("Compliance ID not provided."));

    let unknown = app.get("/Compliances/Details/999999").await;
    assert_eq!(app.follow_flash(&unknown).await.as_deref(), Some("Compliance record not found."));
}

#[tokio::test]
async fn create_form_defaults_to_today_and_a_middle_score() {
    let app = TestApp::new().await;
    app.create_employee("Jane", "Doe", "Engineering").await;

    let page = app.get("/Performances/Create").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["model"]["score"].as_f64(), Some(3.0));
    assert_eq!(page.body["model"]["reviewDate"], Local::now().date_naive().to_string());
    assert_eq!(page.body["employees"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unreadable_score_is_reported_on_its_field() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    let response = review(&app, &id, "2024-06-30", "abc").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["view"], "Performances/Create");
    assert_eq!(response.errors_for("score"), vec!["The value 'abc' is not valid for score."]);
    assert_eq!(response.body["model"]["comments"], "Solid quarter");
    assert_eq!(response.body["employees"][0]["selected"], true);
    assert_eq!(app.count("performances").await, 0);
}
