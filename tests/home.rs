mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn dashboard_counts_employees_attendance_and_leaves() {
    let app = TestApp::new().await;

    let empty = app.get("/").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["view"], "Home/Index");
    assert_eq!(empty.body["model"]["totalEmployees"], 0);

    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();
    app.create_employee("John", "Roe", "Sales").await;
    app.post_form(
        "/Leaves/Create",
        &[
            ("employee_id", &id),
            ("leave_type", "Annual"),
            ("start_date", "2024-05-10"),
            ("end_date", "2024-05-12"),
            ("status", "Pending"),
        ],
    )
    .await;

    let page = app.get("/Home/Index").await;
    assert_eq!(page.body["model"]["totalEmployees"], 2);
    assert_eq!(page.body["model"]["totalAttendance"], 0);
    assert_eq!(page.body["model"]["totalLeaves"], 1);
}

#[tokio::test]
async fn unknown_route_renders_the_error_page() {
    let app = TestApp::new().await;

    let response = app.get("/Nowhere/Index").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["view"], "Home/Error");
}

#[tokio::test]
async fn health_check_answers() {
    let app = TestApp::new().await;
    assert_eq!(app.get("/api/health").await.status, StatusCode::OK);
}
