mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn created_employee_is_listed_once_with_submitted_values() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/Employees/Create",
            &[
                ("first_name", "Jane"),
                ("last_name", "Doe"),
                ("email", "jane.doe@example.com"),
                ("department", "Engineering"),
                ("hire_date", "2024-01-15"),
                ("salary", "50000.00"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/Employees"));
    assert_eq!(
        app.follow_flash(&response).await.as_deref(),
        Some("Employee Jane Doe created successfully!")
    );

    let list = app.get("/Employees").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["view"], "Employees/Index");

    let employees = list.body["model"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["firstName"], "Jane");
    assert_eq!(employees[0]["email"], "jane.doe@example.com");
    assert_eq!(employees[0]["hireDate"], "2024-01-15");
    assert_eq!(employees[0]["salary"].as_f64(), Some(50000.0));
}

#[tokio::test]
async fn flash_is_shown_only_once() {
    let app = TestApp::new().await;
    app.create_employee("Ana", "Alves", "Finance").await;

    let response = app
        .post_form("/Employees/Delete/999999", &[])
        .await;
    let cookie = response.flash_cookie().unwrap();

    let first = app.get_with_cookie("/Employees", &cookie).await;
    assert_eq!(first.body["flash"]["kind"], "error");

    // O cookie de flash é removido na primeira leitura.
    let removal = first.flash_cookie().unwrap_or_default();
    assert!(removal.starts_with("_flash="));
    let second = app.get("/Employees").await;
    assert!(second.body.get("flash").is_none());
}

#[tokio::test]
async fn invalid_employee_form_is_rendered_again() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/Employees/Create",
            &[
                ("first_name", "Jane"),
                ("last_name", ""),
                ("email", "not-an-email"),
                ("hire_date", "2024-01-15"),
                ("salary", "-1"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["view"], "Employees/Create");
    assert_eq!(response.body["model"]["firstName"], "Jane");
    assert_eq!(response.body["flash"]["message"], "Please fix the validation errors below.");
    assert!(!response.errors_for("last_name").is_empty());
    assert!(!response.errors_for("email").is_empty());
    assert!(!response.errors_for("salary").is_empty());
    assert_eq!(app.count("employees").await, 0);
}

#[tokio::test]
async fn unreadable_values_are_reported_per_field() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/Employees/Create",
            &[
                ("first_name", "Jane"),
                ("last_name", ""),
                ("email", "jane.doe@example.com"),
                ("hire_date", "x"),
                ("salary", "abc"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["view"], "Employees/Create");
    assert_eq!(response.body["model"]["firstName"], "Jane");
    assert_eq!(response.errors_for("salary"), vec!["The value 'abc' is not valid for salary."]);
    assert_eq!(response.errors_for("hire_date"), vec!["The value 'x' is not valid for hire_date."]);
    assert_eq!(response.errors_for("last_name"), vec!["Last name is required"]);
    assert_eq!(app.count("employees").await, 0);
}

#[tokio::test]
async fn rerendered_form_drops_a_pending_flash() {
    let app = TestApp::new().await;
    let stale = app.post_form("/Employees/Delete/999999", &[]).await;
    let cookie = stale.flash_cookie().unwrap();

    let response = app
        .post_form_with_cookie("/Employees/Create", &[("first_name", "Jane")], &cookie)
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["flash"]["message"], "Please fix the validation errors below.");
    assert_eq!(response.flash_cookie().as_deref(), Some("_flash="));
}

#[tokio::test]
async fn editing_a_deleted_employee_reports_not_found() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await;
    let id_field = id.to_string();

    sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .post_form(
            &format!("/Employees/Edit/{id}"),
            &[
                ("id", &id_field),
                ("first_name", "Jane"),
                ("last_name", "Doe"),
                ("email", "jane.doe@example.com"),
                ("hire_date", "2023-01-10"),
                ("salary", "50000"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/Employees"));
    assert_eq!(app.follow_flash(&response).await.as_deref(), Some("Employee not found."));
    assert_eq!(app.count("employees").await, 0);
}

#[tokio::test]
async fn edit_with_mismatched_id_changes_nothing() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await;
    let other = (id + 1).to_string();

    let response = app
        .post_form(
            &format!("/Employees/Edit/{id}"),
            &[
                ("id", &other),
                ("first_name", "Janet"),
                ("last_name", "Doe"),
                ("email", "jane.doe@example.com"),
                ("hire_date", "2023-01-10"),
                ("salary", "50000"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(app.follow_flash(&response).await.as_deref(), Some("Employee ID mismatch."));

    let first_name: String = sqlx::query_scalar("SELECT first_name FROM employees WHERE id = $1")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(first_name, "Jane");
}

#[tokio::test]
async fn edit_updates_the_whole_record() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await;
    let id_field = id.to_string();

    let form = app.get(&format!("/Employees/Edit/{id}")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.body["model"]["department"], "Engineering");

    let response = app
        .post_form(
            &format!("/Employees/Edit/{id}"),
            &[
                ("id", &id_field),
                ("first_name", "Jane"),
                ("last_name", "Smith"),
                ("email", "jane.smith@example.com"),
                ("department", ""),
                ("hire_date", "2023-01-10"),
                ("salary", "65000.50"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let details = app.get(&format!("/Employees/Details/{id}")).await;
    assert_eq!(details.body["model"]["lastName"], "Smith");
    assert!(details.body["model"]["department"].is_null());
    assert_eq!(details.body["model"]["salary"].as_f64(), Some(65000.5));
}

#[tokio::test]
async fn missing_and_unknown_ids_redirect_to_the_list() {
    let app = TestApp::new().await;

    let missing = app.get("/Employees/Details").await;
    assert_eq!(missing.status, StatusCode::SEE_OTHER);
    assert_eq!(app.follow_flash(&missing).await.as_deref(), Some("Employee ID not provided."));

    let unknown = app.get("/Employees/Edit/999999").await;
    assert_eq!(unknown.status, StatusCode::SEE_OTHER);
    assert_eq!(app.follow_flash(&unknown).await.as_deref(), Some("Employee not found."));

    let delete = app.post_form("/Employees/Delete/999999", &[]).await;
    assert_eq!(delete.status, StatusCode::SEE_OTHER);
    assert_eq!(delete.location(), Some("/Employees"));
    assert_eq!(app.follow_flash(&delete).await.as_deref(), Some("Employee not found."));
}

#[tokio::test]
async fn deleting_an_employee_removes_dependent_records() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await;
    let employee_id = id.to_string();

    let attendance = app
        .post_form(
            "/Attendances/Create",
            &[
                ("employee_id", &employee_id),
                ("date", "2024-03-01"),
                ("check_in_time", "09:00"),
                ("status", "Present"),
            ],
        )
        .await;
    assert_eq!(attendance.status, StatusCode::SEE_OTHER);

    let response = app.post_form(&format!("/Employees/Delete/{id}"), &[]).await;
    assert_eq!(
        app.follow_flash(&response).await.as_deref(),
        Some("Employee Jane Doe deleted successfully!")
    );
    assert_eq!(app.count("employees").await, 0);
    assert_eq!(app.count("attendances").await, 0);
}
