mod common;

use axum::http::StatusCode;
use common::TestApp;
use ems_backend::{
    common::error::AppError,
    db::UserRepository,
    models::user::{NewUser, DUPLICATE_ACCOUNT_MESSAGE, DUPLICATE_USERNAME_MESSAGE},
};

async fn create_user(app: &TestApp, employee_id: &str, username: &str, password: &str) -> common::TestResponse {
    app.post_form(
        "/Users/Create",
        &[
            ("employee_id", employee_id),
            ("username", username),
            ("password", password),
            ("role", "User"),
        ],
    )
    .await
}

async fn stored_hash(app: &TestApp, username: &str) -> String {
    sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn password_is_stored_as_a_hash() {
    let app = TestApp::new().await;
    let id = app.create_employee("John", "Doe", "IT").await.to_string();

    let response = create_user(&app, &id, "jdoe", "secret1").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        app.follow_flash(&response).await.as_deref(),
        Some("User account created successfully!")
    );

    let hash = stored_hash(&app, "jdoe").await;
    assert_ne!(hash, "secret1");
    assert!(bcrypt::verify("secret1", &hash).unwrap());

    // A listagem nunca expõe o hash.
    let list = app.get("/Users").await;
    let user = &list.body["model"][0];
    assert_eq!(user["username"], "jdoe");
    assert!(user.get("passwordHash").is_none());
    assert_eq!(user["employee"]["firstName"], "John");
}

#[tokio::test]
async fn password_needs_six_characters() {
    let app = TestApp::new().await;
    let id = app.create_employee("John", "Doe", "IT").await.to_string();

    let short = create_user(&app, &id, "jdoe", "12345").await;
    assert_eq!(short.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(short.errors_for("password"), vec!["Password must be at least 6 characters long."]);
    // A senha digitada não volta na página.
    assert!(short.body["model"].get("password").is_none());

    let ok = create_user(&app, &id, "jdoe", "123456").await;
    assert_eq!(ok.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn spaces_count_as_password_characters() {
    let app = TestApp::new().await;
    let id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    let response = create_user(&app, &id, "jdoe", "      ").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let hash = stored_hash(&app, "jdoe").await;
    assert!(bcrypt::verify("      ", &hash).unwrap());
}

#[tokio::test]
async fn usernames_and_accounts_are_unique() {
    let app = TestApp::new().await;
    let john = app.create_employee("John", "Doe", "IT").await.to_string();
    let jane = app.create_employee("Jane", "Doe", "HR").await.to_string();

    assert_eq!(create_user(&app, &john, "jdoe", "secret1").await.status, StatusCode::SEE_OTHER);

    let same_name = create_user(&app, &jane, "jdoe", "secret2").await;
    assert_eq!(same_name.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(same_name.errors_for("username"), vec![DUPLICATE_USERNAME_MESSAGE]);

    let second_account = create_user(&app, &john, "johnny", "secret3").await;
    assert_eq!(second_account.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(second_account.errors_for("employee_id"), vec![DUPLICATE_ACCOUNT_MESSAGE]);

    assert_eq!(app.count("users").await, 1);
}

#[tokio::test]
async fn create_dropdown_only_lists_employees_without_account() {
    let app = TestApp::new().await;
    let john = app.create_employee("John", "Doe", "IT").await;
    app.create_employee("Jane", "Doe", "HR").await;
    create_user(&app, &john.to_string(), "jdoe", "secret1").await;

    let page = app.get("/Users/Create").await;
    assert_eq!(page.body["model"]["role"], "User");
    let options = page.body["employees"].as_array().unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0]["text"], "Jane Doe (HR)");

    // Na edição o dono atual continua na lista, já selecionado.
    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users").fetch_one(&app.pool).await.unwrap();
    let edit = app.get(&format!("/Users/Edit/{user_id}")).await;
    let options = edit.body["employees"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    let selected: Vec<_> = options.iter().filter(|o| o["selected"] == true).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["value"].as_i64(), Some(john));
}

#[tokio::test]
async fn blank_new_password_keeps_the_current_hash() {
    let app = TestApp::new().await;
    let id = app.create_employee("John", "Doe", "IT").await.to_string();
    create_user(&app, &id, "jdoe", "secret1").await;
    let before = stored_hash(&app, "jdoe").await;

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users").fetch_one(&app.pool).await.unwrap();
    let user_field = user_id.to_string();
    let uri = format!("/Users/Edit/{user_id}");

    let response = app
        .post_form(
            &uri,
            &[
                ("id", &user_field),
                ("employee_id", &id),
                ("username", "jdoe"),
                ("new_password", ""),
                ("role", "Admin"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        app.follow_flash(&response).await.as_deref(),
        Some("User account updated successfully!")
    );
    assert_eq!(stored_hash(&app, "jdoe").await, before);

    let response = app
        .post_form(
            &uri,
            &[
                ("id", &user_field),
                ("employee_id", &id),
                ("username", "jdoe"),
                ("new_password", "changed1"),
                ("role", "Admin"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let after = stored_hash(&app, "jdoe").await;
    assert_ne!(after, before);
    assert!(bcrypt::verify("changed1", &after).unwrap());
}

#[tokio::test]
async fn deleting_unknown_user_redirects_with_not_found() {
    let app = TestApp::new().await;

    let response = app.post_form("/Users/Delete/999999", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(app.follow_flash(&response).await.as_deref(), Some("User account not found."));
}

#[tokio::test]
async fn repository_turns_unique_constraints_into_readable_messages() {
    let app = TestApp::new().await;
    let jane = app.create_employee("Jane", "Doe", "Engineering").await;
    let john = app.create_employee("John", "Roe", "Sales").await;
    let repo = UserRepository::new(app.pool.clone());

    let account = |employee_id: i64, username: &str| NewUser {
        employee_id,
        username: username.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: "User".to_string(),
    };

    repo.create(&account(jane, "jdoe")).await.unwrap();

    let err = repo.create(&account(john, "jdoe")).await.unwrap_err();
    assert!(
        matches!(&err, AppError::UniqueConstraintViolation(m) if m == DUPLICATE_USERNAME_MESSAGE),
        "{err:?}"
    );

    let err = repo.create(&account(jane, "jane2")).await.unwrap_err();
    assert!(
        matches!(&err, AppError::UniqueConstraintViolation(m) if m == DUPLICATE_ACCOUNT_MESSAGE),
        "{err:?}"
    );
    assert_eq!(app.count("users").await, 1);
}
