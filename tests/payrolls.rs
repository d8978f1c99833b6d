mod common;

use axum::http::StatusCode;
use common::TestApp;
use ems_backend::{
    common::error::AppError,
    db::PayrollRepository,
    models::payroll::{NewPayroll, DUPLICATE_PERIOD_MESSAGE, NET_PAY_OVERFLOW_MESSAGE},
};
use rust_decimal::Decimal;

async fn submit(
    app: &TestApp,
    uri: &str,
    id: Option<&str>,
    employee_id: &str,
    month: &str,
    salary: &str,
    bonus: &str,
) -> common::TestResponse {
    let mut fields = vec![
        ("employee_id", employee_id),
        ("month", month),
        ("year", "2024"),
        ("salary", salary),
        ("bonus", bonus),
        ("deductions", "250.00"),
    ];
    if let Some(id) = id {
        fields.push(("id", id));
    }
    app.post_form(uri, &fields).await
}

#[tokio::test]
async fn one_payroll_per_employee_and_period() {
    let app = TestApp::new().await;
    let mut employee_id = 0;
    for n in 1..=5 {
        employee_id = app.create_employee(&format!("Worker{n}"), "Payroll", "Ops").await;
    }
    assert_eq!(employee_id, 5);

    let first = submit(&app, "/Payrolls/Create", None, "5", "3", "4000.00", "500.00").await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    assert_eq!(
        app.follow_flash(&first).await.as_deref(),
        Some("Payroll record created successfully!")
    );

    let duplicate = submit(&app, "/Payrolls/Create", None, "5", "3", "9999.00", "0").await;
    assert_eq!(duplicate.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        duplicate.errors_for("__all__"),
        vec![DUPLICATE_PERIOD_MESSAGE]
    );
    assert_eq!(app.count("payrolls").await, 1);

    // Outro mês do mesmo funcionário é permitido.
    let april = submit(&app, "/Payrolls/Create", None, "5", "4", "4000.00", "0").await;
    assert_eq!(april.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn editing_a_payroll_keeps_its_period_and_recomputes_net_pay() {
    let app = TestApp::new().await;
    let employee_id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    submit(&app, "/Payrolls/Create", None, &employee_id, "3", "4000.00", "500.00").await;
    let (payroll_id, net_pay): (i64, String) = sqlx::query_as("SELECT id, net_pay FROM payrolls")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(net_pay.parse::<Decimal>().unwrap(), Decimal::new(425_000, 2));

    let id_field = payroll_id.to_string();
    let uri = format!("/Payrolls/Edit/{payroll_id}");
    let edit = submit(&app, &uri, Some(&id_field), &employee_id, "3", "4000.00", "1000.00").await;
    assert_eq!(edit.status, StatusCode::SEE_OTHER);
    assert_eq!(
        app.follow_flash(&edit).await.as_deref(),
        Some("Payroll record updated successfully!")
    );

    let net_pay: String = sqlx::query_scalar("SELECT net_pay FROM payrolls WHERE id = $1")
        .bind(payroll_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(net_pay.parse::<Decimal>().unwrap(), Decimal::new(475_000, 2));
}

#[tokio::test]
async fn blank_bonus_and_deductions_count_as_zero() {
    let app = TestApp::new().await;
    let employee_id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    let response = app
        .post_form(
            "/Payrolls/Create",
            &[
                ("employee_id", &employee_id),
                ("month", "1"),
                ("year", "2024"),
                ("salary", "3000"),
                ("bonus", ""),
                ("deductions", ""),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let list = app.get("/Payrolls").await;
    assert_eq!(list.body["model"][0]["netPay"].as_f64(), Some(3000.0));
}

#[tokio::test]
async fn month_out_of_range_is_rejected() {
    let app = TestApp::new().await;
    let employee_id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    let response = submit(&app, "/Payrolls/Create", None, &employee_id, "13", "4000", "0").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.errors_for("month"), vec!["Month must be between 1 and 12."]);
}

#[tokio::test]
async fn net_pay_beyond_decimal_range_is_rejected_without_saving() {
    let app = TestApp::new().await;
    let employee_id = app.create_employee("Jane", "Doe", "Engineering").await.to_string();

    let response = submit(
        &app,
        "/Payrolls/Create",
        None,
        &employee_id,
        "3",
        "79228162514264337593543950335",
        "1",
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["view"], "Payrolls/Create");
    assert_eq!(response.errors_for("__all__"), vec![NET_PAY_OVERFLOW_MESSAGE]);
    assert_eq!(app.count("payrolls").await, 0);
}

#[tokio::test]
async fn repository_rejects_a_second_payroll_for_the_same_period() {
    let app = TestApp::new().await;
    let employee_id = app.create_employee("Jane", "Doe", "Engineering").await;
    let repo = PayrollRepository::new(app.pool.clone());

    let march = NewPayroll {
        employee_id,
        month: 3,
        year: 2024,
        salary: Decimal::new(4000, 0),
        bonus: Decimal::ZERO,
        deductions: Decimal::ZERO,
    };
    repo.create(&march).await.unwrap();

    let err = repo.create(&march).await.unwrap_err();
    assert!(
        matches!(&err, AppError::UniqueConstraintViolation(m) if m == DUPLICATE_PERIOD_MESSAGE),
        "{err:?}"
    );
    assert_eq!(app.count("payrolls").await, 1);
}
