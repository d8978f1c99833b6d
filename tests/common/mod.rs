// tests/common/mod.rs
//
// Sobe o router completo contra um SQLite em memória e fala com ele via `oneshot`.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use ems_backend::{config::AppState, db, router};

// Custo mínimo do bcrypt para os testes não ficarem lentos.
const TEST_HASH_COST: u32 = 4;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// "_flash=..." pronto para ser devolvido no header Cookie.
    pub fn flash_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("_flash="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn errors_for(&self, field: &str) -> Vec<String> {
        self.body["errors"][field]
            .as_array()
            .map(|msgs| msgs.iter().filter_map(|m| m.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        // Uma única conexão que nunca é reciclada: cada conexão nova seria um banco vazio.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("falha ao abrir o SQLite em memória");

        db::ensure_created(&pool).await.expect("falha ao criar o esquema");

        let state = AppState::from_pool(pool.clone(), TEST_HASH_COST);
        Self { router: router(state), pool }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("router falhou");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("corpo ilegível");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        let request = Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form_with_cookie(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: &str,
    ) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, cookie)
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    /// Segue o redirect levando o cookie de flash e devolve a mensagem exibida.
    pub async fn follow_flash(&self, response: &TestResponse) -> Option<String> {
        let location = response.location()?;
        let cookie = response.flash_cookie()?;
        let page = self.get_with_cookie(location, &cookie).await;
        page.body["flash"]["message"].as_str().map(str::to_string)
    }

    pub async fn create_employee(&self, first: &str, last: &str, department: &str) -> i64 {
        let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
        let response = self
            .post_form(
                "/Employees/Create",
                &[
                    ("first_name", first),
                    ("last_name", last),
                    ("email", &email),
                    ("phone", "+1 555 123 4567"),
                    ("department", department),
                    ("position", "Analyst"),
                    ("hire_date", "2023-01-10"),
                    ("salary", "50000.00"),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "cadastro de funcionário falhou: {}", response.body);

        sqlx::query_scalar("SELECT id FROM employees WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
