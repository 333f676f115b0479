//! HTTP router end to end via `tower::ServiceExt::oneshot`.

mod common;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use ledger_server::auth::JwtConfig;
use ledger_server::{Config, JwtService, Role, ServerState, build_app};
use serde_json::{Value, json};
use shared::models::PaymentType;
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-0123456789abcdef";
const WORKER_USER_ID: i64 = 500;

struct Api {
    app: Router,
    jwt: JwtService,
}

impl Api {
    fn new(env: &common::TestEnv) -> Self {
        let config = Config::for_database(env.db_path.clone(), JwtConfig::with_secret(SECRET));
        let state = ServerState::new(config, env.pool.clone());
        Self {
            app: build_app(state),
            jwt: JwtService::with_config(JwtConfig::with_secret(SECRET)),
        }
    }

    fn token(&self, user_id: i64, role: Role) -> String {
        self.jwt.generate_token(user_id, role).unwrap()
    }

    async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_health() {
    let env = common::setup().await;
    let api = Api::new(&env);
    let (status, body) = api.call("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_requires_authentication() {
    let env = common::setup().await;
    let api = Api::new(&env);

    let (status, body) = api.call("GET", "/api/earnings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = api
        .call("GET", "/api/earnings", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_caller_without_salon() {
    let env = common::setup().await;
    let api = Api::new(&env);
    let stranger = api.token(9_999, Role::Owner);

    let (status, body) = api.call("GET", "/api/earnings", Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn test_owner_and_worker_flow() {
    let env = common::setup().await;
    let api = Api::new(&env);
    let worker = env
        .add_worker(
            env.salon_id,
            Some(PaymentType::PercentageCommission),
            Some(40.0),
            Some(WORKER_USER_ID),
        )
        .await;
    let colleague = env.commission_worker(50.0).await;
    let owner = api.token(common::OWNER_ID, Role::Owner);
    let me = api.token(WORKER_USER_ID, Role::Worker);

    // owner completes a paid appointment
    let (status, body) = api
        .call(
            "POST",
            "/api/appointments/31/complete",
            Some(&owner),
            Some(json!({
                "worker_id": worker.id,
                "service_id": 1,
                "service_name": "Haircut",
                "service_price": 10_000,
                "client_paid": true,
                "payment_method": "card"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["earning"]["worker_earning"], 4_000);
    assert_eq!(body["wallet_credited"], true);

    // workers cannot complete services or give advances
    let (status, body) = api
        .call(
            "POST",
            &format!("/api/workers/{}/advances", worker.id),
            Some(&me),
            Some(json!({ "amount": 1_000, "reason": "rent" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (status, _) = api
        .call(
            "POST",
            &format!("/api/workers/{}/advances", worker.id),
            Some(&owner),
            Some(json!({ "amount": 1_000, "reason": "rent" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // worker reads own wallet, not a colleague's
    let (status, body) = api
        .call("GET", &format!("/api/workers/{}/wallet", worker.id), Some(&me), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 4_000);
    assert_eq!(body["outstanding_advances"], 1_000);
    assert_eq!(body["net_balance"], 3_000);

    let (status, _) = api
        .call("GET", &format!("/api/workers/{}/wallet", colleague.id), Some(&me), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // owner pays out
    let (status, body) = api
        .call(
            "POST",
            "/api/invoices",
            Some(&owner),
            Some(json!({ "worker_id": worker.id, "notes": "weekly" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["invoice_number"], "INV-000001");
    assert_eq!(body["total_amount"], 3_000);
    assert_eq!(body["advance_deduction"], 1_000);
    assert_eq!(body["lines"].as_array().map(Vec::len), Some(1));
    let invoice_id = body["id"].as_i64().unwrap();

    let (status, body) = api
        .call(
            "POST",
            "/api/invoices",
            Some(&owner),
            Some(json!({ "worker_id": worker.id })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5101);
    assert_eq!(body["details"]["alreadyInvoiced"], 1);

    // the worker sees the invoice and only their own earnings
    let (status, body) = api
        .call("GET", &format!("/api/invoices/{invoice_id}"), Some(&me), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["worker_id"], worker.id);

    let (status, body) = api
        .call("GET", "/api/earnings?status=invoiced", Some(&me), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, _) = api
        .call(
            "GET",
            &format!("/api/earnings?worker_id={}", colleague.id),
            Some(&me),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // reconciliation finds nothing to repair
    let (status, body) = api
        .call(
            "POST",
            &format!("/api/workers/{}/wallet/recalculate", worker.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["difference"], 0);
}

#[tokio::test]
async fn test_deferred_payment_over_http() {
    let env = common::setup().await;
    let api = Api::new(&env);
    let worker = env
        .add_worker(
            env.salon_id,
            Some(PaymentType::PercentageCommission),
            Some(50.0),
            Some(WORKER_USER_ID),
        )
        .await;
    let owner = api.token(common::OWNER_ID, Role::Owner);
    let me = api.token(WORKER_USER_ID, Role::Worker);

    let (status, body) = api
        .call(
            "POST",
            "/api/walk-ins",
            Some(&owner),
            Some(json!({ "worker_id": worker.id, "service_id": 2, "service_price": 100 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let earning_id = body["earning"]["id"].as_i64().unwrap();

    let (status, body) = api
        .call(
            "POST",
            &format!("/api/earnings/{earning_id}/mark-paid"),
            Some(&me),
            Some(json!({ "payment_method": "cash" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["is_paid"], true);

    let (status, body) = api
        .call(
            "POST",
            &format!("/api/earnings/{earning_id}/mark-paid"),
            Some(&owner),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5002);

    let (_, body) = api
        .call("GET", &format!("/api/workers/{}/wallet", worker.id), Some(&owner), None)
        .await;
    assert_eq!(body["balance"], 50);
    assert_eq!(body["total_earned"], 100);
}
