//! Shared harness for the API tests.
//!
//! Assembles the full router against in-memory storage and a throwaway key
//! endpoint, and mints tokens with arbitrary permission sets.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use ed25519_dalek::SigningKey;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use barista_core::BaristaConfig;
use barista_server::AppState;
use barista_server::routes;

pub const KID: &str = "barista-key-1";
pub const AUDIENCE: &str = "drinks";
pub const ISSUER: &str = "https://barista.test/";

/// PKCS#8 v1 wrapper for a raw Ed25519 seed.
const PKCS8_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04,
    0x20,
];

pub struct TestContext {
    pub app: Router,
    signing_der: Vec<u8>,
}

impl TestContext {
    /// Assemble the API with default configuration.
    pub async fn setup() -> Self {
        Self::setup_with(|_| {}).await
    }

    /// Assemble the API, letting the caller adjust configuration first.
    pub async fn setup_with(tweak: impl FnOnce(&mut BaristaConfig)) -> Self {
        let signing = SigningKey::from_bytes(&[42u8; 32]);
        let mut signing_der = PKCS8_PREFIX.to_vec();
        signing_der.extend_from_slice(signing.as_bytes());

        let keys = json!({
            "keys": [{
                "kty": "OKP",
                "crv": "Ed25519",
                "use": "sig",
                "alg": "EdDSA",
                "kid": KID,
                "x": URL_SAFE_NO_PAD.encode(signing.verifying_key().as_bytes()),
            }]
        });
        let jwks_url = spawn_key_endpoint(keys).await;

        let mut config = BaristaConfig::default();
        config.database.path = ":memory:".to_string();
        config.auth.audience = AUDIENCE.to_string();
        config.auth.algorithm = "EdDSA".to_string();
        config.auth.issuer = Some(ISSUER.to_string());
        config.auth.jwks_url = Some(jwks_url);
        tweak(&mut config);

        let state = AppState::init(config).await.unwrap();
        Self {
            app: routes::create_router(state),
            signing_der,
        }
    }

    /// A fresh token carrying the given permissions, valid for an hour.
    pub fn token(&self, permissions: &[&str]) -> String {
        self.mint(Some(KID), &claims(Some(permissions), AUDIENCE, ISSUER, in_an_hour()))
    }

    /// A valid token whose payload has no permissions claim at all.
    pub fn token_without_permissions(&self) -> String {
        self.mint(Some(KID), &claims(None, AUDIENCE, ISSUER, in_an_hour()))
    }

    /// A properly signed token that expired an hour ago.
    pub fn expired_token(&self, permissions: &[&str]) -> String {
        self.mint(
            Some(KID),
            &claims(Some(permissions), AUDIENCE, ISSUER, Utc::now().timestamp() - 3600),
        )
    }

    /// A token minted for some other audience and issuer.
    pub fn foreign_token(&self, permissions: &[&str]) -> String {
        self.mint(
            Some(KID),
            &claims(Some(permissions), "other-api", "https://other.test/", in_an_hour()),
        )
    }

    /// A token whose header names no key id.
    pub fn token_without_kid(&self) -> String {
        self.mint(None, &claims(Some(&["post:drinks"]), AUDIENCE, ISSUER, in_an_hour()))
    }

    /// A token naming a key id the endpoint does not serve.
    pub fn token_with_unknown_kid(&self) -> String {
        self.mint(
            Some("retired-key"),
            &claims(Some(&["post:drinks"]), AUDIENCE, ISSUER, in_an_hour()),
        )
    }

    fn mint(&self, kid: Option<&str>, claims: &Value) -> String {
        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = kid.map(str::to_string);
        let key = EncodingKey::from_ed_der(&self.signing_der);
        jsonwebtoken::encode(&header, claims, &key).unwrap()
    }

    /// Drive one request through the router and decode the JSON body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = if let Some(body) = body {
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };
        read_json(self.raw(request).await).await
    }

    /// Like [`send`], but with a verbatim Authorization header value.
    pub async fn send_with_header(
        &self,
        method: Method,
        path: &str,
        authorization: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap();
        read_json(self.raw(request).await).await
    }

    /// Like [`send`], but with a verbatim request body.
    pub async fn send_raw_body(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        read_json(self.raw(request).await).await
    }

    /// Drive one request and hand back the raw response.
    pub async fn raw(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

fn claims(permissions: Option<&[&str]>, aud: &str, iss: &str, exp: i64) -> Value {
    let mut claims = json!({
        "iss": iss,
        "sub": "auth0|barista-tester",
        "aud": aud,
        "exp": exp,
    });
    if let Some(permissions) = permissions {
        claims["permissions"] = json!(permissions);
    }
    claims
}

fn in_an_hour() -> i64 {
    Utc::now().timestamp() + 3600
}

/// Split a response into its status and decoded JSON body.
pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn serve_keys(State(keys): State<Value>) -> Json<Value> {
    Json(keys)
}

async fn spawn_key_endpoint(keys: Value) -> String {
    let app = Router::new()
        .route("/.well-known/jwks.json", get(serve_keys))
        .with_state(keys);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let url = format!(
        "http://{}/.well-known/jwks.json",
        listener.local_addr().unwrap()
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    url
}

/// The everyone-starts-here fixture.
pub fn water_body() -> Value {
    json!({
        "title": "Water",
        "recipe": [{"name": "water", "color": "blue", "parts": 1}]
    })
}

/// Assert the fixed `{"success": false, "error", "message"}` envelope.
pub fn assert_error_body(body: &Value, status: u16, message: &str) {
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(status));
    assert_eq!(body["message"], json!(message));
}

/// Assert the token-failure envelope, which also carries a taxonomy code.
pub fn assert_auth_body(body: &Value, status: u16, code: &str, message: &str) {
    assert_error_body(body, status, message);
    assert_eq!(body["code"], json!(code));
}
