use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use lrl_advisory::BestEffort;
use lrl_docstore::InMemoryDocumentStore;
use lrl_ledger::{InMemoryLedger, JournalLedger, LedgerStore, SyncMode};
use lrl_profile::{InMemoryProfileStore, ProfileStore};
use lrl_registry::{ProfileKycPolicy, Registry, RegistryConfig};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// LRL HTTP server.
pub struct LrlServer {
    config: ServerConfig,
}

impl LrlServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wire the registry, stores, and advisory stack from configuration.
    pub fn build_state(&self) -> ServerResult<AppState> {
        let store: Arc<dyn LedgerStore> = match &self.config.journal_path {
            Some(path) => Arc::new(JournalLedger::open(path, SyncMode::EveryWrite)?),
            None => Arc::new(InMemoryLedger::new()),
        };

        let profiles: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());
        let registry_config = RegistryConfig::new(self.config.admin);
        let registry = if self.config.require_kyc {
            Registry::with_policy(
                store,
                registry_config,
                Arc::new(ProfileKycPolicy::new(Arc::clone(&profiles))),
            )
        } else {
            Registry::new(store, registry_config)
        };

        Ok(AppState {
            registry: Arc::new(registry),
            profiles,
            documents: Arc::new(InMemoryDocumentStore::new()),
            advisory: Arc::new(BestEffort::heuristic_only()),
        })
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<Router> {
        Ok(build_router(self.build_state()?, self.config.enable_cors))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        if self.config.admin.is_zero() {
            tracing::warn!("admin is the zero address; no caller will pass the verify gate");
        }
        let router = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("LRL server listening on {}", self.config.bind_addr);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use lrl_types::Address;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handler::CALLER_HEADER;

    use super::*;

    fn admin() -> Address {
        Address::from_bytes([0xad; 20])
    }

    fn addr(seed: u8) -> Address {
        Address::from_bytes([seed; 20])
    }

    fn test_router() -> Router {
        let config = ServerConfig {
            admin: admin(),
            ..ServerConfig::default()
        };
        LrlServer::new(config).router().unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, caller: &Address, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CALLER_HEADER, caller.to_hex())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn register(router: &Router, owner: &Address) -> u64 {
        let (status, body) = send(
            router,
            post_json(
                "/v1/properties",
                owner,
                json!({
                    "property_number": "PN-1",
                    "location": "12 Harbor Lane",
                    "document_ref": "doc:abc",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn health_and_info() {
        let router = test_router();
        let (status, body) = send(&router, get("/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&router, get("/v1/info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "lrl-server");
    }

    #[tokio::test]
    async fn register_requires_caller_header() {
        let router = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/v1/properties")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "property_number": "PN-1",
                    "location": "X",
                    "document_ref": "doc:1",
                })
                .to_string(),
            ))
            .unwrap();

        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_CALLER");
    }

    #[tokio::test]
    async fn register_verify_transfer_over_http() {
        let router = test_router();
        let a = addr(1);
        let b = addr(2);
        let id = register(&router, &a).await;

        // Transfer before verification is refused with its own code.
        let (status, body) = send(
            &router,
            post_json(
                &format!("/v1/properties/{id}/transfer"),
                &a,
                json!({ "new_owner": b.to_hex() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NOT_VERIFIED");

        // Verification is admin-only.
        let (status, body) = send(
            &router,
            post_json(&format!("/v1/properties/{id}/verify"), &a, json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, body) = send(
            &router,
            post_json(&format!("/v1/properties/{id}/verify"), &admin(), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verified"], true);

        // Now the transfer commits and the record is queryable.
        let (status, record) = send(
            &router,
            post_json(
                &format!("/v1/properties/{id}/transfer"),
                &a,
                json!({ "new_owner": b.to_hex() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["sender"], a.to_hex());
        assert_eq!(record["receiver"], b.to_hex());

        let (status, property) = send(&router, get(&format!("/v1/properties/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(property["owner"], b.to_hex());

        let (_, history) = send(&router, get(&format!("/v1/properties/{id}/history"))).await;
        assert_eq!(history.as_array().unwrap().len(), 1);

        let reference = record["tx_ref"].as_str().unwrap();
        let (status, found) =
            send(&router, get(&format!("/v1/transactions/{reference}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["tx_ref"], *reference);

        let (_, involving) = send(
            &router,
            get(&format!("/v1/addresses/{}/transactions", b.to_hex())),
        )
        .await;
        assert_eq!(involving.as_array().unwrap().len(), 1);

        let (_, owned) = send(
            &router,
            get(&format!("/v1/addresses/{}/properties", b.to_hex())),
        )
        .await;
        assert_eq!(owned.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_property_is_not_found() {
        let router = test_router();
        let (status, body) = send(&router, get("/v1/properties/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn profile_upsert_and_fetch() {
        let router = test_router();
        let who = addr(5);
        let uri = format!("/v1/profiles/{}", who.to_hex());

        let (status, body) = send(&router, get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "PROFILE_NOT_FOUND");

        let request = Request::builder()
            .method("PUT")
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": "Asha Rao",
                    "national_id": "123456789012",
                    "phone": "9876543210",
                    "postal_address": "4 Temple Rd",
                })
                .to_string(),
            ))
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Asha Rao");

        // Malformed national id is rejected with its own code.
        let request = Request::builder()
            .method("PUT")
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": "Asha Rao",
                    "national_id": "123",
                    "phone": "9876543210",
                    "postal_address": "4 Temple Rd",
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");
    }

    #[tokio::test]
    async fn document_roundtrip() {
        let router = test_router();

        let request = Request::builder()
            .method("POST")
            .uri("/v1/documents")
            .body(Body::from(&b"deed scan"[..]))
            .unwrap();
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::CREATED);
        let reference = body["document_ref"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(get(&format!("/v1/documents/{reference}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"deed scan");
    }

    #[tokio::test]
    async fn advisory_always_answers() {
        let router = test_router();
        let id = register(&router, &addr(1)).await;

        let (status, body) = send(&router, get(&format!("/v1/properties/{id}/advisory"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["narrative"].as_str().unwrap().contains("no recorded transfers"));
    }

    #[tokio::test]
    async fn kyc_gate_is_config_driven() {
        let config = ServerConfig {
            admin: admin(),
            require_kyc: true,
            ..ServerConfig::default()
        };
        let router = LrlServer::new(config).router().unwrap();
        let a = addr(1);
        let id = register(&router, &a).await;

        send(
            &router,
            post_json(&format!("/v1/properties/{id}/verify"), &admin(), json!({})),
        )
        .await;

        let (status, body) = send(
            &router,
            post_json(
                &format!("/v1/properties/{id}/transfer"),
                &a,
                json!({ "new_owner": addr(2).to_hex() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "POLICY_DENIED");
    }

    #[tokio::test]
    async fn journal_backed_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("ledger.journal");
        let config = ServerConfig {
            admin: admin(),
            journal_path: Some(journal.clone()),
            ..ServerConfig::default()
        };

        let router = LrlServer::new(config.clone()).router().unwrap();
        register(&router, &addr(1)).await;
        drop(router);

        let reopened = LrlServer::new(config).router().unwrap();
        let (status, body) = send(&reopened, get("/v1/properties")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
