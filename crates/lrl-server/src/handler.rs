use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde_json::json;

use lrl_docstore::DocumentRef;
use lrl_registry::RegistryStats;
use lrl_types::{Address, KycProfile, Property, PropertyId, TransactionRecord, TxRef};

use crate::dto::{
    AdvisoryResponse, DocumentUploadResponse, HealthResponse, RegisterPropertyRequest,
    TransferRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated wallet address of the caller.
pub const CALLER_HEADER: &str = "x-caller-address";

fn caller(headers: &HeaderMap) -> Result<Address, ApiError> {
    let value = headers
        .get(CALLER_HEADER)
        .ok_or_else(|| ApiError::invalid_caller(format!("missing {CALLER_HEADER} header")))?;
    let raw = value
        .to_str()
        .map_err(|_| ApiError::invalid_caller("caller header is not valid UTF-8"))?;
    Address::from_hex(raw).map_err(|e| ApiError::invalid_caller(e.to_string()))
}

// ---- service endpoints ----

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "lrl-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- registry: writes ----

pub async fn register_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterPropertyRequest>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let caller = caller(&headers)?;
    let property = state.registry.register_property(
        caller,
        &request.property_number,
        &request.location,
        &request.document_ref,
    )?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn verify_property(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<Property>, ApiError> {
    let caller = caller(&headers)?;
    let property = state
        .registry
        .verify_property(caller, PropertyId::new(id))?;
    Ok(Json(property))
}

pub async fn transfer_ownership(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransactionRecord>, ApiError> {
    let caller = caller(&headers)?;
    let record =
        state
            .registry
            .transfer_ownership(caller, PropertyId::new(id), request.new_owner)?;
    Ok(Json(record))
}

// ---- registry: reads ----

pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, ApiError> {
    Ok(Json(state.registry.all_properties()?))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Property>, ApiError> {
    Ok(Json(state.registry.property(PropertyId::new(id))?))
}

pub async fn property_history(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    Ok(Json(
        state.registry.transaction_history_for(PropertyId::new(id))?,
    ))
}

pub async fn all_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    Ok(Json(state.registry.transaction_history()?))
}

pub async fn transaction_by_ref(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<TransactionRecord>, ApiError> {
    let tx_ref = TxRef::from_hex(&reference)
        .map_err(|e| ApiError::bad_request("MALFORMED_TX_REF", e.to_string()))?;
    state
        .registry
        .transaction_by_ref(&tx_ref)?
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found("TRANSACTION_NOT_FOUND", format!("no transfer {tx_ref}"))
        })
}

pub async fn owner_properties(
    State(state): State<AppState>,
    Path(address): Path<Address>,
) -> Result<Json<Vec<Property>>, ApiError> {
    Ok(Json(state.registry.properties_owned_by(&address)?))
}

pub async fn address_transactions(
    State(state): State<AppState>,
    Path(address): Path<Address>,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    Ok(Json(state.registry.transactions_for_address(&address)?))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<RegistryStats>, ApiError> {
    Ok(Json(state.registry.stats()?))
}

// ---- advisory ----

/// Best-effort narrative over a property's history. The summarizer stack
/// cannot fail a read: history is fetched first, and the advisory layer
/// falls back internally.
pub async fn property_advisory(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    let property_id = PropertyId::new(id);
    let history = state.registry.transaction_history_for(property_id)?;
    let narrative = state
        .advisory
        .summarize(property_id, &history)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(property = %property_id, error = %e, "advisory unavailable");
            "Advisory unavailable; raw history served without narrative.".to_string()
        });
    Ok(Json(AdvisoryResponse {
        property_id,
        narrative,
    }))
}

// ---- profiles ----

pub async fn get_profile(
    State(state): State<AppState>,
    Path(address): Path<Address>,
) -> Result<Json<KycProfile>, ApiError> {
    state
        .profiles
        .get(&address)?
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found("PROFILE_NOT_FOUND", format!("no profile for {address}"))
        })
}

pub async fn put_profile(
    State(state): State<AppState>,
    Path(address): Path<Address>,
    Json(profile): Json<KycProfile>,
) -> Result<Json<KycProfile>, ApiError> {
    state.profiles.upsert(&address, profile.clone())?;
    Ok(Json(profile))
}

// ---- documents ----

pub async fn upload_document(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DocumentUploadResponse>), ApiError> {
    let document_ref = state.documents.put(&body)?;
    Ok((
        StatusCode::CREATED,
        Json(DocumentUploadResponse { document_ref }),
    ))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Vec<u8>, ApiError> {
    let reference = DocumentRef::parse(&reference)?;
    state.documents.resolve(&reference)?.ok_or_else(|| {
        ApiError::not_found("DOCUMENT_NOT_FOUND", format!("no document {reference}"))
    })
}
