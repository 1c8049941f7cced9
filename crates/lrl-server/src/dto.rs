use lrl_docstore::DocumentRef;
use lrl_types::{Address, PropertyId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterPropertyRequest {
    pub property_number: String,
    pub location: String,
    pub document_ref: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub new_owner: Address,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub property_id: PropertyId,
    pub narrative: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentUploadResponse {
    pub document_ref: DocumentRef,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok" }
    }
}
