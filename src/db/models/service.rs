use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use validator::Validate;

/// A priced service offered by a business. Price stays a display string;
/// the backend never does currency math on it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub price: String,
    /// Owner-chosen ordering on the pricing page.
    pub position: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceInput {
    /// Present when re-saving an existing service, keeping its id stable so
    /// appointments that reference it stay valid.
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Service name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Service price is required"))]
    pub price: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServicesPayload {
    #[validate(nested)]
    pub services: Vec<ServiceInput>,
}
