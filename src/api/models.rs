use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::FimdefestaError;
use crate::core::models::user::User;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    #[schema(value_type = String, example = "2026-08-07T20:30:00Z")]
    pub date: chrono::DateTime<chrono::Utc>,
    pub location: Option<String>,
    pub participant_names: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, example = "2026-08-07T20:30:00Z")]
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub location: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveParticipantRequest {
    pub participant_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub name: String,
    pub price: f64,
    /// Defaults to 1 when omitted; 0 is coerced to 1.
    pub quantity: Option<u32>,
    pub split_equally: bool,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: Option<u32>,
    pub split_equally: bool,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveItemRequest {
    pub item_id: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for FimdefestaError to implement IntoResponse
pub struct ApiError(pub FimdefestaError);

impl From<FimdefestaError> for ApiError {
    fn from(err: FimdefestaError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self.0 {
            FimdefestaError::MissingEmail => (StatusCode::BAD_REQUEST, "Email is required".to_string()),
            FimdefestaError::InvalidEmail(email) => (StatusCode::BAD_REQUEST, format!("Invalid email: {}", email)),
            FimdefestaError::EmailAlreadyRegistered(email) => {
                (StatusCode::CONFLICT, format!("Email {} already registered", email))
            }
            FimdefestaError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string()),
            FimdefestaError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            FimdefestaError::UserNotFound(id) => (StatusCode::NOT_FOUND, format!("User {} not found", id)),
            FimdefestaError::GroupNotFound(id) => (StatusCode::NOT_FOUND, format!("Group {} not found", id)),
            FimdefestaError::NotGroupCreator(id) => {
                (StatusCode::FORBIDDEN, format!("User {} is not the group creator", id))
            }
            FimdefestaError::NoParticipants => (
                StatusCode::BAD_REQUEST,
                "Group must have at least one participant".to_string(),
            ),
            FimdefestaError::ParticipantNameTaken(name) => {
                (StatusCode::CONFLICT, format!("Participant name {} already taken", name))
            }
            FimdefestaError::ParticipantNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Participant {} not found", id))
            }
            FimdefestaError::ItemNotFound(id) => (StatusCode::NOT_FOUND, format!("Item {} not found", id)),
            FimdefestaError::EmptySplitParticipants => (
                StatusCode::BAD_REQUEST,
                "Custom split requires at least one participant".to_string(),
            ),
            FimdefestaError::UnknownSplitParticipant(id) => (
                StatusCode::BAD_REQUEST,
                format!("Participant {} is not on the group roster", id),
            ),
            FimdefestaError::InvalidInput(field, msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input for {}: {:?}", field, msg),
            ),
            FimdefestaError::NoTotalsAvailable => {
                (StatusCode::NOT_FOUND, "No participant totals available".to_string())
            }
            FimdefestaError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", msg),
            ),
            FimdefestaError::StorageError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", msg)),
            FimdefestaError::LoggingError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Logging error: {}", msg)),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
