use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum FimdefestaError {
    /// Email field is empty
    #[error("Email is required")]
    MissingEmail,

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Email is already registered
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// Login failed (unknown email or empty password)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token missing, malformed or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Only the group creator may read or change a group
    #[error("User {0} is not the group creator")]
    NotGroupCreator(String),

    /// A group needs at least one participant at creation time
    #[error("Group must have at least one participant")]
    NoParticipants,

    /// A participant with the same name already exists in the group
    #[error("Participant name {0} already taken in this group")]
    ParticipantNameTaken(String),

    /// Participant with given ID not found in the group
    #[error("Participant {0} not found")]
    ParticipantNotFound(String),

    /// Item with given ID not found in the group
    #[error("Item {0} not found")]
    ItemNotFound(String),

    /// A custom split needs at least one participant
    #[error("Custom split requires at least one participant")]
    EmptySplitParticipants,

    /// Split references a participant that is not on the group roster
    #[error("Participant {0} is not on the group roster")]
    UnknownSplitParticipant(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Summary chart requested for a group with nothing to show
    #[error("No participant totals available")]
    NoTotalsAvailable,

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}
