// Action names recorded in app logs and group audits.
pub const USER_REGISTERED: &str = "USER_REGISTERED";
pub const USER_LOGGED_IN: &str = "USER_LOGGED_IN";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_UPDATED: &str = "GROUP_UPDATED";
pub const GROUP_DELETED: &str = "GROUP_DELETED";
pub const PARTICIPANT_ADDED: &str = "PARTICIPANT_ADDED";
pub const PARTICIPANT_REMOVED: &str = "PARTICIPANT_REMOVED";
pub const ITEM_ADDED: &str = "ITEM_ADDED";
pub const ITEM_UPDATED: &str = "ITEM_UPDATED";
pub const ITEM_REMOVED: &str = "ITEM_REMOVED";
pub const SUMMARY_QUERIED: &str = "SUMMARY_QUERIED";

/// Upper bound accepted for a unit price.
pub const MAX_ITEM_PRICE: f64 = 1_000_000.0;

/// Maximum length for names, locations and other short text fields.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for an item description.
pub const MAX_ITEM_NAME_LENGTH: usize = 255;
