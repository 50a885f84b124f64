use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A name on the bill. Participants belong to a single group and are not
/// accounts; the group creator types them in.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
