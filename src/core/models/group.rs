use super::item::Item;
use super::participant::Participant;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[schema(value_type = String, example = "2026-08-07T20:30:00Z")]
    pub date: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub participants: Vec<Participant>,
    pub items: Vec<Item>,
    pub created_by: String,
}

impl Group {
    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn has_participant(&self, participant_id: &str) -> bool {
        self.participant(participant_id).is_some()
    }
}
