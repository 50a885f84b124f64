use crate::auth::jwt::{Claims, JwtService};
use crate::constants::{
    GROUP_CREATED, GROUP_DELETED, GROUP_UPDATED, ITEM_ADDED, ITEM_REMOVED, ITEM_UPDATED, MAX_ITEM_NAME_LENGTH,
    MAX_ITEM_PRICE, MAX_NAME_LENGTH, PARTICIPANT_ADDED, PARTICIPANT_REMOVED, SUMMARY_QUERIED, USER_LOGGED_IN,
    USER_REGISTERED,
};
use crate::core::errors::{FieldError, FimdefestaError};
use crate::core::models::{
    audit::{AppLog, GroupAudit},
    group::Group,
    item::Item,
    participant::Participant,
    user::User,
};
use crate::core::summary::compute_summary;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// One roster entry of the bill summary, in roster order.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct ParticipantTotal {
    pub participant_id: String,
    pub name: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct GroupSummaryResponse {
    group_id: String,
    participant_totals: Vec<ParticipantTotal>,
    grand_total: f64,
    unassigned_total: f64,
}

impl GroupSummaryResponse {
    pub fn participant_totals(&self) -> &Vec<ParticipantTotal> {
        &self.participant_totals
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn unassigned_total(&self) -> f64 {
        self.unassigned_total
    }
}

pub struct FimdefestaService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    jwt_service: JwtService,
}

impl<L: LoggingService, S: Storage> FimdefestaService<L, S> {
    pub fn new(storage: S, logging: L, jwt_secret: String) -> Self {
        FimdefestaService {
            storage,
            logging,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, FimdefestaError> {
        self.jwt_service.validate_token(token)
    }

    async fn validate_group_creator(&self, group_id: &str, user_id: &str) -> Result<Group, FimdefestaError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| FimdefestaError::GroupNotFound(group_id.to_string()))?;
        if group.created_by != user_id {
            return Err(FimdefestaError::NotGroupCreator(user_id.to_string()));
        }
        Ok(group)
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), FimdefestaError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details: log_details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), FimdefestaError> {
        if value.trim().is_empty() {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_price_input(&self, field: &str, price: f64) -> Result<(), FimdefestaError> {
        if !price.is_finite() {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Price".to_string(),
                    description: "Price must be a finite number".to_string(),
                },
            ));
        }
        if price < 0.0 {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Price".to_string(),
                    description: "Price cannot be negative".to_string(),
                },
            ));
        }
        if price > MAX_ITEM_PRICE {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Price Too Large".to_string(),
                    description: "Price cannot exceed 1,000,000".to_string(),
                },
            ));
        }
        let cents = price * 100.0;
        if (cents - cents.round()).abs() > 1e-6 {
            return Err(FimdefestaError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Price".to_string(),
                    description: "Price cannot have more than 2 decimal places".to_string(),
                },
            ));
        }
        Ok(())
    }

    // USERS & MOCK AUTH

    pub async fn register_user(
        &self,
        name: String,
        email: String,
        password: &str,
    ) -> Result<(User, String), FimdefestaError> {
        if email.is_empty() {
            return Err(FimdefestaError::MissingEmail);
        }
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(FimdefestaError::InvalidEmail(email));
        }
        if password.is_empty() {
            return Err(FimdefestaError::InvalidInput(
                "password".to_string(),
                FieldError {
                    field: "password".to_string(),
                    title: "Invalid password".to_string(),
                    description: "Password cannot be empty".to_string(),
                },
            ));
        }
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            avatar_url: None,
        };
        // The password is accepted as-is and never stored; auth is mocked.
        let user = self.storage.create_user_if_not_exists(user).await?;
        let token = self.jwt_service.generate_token(&user.id)?;

        self.log_and_audit(
            None,
            USER_REGISTERED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            Some(user.id.as_str()),
        )
        .await?;

        Ok((user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), FimdefestaError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .ok_or(FimdefestaError::InvalidCredentials)?;

        // Mocked credential check: any non-empty password passes.
        if password.is_empty() {
            return Err(FimdefestaError::InvalidCredentials);
        }

        let token = self.jwt_service.generate_token(&user.id)?;

        self.log_and_audit(
            None,
            USER_LOGGED_IN,
            json!({ "user_id": user.id, "email": user.email }),
            Some(user.id.as_str()),
        )
        .await?;

        Ok((user, token))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, FimdefestaError> {
        self.storage.get_user(user_id).await
    }

    // GROUPS

    pub async fn create_group(
        &self,
        name: String,
        date: DateTime<Utc>,
        location: Option<String>,
        participant_names: Vec<String>,
        created_by: &User,
    ) -> Result<Group, FimdefestaError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        if let Some(ref location) = location {
            self.validate_string_input("location", location, MAX_NAME_LENGTH)?;
        }
        if participant_names.is_empty() {
            return Err(FimdefestaError::NoParticipants);
        }

        let mut participants: Vec<Participant> = Vec::with_capacity(participant_names.len());
        for participant_name in participant_names {
            self.validate_string_input("participant name", &participant_name, MAX_NAME_LENGTH)?;
            if participants
                .iter()
                .any(|p| p.name.to_lowercase() == participant_name.to_lowercase())
            {
                return Err(FimdefestaError::ParticipantNameTaken(participant_name));
            }
            participants.push(Participant {
                id: Uuid::new_v4().to_string(),
                name: participant_name,
                avatar_url: None,
            });
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            date,
            location,
            participants,
            items: Vec::new(),
            created_by: created_by.id.clone(),
        };
        self.storage.save_group(group.clone()).await?;
        info!(group_id = %group.id, "group created");

        self.log_and_audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({
                "group_id": group.id,
                "name": group.name,
                "participant_ids": group.participants.iter().map(|p| p.id.clone()).collect::<Vec<_>>()
            }),
            Some(created_by.id.as_str()),
        )
        .await?;

        Ok(group)
    }

    pub async fn update_group(
        &self,
        group_id: &str,
        new_name: Option<String>,
        new_date: Option<DateTime<Utc>>,
        new_location: Option<String>,
        updated_by: &User,
    ) -> Result<Group, FimdefestaError> {
        let mut group = self.validate_group_creator(group_id, &updated_by.id).await?;

        if let Some(name) = new_name {
            self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
            group.name = name;
        }
        if let Some(date) = new_date {
            group.date = date;
        }
        if let Some(location) = new_location {
            self.validate_string_input("location", &location, MAX_NAME_LENGTH)?;
            group.location = Some(location);
        }
        self.storage.save_group(group.clone()).await?;

        self.log_and_audit(
            Some(group_id),
            GROUP_UPDATED,
            json!({ "group_id": group_id, "name": group.name }),
            Some(updated_by.id.as_str()),
        )
        .await?;

        Ok(group)
    }

    pub async fn delete_group(&self, group_id: &str, deleted_by: &User) -> Result<(), FimdefestaError> {
        let group = self.validate_group_creator(group_id, &deleted_by.id).await?;
        self.storage.delete_group(group_id).await?;
        info!(group_id, "group deleted");

        self.log_and_audit(
            None,
            GROUP_DELETED,
            json!({ "group_id": group_id, "name": group.name }),
            Some(deleted_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn get_group(&self, group_id: &str, queried_by: &User) -> Result<Group, FimdefestaError> {
        self.validate_group_creator(group_id, &queried_by.id).await
    }

    pub async fn get_user_groups(&self, user: &User) -> Result<Vec<Group>, FimdefestaError> {
        self.storage.get_user_groups(&user.id).await
    }

    // PARTICIPANTS

    pub async fn add_participant(
        &self,
        group_id: &str,
        name: String,
        added_by: &User,
    ) -> Result<Participant, FimdefestaError> {
        let mut group = self.validate_group_creator(group_id, &added_by.id).await?;
        self.validate_string_input("participant name", &name, MAX_NAME_LENGTH)?;

        if group.participants.iter().any(|p| p.name.to_lowercase() == name.to_lowercase()) {
            return Err(FimdefestaError::ParticipantNameTaken(name));
        }

        let participant = Participant {
            id: Uuid::new_v4().to_string(),
            name,
            avatar_url: None,
        };
        group.participants.push(participant.clone());
        // Equal-split items mirror the roster in their participant list.
        for item in group.items.iter_mut().filter(|i| i.split_equally) {
            item.participants.push(participant.id.clone());
        }
        self.storage.save_group(group).await?;

        self.log_and_audit(
            Some(group_id),
            PARTICIPANT_ADDED,
            json!({ "group_id": group_id, "participant_id": participant.id, "name": participant.name }),
            Some(added_by.id.as_str()),
        )
        .await?;

        Ok(participant)
    }

    pub async fn remove_participant(
        &self,
        group_id: &str,
        participant_id: &str,
        removed_by: &User,
    ) -> Result<(), FimdefestaError> {
        let mut group = self.validate_group_creator(group_id, &removed_by.id).await?;

        let participant = group
            .participant(participant_id)
            .cloned()
            .ok_or_else(|| FimdefestaError::ParticipantNotFound(participant_id.to_string()))?;

        group.participants.retain(|p| p.id != participant_id);
        // Cascade: the id disappears from every item's subset. A custom-split
        // item can end up with an empty subset here; the engine reports that
        // cost as unassigned instead of failing.
        for item in group.items.iter_mut() {
            item.participants.retain(|id| id != participant_id);
        }
        self.storage.save_group(group).await?;

        self.log_and_audit(
            Some(group_id),
            PARTICIPANT_REMOVED,
            json!({ "group_id": group_id, "participant_id": participant_id, "name": participant.name }),
            Some(removed_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    // ITEMS

    pub async fn add_item(
        &self,
        group_id: &str,
        name: String,
        price: f64,
        quantity: u32,
        split_equally: bool,
        participants: Vec<String>,
        added_by: &User,
    ) -> Result<Item, FimdefestaError> {
        let mut group = self.validate_group_creator(group_id, &added_by.id).await?;

        let item = Item {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            quantity,
            split_equally,
            participants,
        };
        let item = self.normalize_item(&group, item)?;

        group.items.push(item.clone());
        self.storage.save_group(group).await?;

        self.log_and_audit(
            Some(group_id),
            ITEM_ADDED,
            json!({
                "group_id": group_id,
                "item_id": item.id,
                "name": item.name,
                "line_total": item.line_total()
            }),
            Some(added_by.id.as_str()),
        )
        .await?;

        Ok(item)
    }

    pub async fn update_item(&self, group_id: &str, item: Item, updated_by: &User) -> Result<Item, FimdefestaError> {
        let mut group = self.validate_group_creator(group_id, &updated_by.id).await?;

        if !group.items.iter().any(|i| i.id == item.id) {
            return Err(FimdefestaError::ItemNotFound(item.id));
        }
        let item = self.normalize_item(&group, item)?;

        for existing in group.items.iter_mut() {
            if existing.id == item.id {
                *existing = item.clone();
            }
        }
        self.storage.save_group(group).await?;

        self.log_and_audit(
            Some(group_id),
            ITEM_UPDATED,
            json!({ "group_id": group_id, "item_id": item.id, "name": item.name }),
            Some(updated_by.id.as_str()),
        )
        .await?;

        Ok(item)
    }

    pub async fn remove_item(&self, group_id: &str, item_id: &str, removed_by: &User) -> Result<(), FimdefestaError> {
        let mut group = self.validate_group_creator(group_id, &removed_by.id).await?;

        if !group.items.iter().any(|i| i.id == item_id) {
            return Err(FimdefestaError::ItemNotFound(item_id.to_string()));
        }
        group.items.retain(|i| i.id != item_id);
        self.storage.save_group(group).await?;

        self.log_and_audit(
            Some(group_id),
            ITEM_REMOVED,
            json!({ "group_id": group_id, "item_id": item_id }),
            Some(removed_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    /// Applies the input-boundary policy to an item before it is stored:
    /// price shape checks, quantity coerced to at least 1, the subset of an
    /// equal split normalized to the full roster, and a custom split required
    /// to name at least one current participant.
    fn normalize_item(&self, group: &Group, mut item: Item) -> Result<Item, FimdefestaError> {
        self.validate_string_input("name", &item.name, MAX_ITEM_NAME_LENGTH)?;
        self.validate_price_input("price", item.price)?;

        if item.quantity == 0 {
            warn!(item = %item.name, "non-positive quantity coerced to 1");
            item.quantity = 1;
        }

        if item.split_equally {
            item.participants = group.participants.iter().map(|p| p.id.clone()).collect();
        } else {
            let mut seen = HashSet::new();
            item.participants.retain(|id| seen.insert(id.clone()));
            if item.participants.is_empty() {
                return Err(FimdefestaError::EmptySplitParticipants);
            }
            for participant_id in &item.participants {
                if !group.has_participant(participant_id) {
                    return Err(FimdefestaError::UnknownSplitParticipant(participant_id.clone()));
                }
            }
        }
        Ok(item)
    }

    // SUMMARY

    pub async fn get_group_summary(
        &self,
        group_id: &str,
        queried_by: &User,
    ) -> Result<GroupSummaryResponse, FimdefestaError> {
        let group = self.validate_group_creator(group_id, &queried_by.id).await?;

        // Recomputed on every read; nothing is cached or stored.
        let summary = compute_summary(&group);
        let participant_totals = group
            .participants
            .iter()
            .map(|p| ParticipantTotal {
                participant_id: p.id.clone(),
                name: p.name.clone(),
                amount: summary.total_for(&p.id),
            })
            .collect();

        self.log_and_audit(
            Some(group_id),
            SUMMARY_QUERIED,
            json!({ "group_id": group_id, "user_id": queried_by.id }),
            Some(queried_by.id.as_str()),
        )
        .await?;

        Ok(GroupSummaryResponse {
            group_id: group_id.to_string(),
            participant_totals,
            grand_total: summary.grand_total,
            unassigned_total: summary.unassigned_total,
        })
    }

    // AUDIT TRAIL

    pub async fn get_group_audits(&self, group_id: &str, queried_by: &User) -> Result<Vec<GroupAudit>, FimdefestaError> {
        self.validate_group_creator(group_id, &queried_by.id).await?;
        self.storage.get_group_audits(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, FimdefestaError> {
        self.logging.get_logs().await
    }
}
