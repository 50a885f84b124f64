use crate::core::errors::FimdefestaError;
use crate::core::models::{audit::GroupAudit, group::Group, user::User};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    users: Mutex<HashMap<String, User>>,
    emails: Mutex<HashMap<String, String>>, // email -> user_id
    groups: Mutex<HashMap<String, Group>>,
    group_audits: Mutex<HashMap<String, Vec<GroupAudit>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Mutex::new(HashMap::new()),
            emails: Mutex::new(HashMap::new()),
            groups: Mutex::new(HashMap::new()),
            group_audits: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user_if_not_exists(&self, user: User) -> Result<User, FimdefestaError> {
        let mut emails = self.emails.lock().await;
        if emails.contains_key(&user.email) {
            return Err(FimdefestaError::EmailAlreadyRegistered(user.email));
        }
        emails.insert(user.email.clone(), user.id.clone());
        let mut users = self.users.lock().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FimdefestaError> {
        Ok(self.users.lock().await.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, FimdefestaError> {
        // For production: Use database index on email
        let user_id = self.emails.lock().await.get(email).cloned();
        Ok(match user_id {
            Some(id) => self.users.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn save_group(&self, group: Group) -> Result<(), FimdefestaError> {
        self.groups.lock().await.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, FimdefestaError> {
        Ok(self.groups.lock().await.get(group_id).cloned())
    }

    async fn delete_group(&self, group_id: &str) -> Result<(), FimdefestaError> {
        self.groups.lock().await.remove(group_id);
        self.group_audits.lock().await.remove(group_id);
        Ok(())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, FimdefestaError> {
        // For production: Use database query with index
        let mut groups: Vec<Group> = self
            .groups
            .lock()
            .await
            .values()
            .filter(|g| g.created_by == user_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(groups)
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), FimdefestaError> {
        let mut audits = self.group_audits.lock().await;
        audits.entry(audit.group_id.clone()).or_insert_with(Vec::new).push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, FimdefestaError> {
        // For production: Add pagination
        Ok(self
            .group_audits
            .lock()
            .await
            .get(group_id)
            .cloned()
            .unwrap_or_default())
    }
}
