mod group_tests;
mod item_tests;
mod user_tests;

use crate::core::models::user::User;
use crate::core::services::FimdefestaService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> FimdefestaService<InMemoryLogging, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    FimdefestaService::new(storage, logging, "test-secret".to_string())
}

pub async fn register_test_user(
    service: &FimdefestaService<InMemoryLogging, InMemoryStorage>,
    name: &str,
    email: &str,
) -> User {
    let (user, _token) = service
        .register_user(name.to_string(), email.to_string(), "password")
        .await
        .unwrap();
    user
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
