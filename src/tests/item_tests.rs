use crate::core::errors::FimdefestaError;
use crate::core::models::item::Item;
use crate::tests::{create_test_service, register_test_user};
use chrono::Utc;

use crate::core::models::{group::Group, user::User};
use crate::core::services::FimdefestaService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

async fn group_with_roster(
    service: &FimdefestaService<InMemoryLogging, InMemoryStorage>,
    user: &User,
    names: &[&str],
) -> Group {
    service
        .create_group(
            "Almoço".to_string(),
            Utc::now(),
            None,
            names.iter().map(|n| n.to_string()).collect(),
            user,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_equal_split_item_mirrors_roster() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana", "Bruno", "Carla"]).await;

    let item = service
        .add_item(&group.id, "Pizza".to_string(), 50.0, 1, true, vec![], &user)
        .await
        .unwrap();

    let roster_ids: Vec<String> = group.participants.iter().map(|p| p.id.clone()).collect();
    assert_eq!(item.participants, roster_ids);
    assert!(item.split_equally);
}

#[tokio::test]
async fn test_zero_quantity_coerced_to_one() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana"]).await;

    let item = service
        .add_item(&group.id, "Café".to_string(), 5.0, 0, true, vec![], &user)
        .await
        .unwrap();
    assert_eq!(item.quantity, 1);
    assert!((item.line_total() - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_price_validation() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana"]).await;

    let result = service
        .add_item(&group.id, "Pizza".to_string(), -1.0, 1, true, vec![], &user)
        .await;
    assert!(matches!(result, Err(FimdefestaError::InvalidInput(_, _))));

    let result = service
        .add_item(&group.id, "Pizza".to_string(), f64::NAN, 1, true, vec![], &user)
        .await;
    assert!(matches!(result, Err(FimdefestaError::InvalidInput(_, _))));

    let result = service
        .add_item(&group.id, "Pizza".to_string(), 10.999, 1, true, vec![], &user)
        .await;
    assert!(matches!(result, Err(FimdefestaError::InvalidInput(_, _))));

    // Two decimals and a free item are both fine.
    service
        .add_item(&group.id, "Pizza".to_string(), 10.99, 1, true, vec![], &user)
        .await
        .unwrap();
    service
        .add_item(&group.id, "Cortesia".to_string(), 0.0, 1, true, vec![], &user)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_custom_split_requires_participants() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana", "Bruno"]).await;

    let result = service
        .add_item(&group.id, "Refrigerante".to_string(), 10.0, 2, false, vec![], &user)
        .await;
    assert!(matches!(result, Err(FimdefestaError::EmptySplitParticipants)));

    let result = service
        .add_item(
            &group.id,
            "Refrigerante".to_string(),
            10.0,
            2,
            false,
            vec!["not-a-participant".to_string()],
            &user,
        )
        .await;
    assert!(matches!(result, Err(FimdefestaError::UnknownSplitParticipant(_))));
}

#[tokio::test]
async fn test_custom_split_deduplicates_subset() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana", "Bruno"]).await;
    let ana = group.participants[0].id.clone();

    let item = service
        .add_item(
            &group.id,
            "Refrigerante".to_string(),
            10.0,
            1,
            false,
            vec![ana.clone(), ana.clone()],
            &user,
        )
        .await
        .unwrap();
    assert_eq!(item.participants, vec![ana]);
}

#[tokio::test]
async fn test_update_item() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana", "Bruno"]).await;
    let ana = group.participants[0].id.clone();

    let item = service
        .add_item(&group.id, "Pizza".to_string(), 50.0, 1, true, vec![], &user)
        .await
        .unwrap();

    let updated = service
        .update_item(
            &group.id,
            Item {
                split_equally: false,
                participants: vec![ana.clone()],
                price: 45.0,
                ..item.clone()
            },
            &user,
        )
        .await
        .unwrap();
    assert!(!updated.split_equally);
    assert_eq!(updated.participants, vec![ana]);

    let group = service.get_group(&group.id, &user).await.unwrap();
    assert!((group.items[0].price - 45.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_update_unknown_item() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana"]).await;

    let result = service
        .update_item(
            &group.id,
            Item {
                id: "missing".to_string(),
                name: "Pizza".to_string(),
                price: 50.0,
                quantity: 1,
                split_equally: true,
                participants: vec![],
            },
            &user,
        )
        .await;
    assert!(matches!(result, Err(FimdefestaError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_remove_item() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana"]).await;

    let item = service
        .add_item(&group.id, "Pizza".to_string(), 50.0, 1, true, vec![], &user)
        .await
        .unwrap();
    service.remove_item(&group.id, &item.id, &user).await.unwrap();

    let group = service.get_group(&group.id, &user).await.unwrap();
    assert!(group.items.is_empty());

    let result = service.remove_item(&group.id, &item.id, &user).await;
    assert!(matches!(result, Err(FimdefestaError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_new_participant_joins_equal_split_items() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let group = group_with_roster(&service, &user, &["Ana"]).await;

    service
        .add_item(&group.id, "Pizza".to_string(), 50.0, 1, true, vec![], &user)
        .await
        .unwrap();
    let carla = service.add_participant(&group.id, "Carla".to_string(), &user).await.unwrap();

    let group = service.get_group(&group.id, &user).await.unwrap();
    assert!(group.items[0].participants.contains(&carla.id));
}
