use crate::constants::{GROUP_CREATED, PARTICIPANT_REMOVED};
use crate::core::errors::FimdefestaError;
use crate::tests::{create_test_service, register_test_user};
use chrono::Utc;

#[tokio::test]
async fn test_create_group() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let group = service
        .create_group(
            "Almoço na Cantina".to_string(),
            Utc::now(),
            Some("Cantina do João".to_string()),
            vec!["Demo User".to_string(), "Carlos".to_string(), "Renata".to_string()],
            &user,
        )
        .await
        .unwrap();

    assert_eq!(group.name, "Almoço na Cantina");
    assert_eq!(group.created_by, user.id);
    assert_eq!(group.participants.len(), 3);
    assert_eq!(group.participants[1].name, "Carlos");
    assert!(group.items.is_empty());

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 2); // registration + group creation
    assert_eq!(logs[1].action, GROUP_CREATED);

    let audits = service.get_group_audits(&group.id, &user).await.unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, GROUP_CREATED);
}

#[tokio::test]
async fn test_create_group_requires_participants() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let result = service
        .create_group("Churrasco".to_string(), Utc::now(), None, vec![], &user)
        .await;
    assert!(matches!(result, Err(FimdefestaError::NoParticipants)));
}

#[tokio::test]
async fn test_duplicate_participant_names_rejected() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let result = service
        .create_group(
            "Churrasco".to_string(),
            Utc::now(),
            None,
            vec!["Ana".to_string(), "ana".to_string()],
            &user,
        )
        .await;
    assert!(matches!(result, Err(FimdefestaError::ParticipantNameTaken(_))));

    let group = service
        .create_group(
            "Churrasco".to_string(),
            Utc::now(),
            None,
            vec!["Ana".to_string()],
            &user,
        )
        .await
        .unwrap();
    let result = service.add_participant(&group.id, "ANA".to_string(), &user).await;
    assert!(matches!(result, Err(FimdefestaError::ParticipantNameTaken(_))));
}

#[tokio::test]
async fn test_only_creator_can_access_group() {
    let service = create_test_service();
    let creator = register_test_user(&service, "Demo User", "demo@example.com").await;
    let intruder = register_test_user(&service, "Intruder", "intruder@example.com").await;

    let group = service
        .create_group(
            "Jantar".to_string(),
            Utc::now(),
            None,
            vec!["Demo User".to_string()],
            &creator,
        )
        .await
        .unwrap();

    let result = service.get_group(&group.id, &intruder).await;
    assert!(matches!(result, Err(FimdefestaError::NotGroupCreator(_))));

    let result = service.delete_group(&group.id, &intruder).await;
    assert!(matches!(result, Err(FimdefestaError::NotGroupCreator(_))));
}

#[tokio::test]
async fn test_update_group() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let group = service
        .create_group(
            "Jantar".to_string(),
            Utc::now(),
            None,
            vec!["Demo User".to_string()],
            &user,
        )
        .await
        .unwrap();

    let updated = service
        .update_group(
            &group.id,
            Some("Jantar de Sexta".to_string()),
            None,
            Some("Bar da Esquina".to_string()),
            &user,
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Jantar de Sexta");
    assert_eq!(updated.location.as_deref(), Some("Bar da Esquina"));
    assert_eq!(updated.date, group.date);
}

#[tokio::test]
async fn test_delete_group() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let group = service
        .create_group(
            "Jantar".to_string(),
            Utc::now(),
            None,
            vec!["Demo User".to_string()],
            &user,
        )
        .await
        .unwrap();

    service.delete_group(&group.id, &user).await.unwrap();
    let result = service.get_group(&group.id, &user).await;
    assert!(matches!(result, Err(FimdefestaError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_list_user_groups() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;
    let other = register_test_user(&service, "Other", "other@example.com").await;

    service
        .create_group(
            "Almoço".to_string(),
            Utc::now(),
            None,
            vec!["Demo User".to_string()],
            &user,
        )
        .await
        .unwrap();
    service
        .create_group(
            "Jantar".to_string(),
            Utc::now(),
            None,
            vec!["Other".to_string()],
            &other,
        )
        .await
        .unwrap();

    let groups = service.get_user_groups(&user).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Almoço");
}

#[tokio::test]
async fn test_remove_participant_cascades_into_items() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let group = service
        .create_group(
            "Almoço".to_string(),
            Utc::now(),
            None,
            vec!["Ana".to_string(), "Bruno".to_string()],
            &user,
        )
        .await
        .unwrap();
    let ana = group.participants[0].clone();
    let bruno = group.participants[1].clone();

    service
        .add_item(
            &group.id,
            "Sobremesa".to_string(),
            12.0,
            1,
            false,
            vec![ana.id.clone(), bruno.id.clone()],
            &user,
        )
        .await
        .unwrap();

    service.remove_participant(&group.id, &bruno.id, &user).await.unwrap();

    let group = service.get_group(&group.id, &user).await.unwrap();
    assert_eq!(group.participants.len(), 1);
    assert_eq!(group.items[0].participants, vec![ana.id.clone()]);

    // Cascade can empty a subset entirely; the group still loads fine.
    service.remove_participant(&group.id, &ana.id, &user).await.unwrap();
    let group = service.get_group(&group.id, &user).await.unwrap();
    assert!(group.participants.is_empty());
    assert!(group.items[0].participants.is_empty());

    let audits = service.get_group_audits(&group.id, &user).await.unwrap();
    assert_eq!(
        audits.iter().filter(|a| a.action == PARTICIPANT_REMOVED).count(),
        2
    );
}

#[tokio::test]
async fn test_remove_unknown_participant() {
    let service = create_test_service();
    let user = register_test_user(&service, "Demo User", "demo@example.com").await;

    let group = service
        .create_group(
            "Almoço".to_string(),
            Utc::now(),
            None,
            vec!["Ana".to_string()],
            &user,
        )
        .await
        .unwrap();

    let result = service.remove_participant(&group.id, "missing", &user).await;
    assert!(matches!(result, Err(FimdefestaError::ParticipantNotFound(_))));
}
