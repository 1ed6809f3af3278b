use std::sync::Arc;

use sea_orm::{DbErr, EntityTrait, PaginatorTrait};

use crate::{
    model::raid::RaidRole,
    service::{
        conversation::{
            ConversationEngine, CreationFlow, DeselectionFlow, EditFlow,
            FlowKind, RaidDraft, SelectionFlow, Session, APOLOGY,
        },
        lock::LockScope,
    },
    test_support::test_state,
};

use super::{insert_raid, send_all, GUILD_ID, LEADER_ID};

/// Tests that a message without an active session is not consumed.
///
/// Expected: false, nothing sent
#[tokio::test]
async fn message_without_session_is_ignored() {
    let (state, gateway) = test_state().await;
    let engine = ConversationEngine::new(state);

    assert!(!engine.handle_message(LEADER_ID, "hello").await);
    assert!(gateway.state().direct_messages.is_empty());
    assert_eq!(engine.tracked_users(), 0);
}

/// Tests cancelling an event creation.
///
/// Expected: exactly one cancel notice, session removed, no event stored
#[tokio::test]
async fn cancel_ends_creation() -> Result<(), DbErr> {
    let (state, gateway) = test_state().await;
    let draft = RaidDraft::load(&state, GUILD_ID, LEADER_ID).await.unwrap();
    let engine = ConversationEngine::new(state);

    engine
        .start(LEADER_ID, Session::Creation(CreationFlow::new(draft)))
        .await
        .unwrap();
    send_all(&engine, LEADER_ID, &["Weekly Clear", "CANCEL"]).await;

    let notices: Vec<_> = gateway
        .messages_to(LEADER_ID)
        .into_iter()
        .filter(|m| m == "Event creation has been cancelled.")
        .collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(engine.active_kind(LEADER_ID).await, None);
    assert_eq!(engine.tracked_users(), 0);
    assert_eq!(
        entity::prelude::Raid::find().count(&engine.state().db).await?,
        0
    );

    Ok(())
}

/// Tests starting a second conversation while one is active.
///
/// Expected: Err with the active kind, busy message sent, new session's edit lock released
#[tokio::test]
async fn busy_user_cannot_start_second_flow() {
    let (state, gateway) = test_state().await;
    let raid = insert_raid(&state, 77, vec![RaidRole::new(2, "Tank")]).await;
    let draft = RaidDraft::load(&state, GUILD_ID, LEADER_ID).await.unwrap();
    let engine = ConversationEngine::new(state.clone());

    engine
        .start(LEADER_ID, Session::Creation(CreationFlow::new(draft)))
        .await
        .unwrap();

    assert!(state.locks.try_acquire(LockScope::Raid, raid.id));
    let result = engine
        .start(LEADER_ID, Session::Edit(EditFlow::new(&raid)))
        .await;

    assert_eq!(result, Err(FlowKind::Creation));
    assert!(!state.locks.is_held(LockScope::Raid, raid.id));
    assert_eq!(
        gateway.messages_to(LEADER_ID).last().unwrap(),
        "You are already creating an event. Finish it or type cancel first."
    );
    assert_eq!(engine.active_kind(LEADER_ID).await, Some(FlowKind::Creation));
}

/// Tests offering a conversation to a user who is already busy.
///
/// Expected: the running session stays, exactly one hint is sent
#[tokio::test]
async fn begin_keeps_running_session() {
    let (state, gateway) = test_state().await;
    let raid = insert_raid(&state, 77, vec![RaidRole::new(2, "Tank")]).await;
    let draft = RaidDraft::load(&state, GUILD_ID, LEADER_ID).await.unwrap();
    let engine = ConversationEngine::new(state.clone());

    engine
        .begin(LEADER_ID, Session::Creation(CreationFlow::new(draft)))
        .await;
    let sent = gateway.messages_to(LEADER_ID).len();

    engine
        .begin(LEADER_ID, Session::Deselection(DeselectionFlow::new(&raid)))
        .await;

    assert_eq!(engine.active_kind(LEADER_ID).await, Some(FlowKind::Creation));
    assert_eq!(gateway.messages_to(LEADER_ID).len(), sent + 1);
}

/// Tests a step whose raid disappeared mid-conversation.
///
/// Expected: apology sent and the session removed
#[tokio::test]
async fn missing_raid_ends_with_apology() {
    let (state, gateway) = test_state().await;
    let raid = insert_raid(&state, 77, vec![RaidRole::new(2, "Tank")]).await;
    let engine = ConversationEngine::new(state.clone());

    engine
        .start(
            7,
            Session::RoleSelection(SelectionFlow::for_class(&raid, "Seven", "Guardian")),
        )
        .await
        .unwrap();
    send_all(&engine, 7, &["1"]).await;

    assert!(state.roster.delete(raid.id, false).await);
    send_all(&engine, 7, &["Tank"]).await;

    assert_eq!(gateway.messages_to(7).last().unwrap(), APOLOGY);
    assert_eq!(engine.active_kind(7).await, None);
}

/// Tests that deselection cannot be cancelled.
///
/// Expected: "cancel" is treated as invalid input, "yes" removes the participant
#[tokio::test]
async fn deselection_ignores_cancel() {
    let (state, gateway) = test_state().await;
    let raid = insert_raid(&state, 77, vec![RaidRole::new(2, "Tank")]).await;
    state
        .roster
        .sign_up(raid.id, 7, "Seven", "Guardian", "Tank", false)
        .await
        .unwrap();
    let engine = ConversationEngine::new(state.clone());

    engine
        .start(7, Session::Deselection(DeselectionFlow::new(&raid)))
        .await
        .unwrap();
    send_all(&engine, 7, &["cancel"]).await;

    assert_eq!(gateway.messages_to(7).last().unwrap(), "Please answer yes or no.");
    assert_eq!(engine.active_kind(7).await, Some(FlowKind::Deselection));

    send_all(&engine, 7, &["yes"]).await;

    assert_eq!(
        gateway.messages_to(7).last().unwrap(),
        "You are no longer signed up for Weekly Clear."
    );
    assert!(state.roster.get(raid.id).await.unwrap().participant(7).is_none());
    assert_eq!(engine.tracked_users(), 0);
}

/// Tests that messages of the same user are handled one at a time.
///
/// Expected: the second message sees the step installed by the first and completes the sign-up
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_user_messages_are_serialized() {
    let (state, _gateway) = test_state().await;
    let raid = insert_raid(&state, 77, vec![RaidRole::new(2, "Tank")]).await;
    let engine = Arc::new(ConversationEngine::new(state.clone()));

    engine
        .start(
            7,
            Session::RoleSelection(SelectionFlow::for_class(&raid, "Seven", "Guardian")),
        )
        .await
        .unwrap();

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.handle_message(7, "1").await }
    });
    let second = tokio::spawn({
        let engine = engine.clone();
        async move { engine.handle_message(7, "1").await }
    });
    assert!(first.await.unwrap());
    assert!(second.await.unwrap());

    let raid = state.roster.get(raid.id).await.unwrap();
    let participant = raid.participant(7).unwrap();
    assert_eq!(participant.spec, "Guardian");
    assert_eq!(participant.role, "Tank");
    assert_eq!(engine.active_kind(7).await, None);
}
