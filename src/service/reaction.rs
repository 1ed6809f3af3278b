//! Reactions on published event messages.
//!
//! Each reaction is mapped to its catalog name and dispatched: class reactions and Flex
//! open a role selection, Swap and Cancel act on an existing sign-up, Edit opens the
//! leader's edit conversation and Check signs up for open world events directly. The
//! user's reaction is removed afterwards so the same reaction can be used again.

use crate::{
    error::{roster::RosterError, AppError},
    model::{
        catalog::{RoleCatalog, CANCEL, CHECK, EDIT, FLEX, SWAP},
        discord::MessageRef,
        raid::Raid,
    },
    service::{
        conversation::{
            reply, ConversationEngine, DeselectionFlow, EditFlow, SelectionFlow, Session,
            SwapFlow,
        },
        lifecycle::RaidLifecycle,
        lock::LockScope,
        settings::SettingsService,
    },
    state::BotState,
};

/// A reaction added by a user to a message in a guild channel.
#[derive(Debug, Clone)]
pub struct ReactionEvent {
    pub message: MessageRef,
    pub user_id: u64,
    /// Display name used for sign-ups.
    pub user_name: String,
    /// Custom emoji id; `None` for unicode emojis.
    pub emoji_id: Option<u64>,
}

/// Handles a reaction.
///
/// # Returns
/// - `true` - The reaction was on an event message and has been handled
/// - `false` - Not an event message or not an event reaction
pub async fn handle_reaction(engine: &ConversationEngine, event: ReactionEvent) -> bool {
    let state = engine.state();

    let Some(raid) = state.roster.get(event.message.message_id).await else {
        return false;
    };
    let Some(name) = event
        .emoji_id
        .and_then(|id| state.catalog.name_for_emoji(id))
        .map(str::to_string)
    else {
        return false;
    };

    if let Err(e) = dispatch(engine, &raid, &event, &name).await {
        tracing::error!(
            "Failed to handle reaction {} of user {} on event {}: {}",
            name,
            event.user_id,
            raid.id,
            e
        );
    }

    let symbol = state.catalog.reaction_for(&name);
    if let Err(e) = state
        .gateway
        .remove_reaction(event.message, &symbol, event.user_id)
        .await
    {
        tracing::warn!("Failed to remove reaction {} on event {}: {}", name, raid.id, e);
    }

    true
}

async fn dispatch(
    engine: &ConversationEngine,
    raid: &Raid,
    event: &ReactionEvent,
    name: &str,
) -> Result<(), AppError> {
    let state = engine.state();
    let user_id = event.user_id;

    match name {
        EDIT => {
            if user_id != raid.leader_id {
                reply(state, user_id, "Only the event leader can edit this event.").await;
            } else if !state.locks.try_acquire(LockScope::Raid, raid.id) {
                reply(state, user_id, "This event is already being edited.").await;
            } else {
                engine.begin(user_id, Session::Edit(EditFlow::new(raid))).await;
            }
        }
        CANCEL => match raid.participant(user_id) {
            Some(_) => {
                engine
                    .begin(user_id, Session::Deselection(DeselectionFlow::new(raid)))
                    .await;
            }
            None => not_signed_up(state, user_id, raid).await,
        },
        SWAP if !raid.is_open_world => match raid.participant(user_id) {
            Some(participant) => {
                engine
                    .begin(user_id, Session::Swap(SwapFlow::new(raid, participant)))
                    .await;
            }
            None => not_signed_up(state, user_id, raid).await,
        },
        CHECK if raid.is_open_world => {
            if permitted(state, raid, user_id).await? {
                check_in(state, raid, event).await?;
            }
        }
        FLEX if !raid.is_open_world => {
            if permitted(state, raid, user_id).await? {
                let flow = SelectionFlow::flex(raid, &event.user_name);
                engine.begin(user_id, Session::RoleSelection(flow)).await;
            }
        }
        _ => {
            let Some(class) = RoleCatalog::class_name(name).filter(|_| !raid.is_open_world)
            else {
                return Ok(());
            };
            if permitted(state, raid, user_id).await? {
                let flow = SelectionFlow::for_class(raid, &event.user_name, class);
                engine.begin(user_id, Session::RoleSelection(flow)).await;
            }
        }
    }

    Ok(())
}

/// Signs up for the first role of an open world event.
async fn check_in(state: &BotState, raid: &Raid, event: &ReactionEvent) -> Result<(), AppError> {
    let Some(role) = raid.roles().iter().find(|role| !role.flex_only) else {
        return Ok(());
    };

    let result = RaidLifecycle::from_state(state)
        .sign_up(
            raid.id,
            event.user_id,
            &event.user_name,
            &role.name,
            &role.name,
            false,
        )
        .await;

    match result {
        Ok(()) => Ok(()),
        Err(RosterError::RoleUnavailable(_)) => {
            reply(state, event.user_id, &format!("{} is already full.", raid.name)).await;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks the raid's role group restriction, telling the user when they are turned away.
async fn permitted(state: &BotState, raid: &Raid, user_id: u64) -> Result<bool, AppError> {
    if raid.permitted_groups.is_empty() {
        return Ok(true);
    }

    let member_roles = state
        .gateway
        .member_role_names(raid.guild_id, user_id)
        .await?;
    let groups = SettingsService::new(&state.db)
        .groups_for_member(raid.guild_id, &member_roles)
        .await?;

    if raid.is_user_permitted(&groups) {
        return Ok(true);
    }

    reply(
        state,
        user_id,
        &format!("You are not allowed to sign up for {}.", raid.name),
    )
    .await;
    Ok(false)
}

async fn not_signed_up(state: &BotState, user_id: u64, raid: &Raid) {
    reply(
        state,
        user_id,
        &format!("You are not signed up for {}.", raid.name),
    )
    .await;
}
