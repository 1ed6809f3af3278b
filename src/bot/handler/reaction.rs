use serenity::all::{Context, Reaction, ReactionType};

use crate::{
    model::discord::MessageRef,
    service::{
        conversation::ConversationEngine,
        reaction::{handle_reaction, ReactionEvent},
    },
};

/// Handles a reaction added in a guild channel.
pub async fn handle_reaction_add(engine: &ConversationEngine, ctx: Context, reaction: Reaction) {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };
    if user_id == ctx.cache.current_user().id {
        return;
    }

    let emoji_id = match &reaction.emoji {
        ReactionType::Custom { id, .. } => Some(id.get()),
        _ => None,
    };

    let user_name = match &reaction.member {
        Some(member) => member.display_name().to_string(),
        None => match user_id.to_user(&ctx.http).await {
            Ok(user) => user.name,
            Err(e) => {
                tracing::warn!("Failed to fetch user {}: {}", user_id, e);
                format!("User {}", user_id)
            }
        },
    };

    let event = ReactionEvent {
        message: MessageRef {
            guild_id: guild_id.get(),
            channel_id: reaction.channel_id.get(),
            message_id: reaction.message_id.get(),
        },
        user_id: user_id.get(),
        user_name,
        emoji_id,
    };

    handle_reaction(engine, event).await;
}
