use serenity::all::{Context, GuildId, Message, RoleId, UserId};

use crate::service::{
    command::{self, Command},
    conversation::ConversationEngine,
};

/// Handles a message in a guild channel or a direct message.
///
/// Direct messages feed the author's active conversation. Guild messages are only looked
/// at when they are a command; the command message is deleted once it has been handled.
pub async fn handle_message(engine: &ConversationEngine, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }
    let user_id = message.author.id.get();

    let Some(guild_id) = message.guild_id else {
        if !engine.handle_message(user_id, &message.content).await {
            tracing::debug!("Ignoring direct message from {} without a conversation", user_id);
        }
        return;
    };

    let Some(command) = Command::parse(&message.content) else {
        return;
    };

    if command.requires_manage() {
        match can_manage_guild(&ctx, guild_id, message.author.id).await {
            Ok(true) => {}
            Ok(false) => {
                crate::service::conversation::reply(
                    engine.state(),
                    user_id,
                    "You need the Manage Server permission to use this command.",
                )
                .await;
                return;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to check permissions of {} in guild {}: {}",
                    user_id,
                    guild_id,
                    e
                );
                return;
            }
        }
    }

    command::execute(engine, command, guild_id.get(), user_id).await;

    if let Err(e) = message.delete(&ctx.http).await {
        tracing::debug!("Could not delete command message {}: {}", message.id, e);
    }
}

/// Whether the user owns the guild or has a role granting Manage Server.
async fn can_manage_guild(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
) -> Result<bool, serenity::Error> {
    let guild = ctx.http.get_guild(guild_id).await?;
    if guild.owner_id == user_id {
        return Ok(true);
    }

    let member = ctx.http.get_member(guild_id, user_id).await?;
    let everyone = RoleId::new(guild_id.get());

    Ok(member
        .roles
        .iter()
        .chain(std::iter::once(&everyone))
        .filter_map(|role_id| guild.roles.get(role_id))
        .any(|role| role.permissions.manage_guild() || role.permissions.administrator()))
}
