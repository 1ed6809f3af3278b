//! Serenity implementation of the messaging gateway.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use serenity::{
    all::{
        ChannelId, ChannelType, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage,
        EmojiId, GuildId, MessageId, ReactionType, UserId,
    },
    http::{Http, HttpError},
};

use crate::{
    error::gateway::GatewayError,
    model::{
        catalog::ReactionSymbol,
        discord::{ChannelRef, MessageRef},
        document::DisplayDocument,
    },
    service::gateway::MessagingGateway,
};

const NOT_FOUND: u16 = 404;

/// Talks to Discord through serenity's HTTP client.
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn build_embed(document: &DisplayDocument) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title(&document.title);

    if let Some(description) = &document.description {
        embed = embed.description(description);
    }
    for field in &document.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &document.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

fn reaction_type(symbol: &ReactionSymbol) -> Result<ReactionType, GatewayError> {
    match symbol {
        ReactionSymbol::Custom { id, name } => Ok(ReactionType::Custom {
            animated: false,
            id: EmojiId::new(*id),
            name: Some(name.clone()),
        }),
        ReactionSymbol::Unresolved(name) => Err(GatewayError::UnresolvedSymbol(name.clone())),
    }
}

fn is_not_found(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == NOT_FOUND
    )
}

#[async_trait]
impl MessagingGateway for SerenityGateway {
    async fn send_document(
        &self,
        channel: ChannelRef,
        document: &DisplayDocument,
    ) -> Result<MessageRef, GatewayError> {
        let message = ChannelId::new(channel.channel_id)
            .send_message(&self.http, CreateMessage::new().embed(build_embed(document)))
            .await?;

        Ok(MessageRef::new(channel, message.id.get()))
    }

    async fn update_document(
        &self,
        message: MessageRef,
        document: &DisplayDocument,
    ) -> Result<(), GatewayError> {
        let edit = EditMessage::new().embed(build_embed(document));

        self.http
            .edit_message(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
                &edit,
                vec![],
            )
            .await?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError> {
        self.http
            .delete_message(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
                None,
            )
            .await?;

        Ok(())
    }

    async fn add_reaction(
        &self,
        message: MessageRef,
        symbol: &ReactionSymbol,
    ) -> Result<(), GatewayError> {
        let reaction = reaction_type(symbol)?;

        self.http
            .create_reaction(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
                &reaction,
            )
            .await?;

        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageRef,
        symbol: &ReactionSymbol,
        user_id: u64,
    ) -> Result<(), GatewayError> {
        let reaction = reaction_type(symbol)?;

        self.http
            .delete_reaction(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
                UserId::new(user_id),
                &reaction,
            )
            .await?;

        Ok(())
    }

    async fn resolve_channel_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<ChannelRef>, GatewayError> {
        let mut channels: Vec<_> = self
            .http
            .get_channels(GuildId::new(guild_id))
            .await?
            .into_iter()
            .filter(|channel| channel.kind == ChannelType::Text)
            .filter(|channel| channel.name.eq_ignore_ascii_case(name))
            .collect();
        channels.sort_by_key(|channel| channel.position);

        Ok(channels.first().map(|channel| ChannelRef {
            guild_id,
            channel_id: channel.id.get(),
        }))
    }

    async fn resolve_message(&self, message: MessageRef) -> Result<bool, GatewayError> {
        match self
            .http
            .get_message(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
            )
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn send_direct_message(&self, user_id: u64, text: &str) -> Result<(), GatewayError> {
        let channel = UserId::new(user_id).create_dm_channel(&self.http).await?;
        channel
            .id
            .send_message(&self.http, CreateMessage::new().content(text))
            .await?;

        Ok(())
    }

    async fn member_role_names(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<String>, GatewayError> {
        let guild_id = GuildId::new(guild_id);
        let member = self.http.get_member(guild_id, UserId::new(user_id)).await?;
        let roles = self.http.get_guild_roles(guild_id).await?;

        Ok(roles
            .into_iter()
            .filter(|role| member.roles.contains(&role.id))
            .map(|role| role.name)
            .collect())
    }

    async fn registered_emoji_ids(&self) -> Result<HashSet<u64>, GatewayError> {
        let mut ids = HashSet::new();

        for guild in self.http.get_guilds(None, None).await? {
            match self.http.get_emojis(guild.id).await {
                Ok(emojis) => ids.extend(emojis.into_iter().map(|emoji| emoji.id.get())),
                Err(e) => tracing::warn!("Failed to list emojis of guild {}: {}", guild.id, e),
            }
        }

        Ok(ids)
    }
}
