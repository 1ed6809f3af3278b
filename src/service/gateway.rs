//! Capability boundary to the chat platform.
//!
//! Services only talk to Discord through [`MessagingGateway`]. The production
//! implementation wraps serenity's HTTP client (`bot::gateway::SerenityGateway`); tests
//! use the recording [`mock::MockGateway`].

use std::collections::HashSet;

use async_trait::async_trait;

use crate::{
    error::gateway::GatewayError,
    model::{
        catalog::ReactionSymbol,
        discord::{ChannelRef, MessageRef},
        document::DisplayDocument,
    },
};

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Posts a document to a channel and returns the created message.
    async fn send_document(
        &self,
        channel: ChannelRef,
        document: &DisplayDocument,
    ) -> Result<MessageRef, GatewayError>;

    /// Replaces the content of a posted message.
    async fn update_document(
        &self,
        message: MessageRef,
        document: &DisplayDocument,
    ) -> Result<(), GatewayError>;

    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError>;

    async fn add_reaction(
        &self,
        message: MessageRef,
        symbol: &ReactionSymbol,
    ) -> Result<(), GatewayError>;

    /// Removes one user's reaction from a message.
    async fn remove_reaction(
        &self,
        message: MessageRef,
        symbol: &ReactionSymbol,
        user_id: u64,
    ) -> Result<(), GatewayError>;

    /// Finds a text channel by name, ignoring case. The first channel in display order wins.
    async fn resolve_channel_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<ChannelRef>, GatewayError>;

    /// Whether the message still exists.
    async fn resolve_message(&self, message: MessageRef) -> Result<bool, GatewayError>;

    async fn send_direct_message(&self, user_id: u64, text: &str) -> Result<(), GatewayError>;

    /// Names of the Discord roles a guild member holds.
    async fn member_role_names(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<String>, GatewayError>;

    /// Ids of every custom emoji the bot can use.
    async fn registered_emoji_ids(&self) -> Result<HashSet<u64>, GatewayError>;
}
