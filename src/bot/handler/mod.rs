use std::sync::Arc;

use serenity::all::{Context, EventHandler, Message, Reaction, Ready};
use serenity::async_trait;

use crate::service::conversation::ConversationEngine;

pub mod message;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub engine: Arc<ConversationEngine>,
}

impl Handler {
    pub fn new(engine: Arc<ConversationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called for guild channel messages and direct messages
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.engine, ctx, message).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.engine, ctx, reaction).await;
    }
}
