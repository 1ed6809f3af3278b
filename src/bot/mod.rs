//! Discord bot integration.
//!
//! The bot listens for guild commands, direct messages and reactions on event messages
//! and hands them to the services. Outgoing calls go through
//! [`gateway::SerenityGateway`], which the services only see as a
//! [`MessagingGateway`](crate::service::gateway::MessagingGateway).
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild and channel information
//! - `GUILD_MESSAGES` - Commands typed in guild channels
//! - `GUILD_MESSAGE_REACTIONS` - Reactions on event messages
//! - `DIRECT_MESSAGES` - Conversation replies
//! - `MESSAGE_CONTENT` - Reading command and reply text (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled in the
//! Discord Developer Portal for the bot application.

pub mod gateway;
pub mod handler;
pub mod start;
