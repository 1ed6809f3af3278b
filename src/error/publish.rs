use thiserror::Error;

use crate::error::gateway::GatewayError;

/// Reasons publishing a pending event can fail.
///
/// Every variant leaves no partial state behind: no stored row, no cached raid and no
/// orphaned message.
#[derive(Error, Debug)]
pub enum PublishError {
    /// No text channel with the configured name exists in the guild.
    #[error("No text channel named '{channel}' in guild {guild_id}")]
    ChannelNotFound {
        /// Configured channel name
        channel: String,
        /// Guild that was searched
        guild_id: u64,
    },

    /// Looking up the channel failed before anything was sent.
    #[error("Failed to resolve announcement channel: {0}")]
    ChannelLookup(#[source] GatewayError),

    /// Sending the event message failed.
    #[error("Failed to send event message: {0}")]
    Send(#[source] GatewayError),

    /// The message was sent but the event could not be stored; the message was removed again.
    #[error("Failed to store event {0}, message removed")]
    NotPersisted(u64),
}
