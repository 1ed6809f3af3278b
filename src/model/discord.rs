//! Platform-neutral references to channels and messages.

/// A text channel inside a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRef {
    pub guild_id: u64,
    pub channel_id: u64,
}

/// A message inside a guild text channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
}

impl MessageRef {
    pub fn new(channel: ChannelRef, message_id: u64) -> Self {
        Self {
            guild_id: channel.guild_id,
            channel_id: channel.channel_id,
            message_id,
        }
    }
}
