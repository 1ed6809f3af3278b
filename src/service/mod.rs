//! Services implementing the bot's behavior on top of the data layer and the
//! messaging gateway.

pub mod command;
pub mod conversation;
pub mod gateway;
pub mod lifecycle;
pub mod lock;
pub mod reaction;
pub mod roster;
pub mod settings;
