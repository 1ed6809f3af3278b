//! Error types for the bot.
//!
//! `AppError` is the top-level error returned from startup and background jobs. The
//! narrower enums describe failures of a single boundary: configuration, the messaging
//! gateway, event publication, roster mutations and conversation steps.

pub mod config;
pub mod flow;
pub mod gateway;
pub mod internal;
pub mod publish;
pub mod roster;

use thiserror::Error;

use crate::error::{
    config::ConfigError, gateway::GatewayError, internal::InternalError, publish::PublishError,
    roster::RosterError,
};

/// Top-level application error type.
///
/// Aggregates all error types that can escape a service call. Most variants use
/// `#[from]` for automatic conversion so `?` works across layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Messaging gateway call failed.
    #[error(transparent)]
    GatewayErr(#[from] GatewayError),

    /// Publishing a new event failed.
    #[error(transparent)]
    PublishErr(#[from] PublishError),

    /// Roster mutation failed.
    #[error(transparent)]
    RosterErr(#[from] RosterError),

    /// Unexpected internal condition, usually malformed stored data.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
