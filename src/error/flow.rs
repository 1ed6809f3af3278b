use thiserror::Error;

use crate::error::{gateway::GatewayError, roster::RosterError, AppError};

/// Fatal failure of a conversation step.
///
/// Ordinary invalid input is not an error; steps report it by staying on the current
/// step. Any `FlowError` ends the conversation with an apology.
#[derive(Error, Debug)]
pub enum FlowError {
    /// The state the step operates on no longer exists.
    #[error("Session state no longer exists")]
    SessionMissing,

    /// Database operation error from SeaORM.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    /// Messaging gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Roster mutation failed.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Service call failed.
    #[error(transparent)]
    App(#[from] AppError),
}
