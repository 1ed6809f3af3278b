use thiserror::Error;

/// Failure of a roster mutation.
#[derive(Error, Debug)]
pub enum RosterError {
    /// The raid is not (or no longer) part of the roster.
    #[error("Event {0} not found")]
    RaidNotFound(u64),

    /// The requested role does not exist, is flex only, or is at capacity.
    #[error("Role '{0}' is not available")]
    RoleUnavailable(String),

    /// The role could not be removed because it does not exist or is the last role.
    #[error("Role '{0}' cannot be removed")]
    RoleNotRemovable(String),

    /// The change could not be written through to the database.
    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),
}
