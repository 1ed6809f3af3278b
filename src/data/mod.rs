//! Database repository layer.
//!
//! Repositories wrap a borrowed `DatabaseConnection` and perform the CRUD operations for
//! one table family each. They take domain models as input and return SeaORM entity
//! models; conversion to domain models happens in the services. Discord ids are stored as
//! strings.

pub mod auto_event;
pub mod raid;
pub mod raid_user;
pub mod settings;

#[cfg(test)]
mod test;
