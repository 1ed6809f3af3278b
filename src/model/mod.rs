//! Domain models.
//!
//! Models are converted from entity models at the repository boundary and carry the
//! business rules of the bot. They know nothing about sea-orm or serenity beyond the
//! `from_entity` conversions.

pub mod auto_event;
pub mod catalog;
pub mod discord;
pub mod document;
pub mod fractal;
pub mod raid;
pub mod settings;
