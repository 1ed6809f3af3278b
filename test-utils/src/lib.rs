//! Raidboard Test Utils
//!
//! Provides shared testing utilities for building tests for the raidboard bot. This crate
//! offers a builder pattern for creating test contexts with in-memory SQLite databases and
//! factories for inserting raid and settings rows with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment owning the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Row factories for raids, participants and server settings
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_raid_operations() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let raid = factory::raid::create_raid(db).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
