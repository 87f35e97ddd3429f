//! Common utilities and shared types for picshare.
//!
//! This crate provides the foundational pieces used by the other picshare crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use picshare_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Database: {}", config.database.url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{Config, DatabaseConfig};
pub use error::{AppError, AppResult};
