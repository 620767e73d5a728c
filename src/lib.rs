//! # vflake
//!
//! Versioned Snowflake IDs: 64-bit identifiers laid out as
//! `[version:3][time][node][sequence]`, most significant bits first.
//!
//! - 📈 Time-sorted per node
//! - 🔄 Strictly monotonic per generator, even across clock rollback
//! - 🔒 Thread-safe (`Snowflake` is `Send + Sync`)
//! - 🏷️ Self-describing: every ID carries the layout version it was minted under
//!
//! ```
//! use vflake::{decode, Snowflake, SnowflakeConfig};
//!
//! let generator = Snowflake::new(SnowflakeConfig::new(0, 42)).unwrap();
//! let id = generator.next_id().unwrap();
//!
//! let decoded = decode(id).unwrap();
//! assert_eq!(decoded.version, 0);
//! assert_eq!(decoded.node_id, 42);
//! ```

#![forbid(unsafe_code)]

mod config;
mod decode;
mod error;
mod generator;
mod layout;

#[cfg(test)]
pub mod tests;

pub use config::{SnowflakeConfig, SnowflakeConfigBuilder, SnowflakeConfigError};
pub use decode::{decode, version_of, DecodedId};
pub use error::SnowflakeError;
pub use generator::{Clock, Snowflake, SystemClock};
pub use layout::{
    lookup, LayoutError, LayoutRegistry, Shifts, VersionLayout, VERSION_0, VERSION_BITS,
    VERSION_SHIFT,
};
