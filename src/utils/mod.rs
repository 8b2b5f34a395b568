mod discord_timestamp;

pub mod formatting;
pub mod numbers;

pub use discord_timestamp::{timestamp, TimestampStyle};
