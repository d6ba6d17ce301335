//! Value objects - immutable types that represent domain concepts

mod compensation;
mod prefecture;
mod snowflake;

pub use compensation::{CompensationBand, CompensationType, UnknownBand};
pub use prefecture::{Prefecture, UnknownPrefecture, PREFECTURES};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
