//! CFO profile matching: the search predicate and the legacy text readers feeding it

mod filter;
pub mod legacy;

pub use filter::CfoFilter;
pub use legacy::LegacyCompensation;
