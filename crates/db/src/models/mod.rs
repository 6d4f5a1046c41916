//! Row structs and their conversions to domain types.

pub mod preference;
