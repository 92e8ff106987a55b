//! Module store: key layout and typed keeper

pub mod keeper;
pub mod keys;

pub use keeper::Keeper;
