//! # Shared Types Crate
//!
//! Primitives shared across the keyshare subsystem, the node runtime and the
//! integration suite.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Block context and channel identifiers are
//!   defined once here and passed explicitly into every block hook.
//! - **Determinism**: Nothing in this crate reads the wall clock or any other
//!   ambient state. The block's declared timestamp is the only notion of time.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
