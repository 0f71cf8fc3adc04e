//! Credential wrappers and per-session correlation identifiers.

pub mod secret;
pub mod session;

pub use secret::*;
pub use session::*;
