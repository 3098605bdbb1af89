//! Credential material and the request-signing protocol.

pub mod credential;
pub mod secret;
pub mod sign;

pub use credential::*;
pub use secret::*;
pub use sign::*;
