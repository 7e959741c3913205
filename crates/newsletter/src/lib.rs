//! Newsletter domain module.
//!
//! This crate contains the business rules for newsletter signups, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod email;
pub mod subscription;

pub use email::EmailAddress;
pub use subscription::{SignupSource, Subscription};
