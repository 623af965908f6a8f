//! Request validation
//!
//! Each operation is guarded by a [`Chain`] of [`Guard`]s that run in order
//! in front of the handler. Chains fail fast: the first guard that rejects
//! the request decides the response, and the handler never runs.

pub mod chain;
pub mod guards;
pub mod validators;

pub use chain::{Chain, FnGuard, Guard, GuardContext};
pub use guards::{Exists, IdMatchesRoute, Require, id_matches_route, require};
