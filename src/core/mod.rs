//! Core module containing the record, store, error and validation types

pub mod envelope;
pub mod error;
pub mod record;
pub mod store;
pub mod validation;

pub use envelope::{Data, Envelope};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use record::{Record, next_id};
pub use store::{Removal, Store};
