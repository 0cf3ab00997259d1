//! User infrastructure module
//!
//! Hosts the user service that orchestrates validation, the record store,
//! and the record/row mapper.

mod service;

pub use service::{UserService, ISSUE_SEPARATOR};
