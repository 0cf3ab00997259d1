//! Infrastructure layer - Store adapters, services, and logging

pub mod logging;
pub mod storage;
pub mod user;
