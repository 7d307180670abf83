//! Infrastructure adapters: the HTTP client for the validation service and
//! the in-process status bus.

pub mod http;
pub mod status_bus;
