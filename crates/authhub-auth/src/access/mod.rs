//! Request-path authorization.

pub mod filter;

pub use filter::requires_auth;
