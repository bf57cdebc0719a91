//! Session and reset-token lifecycle.

pub mod authority;

pub use authority::SessionAuthority;
