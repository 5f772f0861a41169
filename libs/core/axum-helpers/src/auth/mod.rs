//! Request authentication.
//!
//! Only HTTP Basic credentials are supported: every protected request carries
//! `Authorization: Basic base64(id:credential)` and is checked on its own.

pub mod basic;

pub use basic::{AUTHENTICATION_FAILED, BasicAuth};
