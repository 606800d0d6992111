//! Request-handling middleware: the auth gate, role checks, CSRF
//! verification, rate limiting, and client metadata extraction.

pub mod auth;
pub mod client_meta;
pub mod csrf;
pub mod rate_limit;
pub mod rbac;
