//! Core domain concepts shared across all subdomains.
//!
//! - [`params::InvocationParams`] — positional parameters of one invocation
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod params;
