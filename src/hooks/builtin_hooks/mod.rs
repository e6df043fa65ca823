//! Built-in caller identity providers.
//!
//! - **[`function_name`]**: [`FunctionName`], the default, which reports the
//!   function path captured by [`annotate!`](crate::annotate!), and
//!   [`Fixed`], which always reports the same name.
//! - **[`location`]**: [`SourceLocation`], which reports `file:line:column`.
//!
//! Providers that need the stack or a tracing span live in the
//! `errnote-backtrace` and `errnote-tracing` crates.
//!
//! [`FunctionName`]: function_name::FunctionName
//! [`Fixed`]: function_name::Fixed
//! [`SourceLocation`]: location::SourceLocation

pub mod function_name;
pub mod location;
