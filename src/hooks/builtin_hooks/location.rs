//! Source location identity provider.
//!
//! ```rust
//! use errnote::hooks::{Hooks, SourceLocation};
//!
//! Hooks::new()
//!     .caller_identity(SourceLocation)
//!     .install()
//!     .expect("failed to install hooks");
//! ```

use alloc::{format, string::String};

use crate::hooks::{Caller, CallerIdentity};

/// Reports the annotate call site as `file:line:column`.
///
/// The location is captured through `#[track_caller]`, so this provider
/// never fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct SourceLocation;

impl CallerIdentity for SourceLocation {
    fn identify(&self, caller: &Caller) -> Option<String> {
        let location = caller.location();
        Some(format!(
            "{}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_location() {
        let caller = Caller::new(None);
        let identity = SourceLocation.identify(&caller).unwrap();
        assert!(identity.starts_with(file!()), "{identity}");
        assert!(identity.contains(&format!(":{}:", caller.location().line())));
    }
}
