//! Global configuration: caller identity providers and annotation observers.
//!
//! # Quick Start
//!
//! ```rust
//! use errnote::hooks::{Hooks, SourceLocation};
//!
//! // Name every caller after its source location and log every annotation
//! Hooks::new()
//!     .caller_identity(SourceLocation)
//!     .observer(|record: &errnote::Record, _: &errnote::Caller| eprintln!("{record}"))
//!     .install()
//!     .expect("failed to install hooks");
//! ```
//!
//! # When to Use Hooks
//!
//! **Most users don't need hooks.** The [`annotate!`](crate::annotate!) macro
//! already names the enclosing function, and a provider can be set on a
//! single [`Annotator`](crate::Annotator). Use hooks when you need to:
//! - Change how callers are named across the whole program (for example,
//!   walking the stack with `errnote-backtrace`)
//! - Log or count every annotation (for example, with `errnote-tracing`)
//!
//! # Hook Types
//!
//! - **[`caller_identity`]**: the [`CallerIdentity`] capability and the
//!   [`Caller`] it receives
//! - **[`annotation_observer`]**: [`AnnotationObserver`]s run after every
//!   record is built
//! - **[`builtin_hooks`]**: [`FunctionName`], [`Fixed`] and
//!   [`SourceLocation`]

pub mod annotation_observer;
pub mod builtin_hooks;
pub mod caller_identity;
mod installed;

use alloc::{boxed::Box, string::String, vec::Vec};
use core::{fmt, panic::Location};

use triomphe::Arc;

pub use self::{
    annotation_observer::AnnotationObserver,
    builtin_hooks::{
        function_name::{Fixed, FunctionName},
        location::SourceLocation,
    },
    caller_identity::{Caller, CallerIdentity},
};
use crate::Record;

/// Builder for configuring and installing hooks globally.
///
/// # Examples
///
/// ```rust
/// use errnote::hooks::{Fixed, Hooks};
///
/// // First installation succeeds
/// Hooks::new().caller_identity(Fixed("service")).install().expect("failed to install hooks");
///
/// // A second one is refused and handed back
/// let rejected = Hooks::new().install().unwrap_err();
/// let _previous = rejected.0.replace();
/// ```
pub struct Hooks {
    caller_identity: Option<Box<dyn CallerIdentity>>,
    observers: Vec<Box<dyn AnnotationObserver>>,
    created_at: &'static Location<'static>,
}

impl Default for Hooks {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("caller_identity", &self.caller_identity.is_some())
            .field("observers", &self.observers.len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Error returned when attempting to install hooks when they're already
/// installed.
///
/// Contains the hooks that were attempted to be installed, allowing you to
/// recover them if needed.
pub struct HooksAlreadyInstalledError(pub Hooks);

impl fmt::Debug for HooksAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HooksAlreadyInstalledError").finish()
    }
}

impl fmt::Display for HooksAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hooks are already installed globally")
    }
}

impl core::error::Error for HooksAlreadyInstalledError {}

impl Hooks {
    /// Creates an empty `Hooks` builder.
    ///
    /// Installing it unchanged keeps the default behavior: callers are named
    /// by [`FunctionName`] and nothing observes annotations.
    #[track_caller]
    pub fn new() -> Self {
        Self {
            caller_identity: None,
            observers: Vec::new(),
            created_at: Location::caller(),
        }
    }

    /// Sets the provider used by annotators that don't carry their own.
    ///
    /// Only one provider can be installed; a later call replaces an earlier
    /// one on the same builder.
    pub fn caller_identity<I: CallerIdentity>(mut self, identity: I) -> Self {
        self.caller_identity = Some(Box::new(identity));
        self
    }

    /// Adds an observer run after every annotation, in registration order.
    pub fn observer<O: AnnotationObserver>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Where this builder was created.
    pub fn created_at(&self) -> &'static Location<'static> {
        self.created_at
    }

    /// Installs the hooks globally.
    ///
    /// If hooks are already installed, returns
    /// [`HooksAlreadyInstalledError`] containing these hooks. See also
    /// [`replace`](Self::replace).
    pub fn install(self) -> Result<(), HooksAlreadyInstalledError> {
        installed::install(self).map_err(HooksAlreadyInstalledError)
    }

    /// Replaces the currently installed hooks with `self`, returning the
    /// previous ones.
    ///
    /// Annotations already in progress finish with the hooks they started
    /// with, so the previous hooks may still be in use.
    pub fn replace(self) -> Option<Arc<Hooks>> {
        installed::replace(Some(self))
    }

    /// Removes the installed hooks, restoring the defaults.
    pub fn uninstall() -> Option<Arc<Hooks>> {
        installed::replace(None)
    }

    /// Returns `true` if hooks are installed.
    pub fn is_installed() -> bool {
        installed::current().is_some()
    }
}

/// Resolves `caller` with the installed provider, or [`FunctionName`].
pub(crate) fn identify_caller(caller: &Caller) -> Option<String> {
    let hooks = installed::current();
    match hooks.as_deref().and_then(|hooks| hooks.caller_identity.as_deref()) {
        Some(identity) => identity.identify(caller),
        None => FunctionName.identify(caller),
    }
}

pub(crate) fn notify_observers(record: &Record, caller: &Caller) {
    let Some(hooks) = installed::current() else {
        return;
    };
    for observer in &hooks.observers {
        observer.on_annotate(record, caller);
    }
}
