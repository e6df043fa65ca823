//! Resolving the identity of the function that asked for an annotation.
//!
//! The identity written to a record's `fn_name` comes from a
//! [`CallerIdentity`] provider. Providers receive a [`Caller`], which always
//! knows the source location of the annotate call and, when the call went
//! through [`annotate!`](crate::annotate!), the path of the enclosing
//! function.
//!
//! Providers are consulted in this order:
//!
//! 1. The provider set on the [`Annotator`] with
//!    [`caller_identity`](crate::Annotator::caller_identity).
//! 2. The provider installed globally with [`Hooks::caller_identity`].
//! 3. [`FunctionName`], which names calls made without
//!    [`annotate!`](crate::annotate!) after their source location.
//!
//! Whichever provider is picked, a `None` answer becomes `"unknown"`.
//!
//! [`Annotator`]: crate::Annotator
//! [`Hooks::caller_identity`]: crate::hooks::Hooks::caller_identity
//! [`FunctionName`]: crate::hooks::FunctionName

use alloc::string::String;
use core::panic::Location;

/// Where an annotate call came from.
#[derive(Copy, Clone, Debug)]
pub struct Caller {
    location: &'static Location<'static>,
    function: Option<&'static str>,
}

impl Caller {
    /// Captures the location of the caller.
    ///
    /// `function` is the path of the enclosing function when it is known at
    /// compile time.
    #[track_caller]
    #[must_use]
    pub fn new(function: Option<&'static str>) -> Self {
        Self {
            location: Location::caller(),
            function,
        }
    }

    /// Source location of the annotate call.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Path of the enclosing function, if it was captured.
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// A capability that names the function behind an annotate call.
///
/// Returning `None` signals that resolution failed; the record then uses
/// `"unknown"`.
///
/// Closures taking a [`Caller`] implement this trait:
///
/// ```
/// use errnote::{Annotator, Caller, ErrorSource};
///
/// let annotator = Annotator::new()
///     .caller_identity(|caller: &Caller| Some(format!("line {}", caller.location().line())));
/// let error = annotator.annotate(ErrorSource::NIL, &[]);
/// assert!(error.record().fn_name().starts_with("line "));
/// ```
pub trait CallerIdentity: 'static + Send + Sync {
    /// Resolves the identity of `caller`.
    fn identify(&self, caller: &Caller) -> Option<String>;
}

impl<F> CallerIdentity for F
where
    F: 'static + Send + Sync + Fn(&Caller) -> Option<String>,
{
    fn identify(&self, caller: &Caller) -> Option<String> {
        (self)(caller)
    }
}
