//! Building records: the [`Annotator`] snapshot and the [`ErrorSource`] it
//! wraps.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::{fmt, fmt::Write};

use serde::Serialize;
use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::{
    AnnotatedError, Argument, ContextCarrier,
    hooks::{self, Caller, CallerIdentity},
    record::{Inner, Record, UNKNOWN_FUNCTION},
    render::{render, render_debug},
};

/// The error being wrapped by an annotate call.
///
/// Built from `&E` for any error type, or [`ErrorSource::NIL`] when there is
/// no error. An [`AnnotatedError`] source is nested directly; any other error
/// is nested when its text parses as a [`Record`] and kept as a leaf
/// otherwise.
#[derive(Copy, Clone)]
pub struct ErrorSource<'a>(Option<&'a (dyn core::error::Error + 'static)>);

impl<'a> ErrorSource<'a> {
    /// No error; records it as `"nil err"`.
    pub const NIL: Self = Self(None);

    /// Wraps an optional error trait object.
    pub fn new(error: Option<&'a (dyn core::error::Error + 'static)>) -> Self {
        Self(error)
    }

    /// Returns `true` when there is no error.
    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    fn into_inner(self) -> Inner {
        let Some(error) = self.0 else {
            return Inner::nil();
        };
        if let Some(annotated) = error.downcast_ref::<AnnotatedError>() {
            return annotated.record().clone().into();
        }

        let mut text = String::new();
        if write!(text, "{error}").is_err() {
            text.clear();
        }
        match Record::parse(&text) {
            Some(record) => record.into(),
            None => Inner::Leaf(text),
        }
    }
}

impl<'a, E> From<&'a E> for ErrorSource<'a>
where
    E: core::error::Error + 'static,
{
    fn from(error: &'a E) -> Self {
        Self(Some(error))
    }
}

impl fmt::Debug for ErrorSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(error) => f.debug_tuple("ErrorSource").field(&error).finish(),
            None => f.write_str("ErrorSource::NIL"),
        }
    }
}

/// A snapshot of the arguments of interest at a call site, ready to annotate
/// errors.
///
/// Arguments are rendered as they are added and the annotator is not changed
/// by annotating, so one annotator can be reused and shared across threads.
///
/// # Examples
///
/// ```
/// use errnote::{Annotator, Inner, hooks::Fixed};
///
/// let annotator = Annotator::new()
///     .arg("x")
///     .caller_identity(Fixed("pkg.Save"));
///
/// let first = annotator.annotate(&std::io::Error::other("disk full"), &["writing", "file"]);
/// let second = annotator.annotate(&first, &["retrying"]);
///
/// assert_eq!(second.record().inner(), &Inner::from(first.record().clone()));
/// assert_eq!(second.depth(), 2);
/// assert_eq!(second.record().root_cause(), "disk full");
/// ```
#[derive(Clone, Default)]
pub struct Annotator {
    arguments: Vec<Argument>,
    caller_identity: Option<Arc<dyn CallerIdentity>>,
}

impl fmt::Debug for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotator")
            .field("arguments", &self.arguments)
            .field("caller_identity", &self.caller_identity.is_some())
            .finish()
    }
}

impl Annotator {
    /// Creates an annotator with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an annotator from already captured arguments.
    ///
    /// See also [`annotator!`](crate::annotator!).
    pub fn from_arguments(arguments: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            arguments: arguments.into_iter().collect(),
            caller_identity: None,
        }
    }

    /// Adds a value rendered as JSON, falling back to its `Debug` form.
    pub fn arg<T>(self, value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        self.argument(Argument::Rendered(render(value)))
    }

    /// Adds a value rendered with its `Debug` form.
    pub fn arg_debug<T>(self, value: &T) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        self.argument(Argument::Rendered(render_debug(value)))
    }

    /// Adds a context or cancellation carrier, masked as `"ctx"`.
    pub fn carrier<T>(self, _value: &T) -> Self
    where
        T: ContextCarrier + ?Sized,
    {
        self.argument(Argument::Context)
    }

    /// Adds an already captured argument.
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Uses `identity` to name callers of this annotator, ahead of any
    /// globally installed provider.
    pub fn caller_identity<I: CallerIdentity>(mut self, identity: I) -> Self {
        let identity = Arc::new(identity).unsize(unsize::Coercion!(to dyn CallerIdentity));
        self.caller_identity = Some(identity);
        self
    }

    /// The captured arguments, in the order they were added.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Wraps `error` in a new record and returns it as an error.
    ///
    /// `message` fragments are joined with single spaces. Nothing here can
    /// fail: an unresolvable caller becomes `"unknown"`, a missing error
    /// becomes `"nil err"`, and values that cannot be encoded fall back to
    /// their `Debug` form.
    ///
    /// No function path is captured by this method, so unless a provider is
    /// configured the record names the call site as `file:line:column`. Use
    /// [`annotate!`](crate::annotate!) to let the default provider name the
    /// enclosing function instead.
    #[track_caller]
    pub fn annotate<'e>(
        &self,
        error: impl Into<ErrorSource<'e>>,
        message: &[&str],
    ) -> AnnotatedError {
        self.annotate_from(Caller::new(None), error, message)
    }

    /// Like [`annotate`](Self::annotate), with an explicitly captured caller.
    pub fn annotate_from<'e>(
        &self,
        caller: Caller,
        error: impl Into<ErrorSource<'e>>,
        message: &[&str],
    ) -> AnnotatedError {
        let msg = message.join(" ");
        let fn_name = self
            .identify(&caller)
            .unwrap_or_else(|| UNKNOWN_FUNCTION.into());
        let inner = error.into().into_inner();
        let args = self
            .arguments
            .iter()
            .map(|argument| String::from(argument.as_str()))
            .collect();

        let record = Record::new(fn_name, args, msg, inner);
        hooks::notify_observers(&record, &caller);
        AnnotatedError::from_record(record)
    }

    fn identify(&self, caller: &Caller) -> Option<String> {
        match &self.caller_identity {
            Some(identity) => identity.identify(caller),
            None => hooks::identify_caller(caller),
        }
    }
}

impl From<Vec<Argument>> for Annotator {
    fn from(arguments: Vec<Argument>) -> Self {
        Self::from_arguments(arguments)
    }
}

impl From<Box<[Argument]>> for Annotator {
    fn from(arguments: Box<[Argument]>) -> Self {
        Self::from_arguments(arguments)
    }
}
