use alloc::{boxed::Box, rc::Rc, string::String, sync::Arc};
use core::{
    fmt,
    task::{Context, Waker},
};

use crate::record::CONTEXT_ARGUMENT;

/// Marker for values that carry a context or cancellation signal.
///
/// Such values are never rendered into a record: their slot in the argument
/// list is the literal `"ctx"`. This keeps opaque runtime state (and anything
/// secret it may hold) out of error text.
///
/// Implement it for your own cancellation tokens:
///
/// ```
/// use errnote::{ContextCarrier, arg};
///
/// #[derive(Debug)]
/// struct Shutdown {
///     reason: String,
/// }
///
/// impl ContextCarrier for Shutdown {}
///
/// let shutdown = Shutdown { reason: "deploy".into() };
/// assert_eq!(arg!(shutdown).as_str(), "ctx");
/// ```
pub trait ContextCarrier {}

impl ContextCarrier for Context<'_> {}
impl ContextCarrier for Waker {}

impl<T: ContextCarrier + ?Sized> ContextCarrier for &T {}
impl<T: ContextCarrier + ?Sized> ContextCarrier for &mut T {}
impl<T: ContextCarrier + ?Sized> ContextCarrier for Box<T> {}
impl<T: ContextCarrier + ?Sized> ContextCarrier for Rc<T> {}
impl<T: ContextCarrier + ?Sized> ContextCarrier for Arc<T> {}

/// One captured argument of interest.
///
/// Arguments are rendered when they are captured, so an [`Annotator`] holds
/// an immutable snapshot rather than live values.
///
/// [`Annotator`]: crate::Annotator
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Argument {
    /// A masked context carrier, rendered as `"ctx"`.
    Context,
    /// The rendered text of any other value.
    Rendered(String),
}

impl Argument {
    /// Wraps already rendered text.
    pub fn rendered(text: impl Into<String>) -> Self {
        Self::Rendered(text.into())
    }

    /// The text this argument contributes to a record.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Context => CONTEXT_ARGUMENT,
            Self::Rendered(text) => text,
        }
    }

    /// Converts the argument into its record text.
    pub fn into_string(self) -> String {
        match self {
            Self::Context => CONTEXT_ARGUMENT.into(),
            Self::Rendered(text) => text,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_carriers() {
        static_assertions::assert_impl_all!(Context<'static>: ContextCarrier);
        static_assertions::assert_impl_all!(&Waker: ContextCarrier);
        static_assertions::assert_impl_all!(Arc<Waker>: ContextCarrier);
        static_assertions::assert_impl_all!(Box<&mut Context<'static>>: ContextCarrier);
        static_assertions::assert_not_impl_any!(String: ContextCarrier);
        static_assertions::assert_not_impl_any!(u32: ContextCarrier);
    }

    #[test]
    fn test_argument_text() {
        assert_eq!(Argument::Context.as_str(), "ctx");
        assert_eq!(Argument::rendered("\"x\"").as_str(), "\"x\"");
        assert_eq!(Argument::Context.into_string(), "ctx");
    }
}
