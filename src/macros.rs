/// Annotates an error with the enclosing function as its identity.
///
/// The first argument is an [`Annotator`], the second the error being
/// wrapped (anything that converts into an [`ErrorSource`], such as `&error`
/// or [`ErrorSource::NIL`]). Any remaining arguments are message fragments;
/// they are joined with single spaces.
///
/// Unlike calling [`Annotator::annotate`] directly, the macro records the
/// path of the function it is expanded in, so the default
/// [`FunctionName`](crate::hooks::FunctionName) provider can name the
/// caller without walking the stack.
///
/// [`Annotator`]: crate::Annotator
/// [`Annotator::annotate`]: crate::Annotator::annotate
/// [`ErrorSource`]: crate::ErrorSource
/// [`ErrorSource::NIL`]: crate::ErrorSource::NIL
///
/// # Examples
///
/// ```
/// use errnote::prelude::*;
///
/// fn write_file(name: &str) -> AnnotatedError {
///     let annotator = annotator![name];
///     let error = std::io::Error::other("disk full");
///     annotate!(annotator, &error, "writing", format!("{name}.tmp"))
/// }
///
/// let error = write_file("report");
/// assert!(error.record().fn_name().ends_with("write_file"));
/// assert_eq!(error.record().msg(), "writing report.tmp");
/// ```
#[macro_export]
macro_rules! annotate {
    ($annotator:expr, $error:expr $(, $part:expr)* $(,)?) => {
        ($annotator).annotate_from(
            $crate::Caller::new(::core::option::Option::Some($crate::__function_path!())),
            $error,
            &[$($crate::__private::AsRef::<str>::as_ref(&$part)),*],
        )
    };
}

/// Return early with an annotated error.
///
/// Takes the same arguments as [`annotate!`] and is equivalent to writing
/// `return Err(annotate!(...).into());`.
///
/// # Examples
///
/// ```
/// use errnote::prelude::*;
///
/// fn check(limit: u32) -> Result<(), AnnotatedError> {
///     if limit == 0 {
///         bail_annotated!(annotator![limit], ErrorSource::NIL, "limit must be positive");
///     }
///     Ok(())
/// }
///
/// assert_eq!(check(0).unwrap_err().record().root_cause(), "nil err");
/// ```
#[macro_export]
macro_rules! bail_annotated {
    ($($args:tt)*) => {
        return $crate::__private::Err($crate::annotate!($($args)*).into())
    };
}

/// Captures a value as an [`Argument`](crate::Argument).
///
/// The renderer is picked from the traits the value implements, in this
/// order:
///
/// 1. [`ContextCarrier`](crate::ContextCarrier): masked as `"ctx"`.
/// 2. `Serialize + Debug`: JSON, falling back to the `Debug` form.
/// 3. `Serialize`: JSON, falling back to the type name.
/// 4. `Debug`: the `Debug` form.
/// 5. Anything else: `An object of type <name>`.
///
/// # Examples
///
/// ```
/// use errnote::arg;
///
/// let waker = std::task::Waker::noop();
/// assert_eq!(arg!(waker).as_str(), "ctx");
/// assert_eq!(arg!(42).as_str(), "42");
/// assert!(arg!(std::time::Instant::now()).as_str().starts_with("Instant"));
/// ```
#[macro_export]
macro_rules! arg {
    ($value:expr $(,)?) => {{
        use $crate::__private::kind::*;
        let value = &$value;
        let renderer = (&&&&&Wrap(value)).renderer();
        macro_helper_argument(renderer, value)
    }};
}

/// Renders any value to text with the same rules as [`arg!`].
///
/// # Examples
///
/// ```
/// use errnote::render;
///
/// assert_eq!(render!("x"), r#""x""#);
/// assert_eq!(render!(vec![1, 2]), "[1,2]");
///
/// let callback = |n: u32| n + 1;
/// assert!(render!(callback).starts_with("An object of type"));
/// ```
#[macro_export]
macro_rules! render {
    ($value:expr $(,)?) => {{
        use $crate::__private::kind::*;
        let value = &$value;
        let renderer = (&&&&&Wrap(value)).renderer();
        macro_helper_render(renderer, value)
    }};
}

/// Builds an [`Annotator`](crate::Annotator) from a list of values, each
/// captured with [`arg!`].
///
/// # Examples
///
/// ```
/// use errnote::annotator;
///
/// let annotator = annotator!["x", 3];
/// assert_eq!(annotator.arguments().len(), 2);
/// assert_eq!(annotator.arguments()[0].as_str(), r#""x""#);
/// ```
#[macro_export]
macro_rules! annotator {
    ($($value:expr),* $(,)?) => {
        $crate::Annotator::from_arguments([$($crate::arg!($value)),*])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __errnote_anchor() {}
        $crate::__private::enclosing_function($crate::__private::type_name_of(__errnote_anchor))
    }};
}
