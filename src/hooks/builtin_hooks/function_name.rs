//! Identity providers based on names known at compile time.

use alloc::string::String;

use crate::hooks::{Caller, CallerIdentity, SourceLocation};

/// Reports the path of the function that expanded
/// [`annotate!`](crate::annotate!).
///
/// Closure and async block segments (`{{closure}}`) are stripped so the
/// identity names the function the code was written in. Calls that did not
/// go through the macro have no captured path; they are named after their
/// source location instead, as [`SourceLocation`] does.
///
/// This is the provider used when nothing else is configured.
///
/// # Examples
///
/// ```
/// use errnote::prelude::*;
///
/// fn load() -> AnnotatedError {
///     let run = || annotate!(Annotator::new(), ErrorSource::NIL);
///     run()
/// }
///
/// assert!(load().record().fn_name().ends_with("::load"));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct FunctionName;

impl CallerIdentity for FunctionName {
    fn identify(&self, caller: &Caller) -> Option<String> {
        match caller.function().map(strip_closures) {
            Some(path) if !path.is_empty() => Some(path.into()),
            _ => SourceLocation.identify(caller),
        }
    }
}

fn strip_closures(mut path: &str) -> &str {
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path
}

/// Always reports the same name.
///
/// Useful for tests and for code that wants a stable, hand-picked identity.
///
/// ```
/// use errnote::{Annotator, ErrorSource, hooks::Fixed};
///
/// let error = Annotator::new()
///     .caller_identity(Fixed("pkg.Save"))
///     .annotate(ErrorSource::NIL, &[]);
/// assert_eq!(error.record().fn_name(), "pkg.Save");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Fixed(pub &'static str);

impl CallerIdentity for Fixed {
    fn identify(&self, _caller: &Caller) -> Option<String> {
        Some(self.0.into())
    }
}
