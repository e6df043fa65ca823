use crate::{AnnotatedError, Annotator, ErrorSource};

mod sealed {
    pub trait Sealed {}
    impl<A, E> Sealed for Result<A, E> {}
}

/// Extension methods for annotating the error of a [`Result`].
///
/// # Examples
///
/// ```
/// use errnote::{Annotator, ResultExt, hooks::Fixed};
///
/// let annotator = Annotator::new().arg("config.toml").caller_identity(Fixed("load"));
/// let result: Result<(), std::io::Error> = Err(std::io::Error::other("missing"));
///
/// let error = result.annotate(&annotator, &["reading"]).unwrap_err();
/// assert_eq!(error.record().msg(), "reading");
/// assert_eq!(error.root_cause(), "missing");
/// ```
pub trait ResultExt<T>: sealed::Sealed {
    /// Annotates the error, if any, with `annotator`.
    #[track_caller]
    fn annotate(self, annotator: &Annotator, message: &[&str]) -> Result<T, AnnotatedError>;

    /// Annotates the error, if any, with a message built only on failure.
    #[track_caller]
    fn annotate_with<F, S>(self, annotator: &Annotator, message: F) -> Result<T, AnnotatedError>
    where
        F: FnOnce() -> S,
        S: AsRef<str>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: core::error::Error + 'static,
{
    #[track_caller]
    fn annotate(self, annotator: &Annotator, message: &[&str]) -> Result<T, AnnotatedError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(annotator.annotate(ErrorSource::from(&error), message)),
        }
    }

    #[track_caller]
    fn annotate_with<F, S>(self, annotator: &Annotator, message: F) -> Result<T, AnnotatedError>
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => {
                let message = message();
                Err(annotator.annotate(ErrorSource::from(&error), &[message.as_ref()]))
            }
        }
    }
}
