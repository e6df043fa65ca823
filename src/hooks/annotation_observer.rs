//! Observers notified after every annotation.

use crate::{Record, hooks::Caller};

/// A hook run after a record has been built, before the error is returned.
///
/// Observers see the finished record but cannot change it. They are the
/// extension point for logging; see the `errnote-tracing` crate.
///
/// No lock is held while observers run: they see the hooks that were
/// installed when the annotation started, and may annotate or replace hooks
/// themselves. Records they build are observed too, so an observer that
/// annotates must stop the recursion on its own.
///
/// # Examples
///
/// ```
/// use errnote::{Caller, Record, hooks::Hooks};
///
/// Hooks::new()
///     .observer(|record: &Record, caller: &Caller| {
///         eprintln!("{} annotated at {}", record.fn_name(), caller.location());
///     })
///     .install()
///     .expect("failed to install hooks");
/// ```
pub trait AnnotationObserver: 'static + Send + Sync {
    /// Called with each newly built record.
    fn on_annotate(&self, record: &Record, caller: &Caller);
}

impl<F> AnnotationObserver for F
where
    F: 'static + Send + Sync + Fn(&Record, &Caller),
{
    fn on_annotate(&self, record: &Record, caller: &Caller) {
        (self)(record, caller)
    }
}
