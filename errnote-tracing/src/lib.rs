#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Tracing support for errnote.
//!
//! The core crate doesn't log. This crate connects it to `tracing` in two
//! directions:
//!
//! - [`TracingObserver`] emits one event for every annotation.
//! - [`SpanIdentity`] names callers after the current span.
//!
//! # Quick Start
//!
//! ```
//! use errnote::{hooks::Hooks, prelude::*};
//! use errnote_tracing::{SpanIdentity, TracingObserver};
//!
//! tracing_subscriber::fmt::init();
//!
//! Hooks::new()
//!     .caller_identity(SpanIdentity)
//!     .observer(TracingObserver::new())
//!     .install()
//!     .expect("failed to install hooks");
//!
//! #[tracing::instrument]
//! fn load_profile(user_id: u64) -> Result<(), AnnotatedError> {
//!     let error = std::io::Error::other("connection reset");
//!     bail_annotated!(annotator![user_id], &error, "loading profile");
//! }
//!
//! let error = load_profile(42).unwrap_err();
//! assert!(error.record().fn_name().ends_with("::load_profile"));
//! ```
//!
//! Every annotation is logged with target `errnote`:
//!
//! ```text
//! DEBUG load_profile{user_id=42}: errnote: annotated error fn_name="rust_out::load_profile" depth=1 msg="loading profile" args=["42"] location=src/main.rs:16:9
//! ```
//!
//! # Environment Variables
//!
//! - `ERRNOTE_TRACING` - Comma-separated options:
//!   - `records` - Include the rendered record in each event
//!   - `leafs` - Only log annotations that wrap an error which was not
//!     itself annotated

use std::sync::OnceLock;

use errnote::{AnnotationObserver, Caller, CallerIdentity, Record, hooks::FunctionName};
use tracing::{Level, Span};

/// Target of the events emitted by [`TracingObserver`].
pub const TARGET: &str = "errnote";

/// Annotation observer that emits a `tracing` event per annotation.
///
/// # Examples
///
/// Basic usage with settings from the environment:
///
/// ```
/// use errnote::hooks::Hooks;
/// use errnote_tracing::TracingObserver;
///
/// Hooks::new()
///     .observer(TracingObserver::new())
///     .install()
///     .expect("failed to install hooks");
/// ```
///
/// Custom configuration:
///
/// ```
/// use errnote::hooks::Hooks;
/// use errnote_tracing::TracingObserver;
///
/// let observer = TracingObserver {
///     level: tracing::Level::WARN,
///     include_record: true,
///     leafs_only: false,
/// };
///
/// Hooks::new()
///     .observer(observer)
///     .install()
///     .expect("failed to install hooks");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TracingObserver {
    /// Level of the emitted events.
    pub level: Level,
    /// Whether events carry the full rendered record in a `record` field.
    pub include_record: bool,
    /// Whether only annotations wrapping a leaf error are logged.
    ///
    /// Useful to log each failure once, where it was first annotated,
    /// instead of once per layer.
    pub leafs_only: bool,
}

#[derive(Debug)]
struct ErrnoteTracingEnvOptions {
    include_record: bool,
    leafs_only: bool,
}

impl ErrnoteTracingEnvOptions {
    fn get() -> &'static Self {
        static ERRNOTE_TRACING_FLAGS: OnceLock<ErrnoteTracingEnvOptions> = OnceLock::new();

        ERRNOTE_TRACING_FLAGS.get_or_init(|| {
            let mut include_record = false;
            let mut leafs_only = false;

            if let Some(var) = std::env::var_os("ERRNOTE_TRACING") {
                for v in var.to_string_lossy().split(',') {
                    let v = v.trim();
                    if v.eq_ignore_ascii_case("records") {
                        include_record = true;
                    } else if v.eq_ignore_ascii_case("leafs") {
                        leafs_only = true;
                    }
                }
            }

            ErrnoteTracingEnvOptions {
                include_record,
                leafs_only,
            }
        })
    }
}

impl TracingObserver {
    /// Creates a new [`TracingObserver`] logging at `DEBUG`.
    ///
    /// The other settings are controlled by the `ERRNOTE_TRACING`
    /// environment variable, see the
    /// [crate documentation](crate#environment-variables).
    pub fn new() -> Self {
        let env_options = ErrnoteTracingEnvOptions::get();
        Self {
            level: Level::DEBUG,
            include_record: env_options.include_record,
            leafs_only: env_options.leafs_only,
        }
    }

    fn wants(&self, record: &Record) -> bool {
        !self.leafs_only || record.inner().as_leaf().is_some()
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

// `tracing::event!` needs the level as a constant
macro_rules! event_at {
    ($level:expr, $($fields:tt)*) => {
        match $level {
            Level::ERROR => tracing::event!(target: TARGET, Level::ERROR, $($fields)*),
            Level::WARN => tracing::event!(target: TARGET, Level::WARN, $($fields)*),
            Level::INFO => tracing::event!(target: TARGET, Level::INFO, $($fields)*),
            Level::DEBUG => tracing::event!(target: TARGET, Level::DEBUG, $($fields)*),
            _ => tracing::event!(target: TARGET, Level::TRACE, $($fields)*),
        }
    };
}

impl AnnotationObserver for TracingObserver {
    fn on_annotate(&self, record: &Record, caller: &Caller) {
        if !self.wants(record) {
            return;
        }
        let rendered = self.include_record.then(|| record.to_text());
        event_at!(
            self.level,
            fn_name = record.fn_name(),
            depth = record.depth(),
            msg = record.msg(),
            args = ?record.args(),
            record = rendered.as_deref(),
            location = %caller.location(),
            "annotated error"
        );
    }
}

/// Names callers after the current `tracing` span, as `module::span_name`.
///
/// Outside any span it falls back to [`FunctionName`], so calls through
/// [`annotate!`](errnote::annotate!) are still named after their function.
///
/// # Examples
///
/// ```
/// use errnote::{Annotator, ErrorSource};
/// use errnote_tracing::SpanIdentity;
///
/// tracing_subscriber::fmt::init();
///
/// #[tracing::instrument]
/// fn checkout(cart: u32) -> errnote::AnnotatedError {
///     Annotator::new()
///         .caller_identity(SpanIdentity)
///         .annotate(ErrorSource::NIL, &["empty cart"])
/// }
///
/// assert!(checkout(3).record().fn_name().ends_with("::checkout"));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct SpanIdentity;

impl CallerIdentity for SpanIdentity {
    fn identify(&self, caller: &Caller) -> Option<String> {
        let span = Span::current();
        let Some(metadata) = span.metadata() else {
            return FunctionName.identify(caller);
        };
        Some(match metadata.module_path() {
            Some(module_path) => format!("{module_path}::{}", metadata.name()),
            None => metadata.name().to_owned(),
        })
    }
}
