#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Stack-walking caller identity for errnote.
//!
//! The [`annotate!`](errnote::annotate!) macro knows the enclosing function at
//! compile time. Code that calls [`Annotator::annotate`] directly does not, and
//! by default those records are named after their source location. This crate
//! provides [`BacktraceIdentity`], which walks the stack at annotation time
//! and reports the first frame that doesn't belong to errnote itself or to
//! the standard library.
//!
//! # Quick Start
//!
//! ## Using Hooks (All Annotators)
//!
//! ```rust
//! use errnote::hooks::Hooks;
//! use errnote_backtrace::BacktraceIdentity;
//!
//! Hooks::new()
//!     .caller_identity(BacktraceIdentity::new_from_env())
//!     .install()
//!     .expect("failed to install hooks");
//! ```
//!
//! ## Per Annotator
//!
//! ```rust
//! use errnote::{Annotator, ErrorSource};
//! use errnote_backtrace::BacktraceIdentity;
//!
//! #[inline(never)]
//! fn open_session() -> errnote::AnnotatedError {
//!     Annotator::new()
//!         .caller_identity(BacktraceIdentity::new())
//!         .annotate(ErrorSource::NIL, &["opening session"])
//! }
//!
//! assert!(open_session().record().fn_name().ends_with("open_session"));
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_BACKTRACE=full` - Implies `full_symbols`
//! - `ERRNOTE_BACKTRACE` - Comma-separated options:
//!   - `full_symbols` - Keep the symbol hash and closure segments
//!   - `short_names` - Report only the function name, without its module path
//!
//! # Debugging symbols in release builds
//!
//! Symbol names are only available when the binary keeps them. Inlined
//! functions don't have frames of their own, so a caller that was inlined is
//! reported as the function it was inlined into.
//!
//! ```toml
//! [profile.release]
//! strip = false
//! debug = "line-tables-only"
//! ```
//!
//! [`Annotator::annotate`]: errnote::Annotator::annotate

use std::sync::OnceLock;

use errnote::{Caller, CallerIdentity};

/// Names callers by resolving the symbol of the first frame outside the
/// skipped crates.
///
/// Resolution fails, and the record is named `"unknown"`, when the stack
/// can't be walked or no frame has a symbol name.
#[derive(Copy, Clone, Debug)]
pub struct BacktraceIdentity {
    /// Frames whose symbol belongs to one of these crates are skipped.
    ///
    /// Crate names are compared in their symbol form, with underscores.
    pub skipped_crates: &'static [&'static str],
    /// Report only the function name, without its module path.
    pub short_names: bool,
    /// Keep the symbol hash and closure segments.
    pub full_symbols: bool,
}

impl BacktraceIdentity {
    /// Skips errnote, the backtrace machinery and the standard library, and
    /// reports full paths without hashes.
    pub const DEFAULT: Self = Self {
        skipped_crates: &[
            "backtrace",
            "errnote",
            "errnote_backtrace",
            "errnote_tracing",
            "core",
            "std",
            "alloc",
        ],
        short_names: false,
        full_symbols: false,
    };

    /// Creates a [`BacktraceIdentity`] with [`DEFAULT`](Self::DEFAULT)
    /// settings.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Creates a [`BacktraceIdentity`] configured from the environment.
    ///
    /// See the [crate documentation](crate#environment-variables) for the
    /// variables that are read. They are read once per process.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errnote_backtrace::BacktraceIdentity;
    ///
    /// let identity = BacktraceIdentity::new_from_env();
    /// assert_eq!(identity.skipped_crates, BacktraceIdentity::DEFAULT.skipped_crates);
    /// ```
    pub fn new_from_env() -> Self {
        let env_options = ErrnoteEnvOptions::get();
        Self {
            short_names: env_options.short_names,
            full_symbols: env_options.full_symbols,
            ..Self::DEFAULT
        }
    }

    fn resolve(&self) -> Option<String> {
        let mut found = None;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if found.is_some() {
                    return;
                }
                let Some(name) = symbol.name() else {
                    return;
                };

                let demangled = format!("{name:#}");
                if crate_of(&demangled).is_some_and(|krate| self.skipped_crates.contains(&krate)) {
                    return;
                }

                found = Some(self.format_symbol(&demangled, || name.to_string()));
            });
            found.is_none()
        });

        found
    }

    fn format_symbol(&self, demangled: &str, full: impl FnOnce() -> String) -> String {
        if self.full_symbols {
            return full();
        }
        let path = strip_closures(demangled);
        if self.short_names {
            short_name(path).to_owned()
        } else {
            path.to_owned()
        }
    }
}

impl Default for BacktraceIdentity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CallerIdentity for BacktraceIdentity {
    fn identify(&self, _caller: &Caller) -> Option<String> {
        self.resolve()
    }
}

#[derive(Debug)]
struct ErrnoteEnvOptions {
    full_symbols: bool,
    short_names: bool,
}

impl ErrnoteEnvOptions {
    fn get() -> &'static Self {
        static ERRNOTE_FLAGS: OnceLock<ErrnoteEnvOptions> = OnceLock::new();

        ERRNOTE_FLAGS.get_or_init(|| {
            let mut full_symbols =
                std::env::var_os("RUST_BACKTRACE").is_some_and(|var| var == "full");
            let mut short_names = false;
            if let Some(var) = std::env::var_os("ERRNOTE_BACKTRACE") {
                for v in var.to_string_lossy().split(',') {
                    let v = v.trim();
                    if v.eq_ignore_ascii_case("full_symbols") {
                        full_symbols = true;
                    } else if v.eq_ignore_ascii_case("short_names") {
                        short_names = true;
                    }
                }
            }
            ErrnoteEnvOptions {
                full_symbols,
                short_names,
            }
        })
    }
}

/// The crate a demangled symbol belongs to.
///
/// For trait impls (`<T as Trait>::method`) this is the crate of `T`.
fn crate_of(symbol: &str) -> Option<&str> {
    let path = symbol.trim_start_matches(['<', '&']);
    let (first, _) = path.split_once("::")?;
    Some(first)
}

fn strip_closures(symbol: &str) -> &str {
    static CLOSURE_SUFFIX: OnceLock<regex::Regex> = OnceLock::new();
    let closure_suffix = CLOSURE_SUFFIX.get_or_init(|| {
        // Legacy mangling gives `{{closure}}`, v0 mangling `{closure#N}`
        regex::Regex::new(r"(::\{\{closure\}\}|::\{closure#[0-9]+\})+$")
            .expect("built-in regex pattern for closure suffixes should be valid")
    });

    match closure_suffix.find(symbol) {
        Some(suffix) if suffix.start() > 0 => &symbol[..suffix.start()],
        _ => symbol,
    }
}

/// The last path segment of `symbol`, ignoring `::` inside generic brackets.
fn short_name(symbol: &str) -> &str {
    let mut angle_nesting_level = 0u64;
    let mut segment_start = 0usize;
    let mut previous = '\0';

    for (i, c) in symbol.char_indices() {
        match c {
            '<' => angle_nesting_level = angle_nesting_level.saturating_add(1),
            // `->` inside `fn() -> T` isn't a closing bracket
            '>' if previous != '-' => {
                angle_nesting_level = angle_nesting_level.saturating_sub(1);
            }
            ':' if previous == ':' && angle_nesting_level == 0 => segment_start = i + 1,
            _ => {}
        }
        previous = c;
    }

    let segment = &symbol[segment_start..];
    let ident_len = segment
        .char_indices()
        .find(|&(i, c)| {
            if i == 0 {
                c != '_' && !unicode_ident::is_xid_start(c)
            } else {
                !unicode_ident::is_xid_continue(c)
            }
        })
        .map_or(segment.len(), |(i, _)| i);

    if ident_len == 0 {
        segment
    } else {
        &segment[..ident_len]
    }
}
