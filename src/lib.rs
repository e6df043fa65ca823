#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Structured, chainable error annotations.
//!
//! ## Overview
//!
//! `errnote` wraps an underlying failure with the context that was around
//! when it happened: the function that observed it, a snapshot of the
//! arguments it was working with, a free-text message, and whatever error it
//! wrapped. That context is captured in a [`Record`] and rendered to a single
//! line of JSON, which becomes the text of the returned [`AnnotatedError`].
//!
//! Annotating an already annotated error nests the previous record inside
//! the new one, so the text of the outermost error is a complete history of
//! every layer that touched it.
//!
//! ## Quick Example
//!
//! ```
//! use errnote::{Annotator, hooks::Fixed};
//!
//! let annotator = Annotator::new().arg("x").caller_identity(Fixed("pkg.Save"));
//! let error = annotator.annotate(&std::io::Error::other("disk full"), &["writing", "file"]);
//!
//! assert_eq!(
//!     error.to_string(),
//!     r#"{"fn_name":"pkg.Save","args":["\"x\""],"msg":"writing file","inner":"disk full"}"#
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - A [`Record`] holds four fields, `fn_name`, `args`, `msg` and `inner`.
//!   The field names are a compatibility contract: any producer that emits the
//!   same shape can be chained with any consumer that reads it.
//! - [`Inner`] is either a [`Leaf`](Inner::Leaf) (raw error text, or the
//!   `"nil err"` sentinel when there was no error) or a
//!   [`Wrapped`](Inner::Wrapped) record from a previous annotation.
//! - An [`Annotator`] is an immutable snapshot of the arguments of interest at
//!   a call site. Arguments are rendered when they are captured; values that
//!   carry a context or cancellation signal are masked as `"ctx"`.
//! - The [renderer](render) turns values into text, trying JSON first and
//!   falling back to the `Debug` form, so annotation never fails.
//! - The function identity comes from a [`CallerIdentity`] provider. The
//!   [`annotate!`] macro captures the enclosing function path at compile
//!   time; other providers can be set per annotator or installed globally
//!   through [`hooks::Hooks`].
//!
//! ## Macros
//!
//! ```
//! use errnote::prelude::*;
//!
//! #[derive(Debug)]
//! struct Request {
//!     id: u32,
//! }
//!
//! fn save(request: &Request) -> Result<(), AnnotatedError> {
//!     let annotator = annotator![request.id, "profile"];
//!     let error = std::io::Error::other("disk full");
//!     bail_annotated!(annotator, &error, "saving request");
//! }
//!
//! let error = save(&Request { id: 7 }).unwrap_err();
//! assert_eq!(error.record().args(), ["7", "\"profile\""]);
//! assert!(error.record().fn_name().ends_with("save"));
//! ```
//!
//! ## Ecosystem
//!
//! - **`errnote-backtrace`** resolves the caller's symbol name by walking the
//!   stack, for code that calls [`Annotator::annotate`] directly.
//! - **`errnote-tracing`** logs every annotation through `tracing` and can
//!   name callers after the current span.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod hooks;
pub mod prelude;
pub mod render;
pub mod renderers;

mod annotator;
mod arguments;
mod error;
mod record;
mod result_ext;

pub use self::{
    annotator::{Annotator, ErrorSource},
    arguments::{Argument, ContextCarrier},
    error::AnnotatedError,
    hooks::{AnnotationObserver, Caller, CallerIdentity},
    record::{CONTEXT_ARGUMENT, Inner, Layers, NIL_ERROR, Record, UNKNOWN_FUNCTION},
    result_ext::ResultExt,
};

/// A [`Result`](core::result::Result) type alias where the error is
/// [`AnnotatedError`].
///
/// # Examples
///
/// ```
/// fn might_fail() -> errnote::Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T, E = AnnotatedError> = core::result::Result<T, E>;

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use core::{convert::AsRef, result::Result::Err};

    #[doc(hidden)]
    #[inline(always)]
    pub fn type_name_of<T>(_: T) -> &'static str {
        core::any::type_name::<T>()
    }

    #[doc(hidden)]
    #[inline]
    pub fn enclosing_function(anchor_path: &'static str) -> &'static str {
        anchor_path
            .strip_suffix("::__errnote_anchor")
            .unwrap_or(anchor_path)
    }

    #[doc(hidden)]
    pub mod kind {
        use alloc::string::String;

        use crate::{
            Argument,
            renderers::{self, ArgumentRenderer},
        };

        #[doc(hidden)]
        pub struct Wrap<'a, T: ?Sized>(pub &'a T);

        #[doc(hidden)]
        pub trait ContextKind {
            #[inline(always)]
            fn renderer(&self) -> renderers::Context {
                renderers::Context
            }
        }

        impl<T: ?Sized> ContextKind for &&&&Wrap<'_, T>
        where
            renderers::Context: ArgumentRenderer<T>,
        {
        }

        #[doc(hidden)]
        pub trait JsonKind {
            #[inline(always)]
            fn renderer(&self) -> renderers::Json {
                renderers::Json
            }
        }

        impl<T: ?Sized> JsonKind for &&&Wrap<'_, T> where renderers::Json: ArgumentRenderer<T> {}

        #[doc(hidden)]
        pub trait SerializedKind {
            #[inline(always)]
            fn renderer(&self) -> renderers::Serialized {
                renderers::Serialized
            }
        }

        impl<T: ?Sized> SerializedKind for &&Wrap<'_, T>
        where
            renderers::Serialized: ArgumentRenderer<T>,
        {
        }

        #[doc(hidden)]
        pub trait DebugKind {
            #[inline(always)]
            fn renderer(&self) -> renderers::Debug {
                renderers::Debug
            }
        }

        impl<T: ?Sized> DebugKind for &Wrap<'_, T> where renderers::Debug: ArgumentRenderer<T> {}

        #[doc(hidden)]
        pub trait OpaqueKind {
            #[inline(always)]
            fn renderer(&self) -> renderers::Opaque {
                renderers::Opaque
            }
        }

        impl<T: ?Sized> OpaqueKind for Wrap<'_, T> where renderers::Opaque: ArgumentRenderer<T> {}

        #[doc(hidden)]
        #[must_use]
        pub fn macro_helper_argument<R, T>(_renderer: R, value: &T) -> Argument
        where
            R: ArgumentRenderer<T>,
            T: ?Sized,
        {
            R::render(value)
        }

        #[doc(hidden)]
        #[must_use]
        pub fn macro_helper_render<R, T>(_renderer: R, value: &T) -> String
        where
            R: ArgumentRenderer<T>,
            T: ?Sized,
        {
            R::render(value).into_string()
        }
    }
}
