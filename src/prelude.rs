//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use errnote::prelude::*;
//!
//! fn divide(a: i32, b: i32) -> Result<i32, AnnotatedError> {
//!     if b == 0 {
//!         bail_annotated!(annotator![a, b], ErrorSource::NIL, "cannot divide by zero");
//!     }
//!     Ok(a / b)
//! }
//!
//! assert_eq!(divide(10, 2).unwrap(), 5);
//! assert_eq!(divide(1, 0).unwrap_err().record().args(), ["1", "0"]);
//! ```
//!
//! # What's Included
//!
//! - **[`Annotator`]**, **[`AnnotatedError`]** and **[`ErrorSource`]**: the
//!   types an annotate call takes and returns
//! - **[`ResultExt`]**: extension methods for `Result` types
//! - **[`Record`]** and **[`Inner`]**: for inspecting annotations
//! - **[`annotate!`]**, **[`bail_annotated!`]**, **[`annotator!`]**,
//!   **[`arg!`]** and **[`render!`]**

pub use crate::{
    AnnotatedError, Annotator, Argument, Caller, ContextCarrier, ErrorSource, Inner, Record,
    ResultExt, annotate, annotator, arg, bail_annotated, render,
};
