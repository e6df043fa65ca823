//! Renderers that decide how a captured value becomes an [`Argument`].
//!
//! A renderer is a type implementing [`ArgumentRenderer<T>`] for the value
//! types it can handle. The [`arg!`](crate::arg!) and
//! [`render!`](crate::render!) macros pick one automatically, preferring
//! them in the order they are listed here:
//!
//! - [`Context`]: values implementing [`ContextCarrier`], masked as `"ctx"`.
//! - [`Json`]: `Serialize + Debug` values, JSON with a `Debug` fallback.
//! - [`Serialized`]: `Serialize` values without `Debug`, JSON with a type
//!   name fallback.
//! - [`struct@Debug`]: `Debug` values, in their `Debug` form.
//! - [`Opaque`]: any value, as `An object of type <name>`.
//!
//! A renderer can also be chosen explicitly:
//!
//! ```
//! use errnote::renderers::{ArgumentRenderer, Debug};
//!
//! let argument = Debug::render("x");
//! assert_eq!(argument.as_str(), r#""x""#);
//! ```

use serde::Serialize;

use crate::{
    Argument, ContextCarrier,
    render::{render, render_debug, render_opaque, render_serialized},
};

/// Turns a value of type `T` into an [`Argument`].
pub trait ArgumentRenderer<T: ?Sized> {
    /// Renders `value`.
    fn render(value: &T) -> Argument;
}

/// Renderer masking [`ContextCarrier`] values.
#[derive(Copy, Clone, Debug)]
pub struct Context;

impl<T> ArgumentRenderer<T> for Context
where
    T: ContextCarrier + ?Sized,
{
    fn render(_value: &T) -> Argument {
        Argument::Context
    }
}

/// Renderer for `Serialize + Debug` values, see [`render`].
#[derive(Copy, Clone, Debug)]
pub struct Json;

impl<T> ArgumentRenderer<T> for Json
where
    T: Serialize + core::fmt::Debug + ?Sized,
{
    fn render(value: &T) -> Argument {
        Argument::Rendered(render(value))
    }
}

/// Renderer for `Serialize` values without `Debug`, see
/// [`render_serialized`].
#[derive(Copy, Clone, Debug)]
pub struct Serialized;

impl<T> ArgumentRenderer<T> for Serialized
where
    T: Serialize + ?Sized,
{
    fn render(value: &T) -> Argument {
        Argument::Rendered(render_serialized(value))
    }
}

/// Renderer for `Debug` values, see [`render_debug`].
#[derive(Copy, Clone, Debug)]
pub struct Debug;

impl<T> ArgumentRenderer<T> for Debug
where
    T: core::fmt::Debug + ?Sized,
{
    fn render(value: &T) -> Argument {
        Argument::Rendered(render_debug(value))
    }
}

/// Renderer for values with no usable representation, see
/// [`render_opaque`].
#[derive(Copy, Clone, Debug)]
pub struct Opaque;

impl<T: ?Sized> ArgumentRenderer<T> for Opaque {
    fn render(_value: &T) -> Argument {
        Argument::Rendered(render_opaque::<T>())
    }
}
