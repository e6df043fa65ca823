//! Value to text rendering with a fallback that never fails.
//!
//! The renderer is used for every argument the [`Annotator`] captures and for
//! the final [`Record`]. It tries structured JSON first. When the JSON encoder
//! rejects a value (a map with non-string keys, a `Serialize` impl that
//! errors), the `Debug` form is used instead. When even that is unavailable
//! or comes out empty, the type name is used. Callers always get a non-empty
//! string back.
//!
//! For values whose traits are not known up front, use the [`render!`]
//! macro, which picks the strongest form available at compile time.
//!
//! [`Annotator`]: crate::Annotator
//! [`Record`]: crate::Record
//! [`render!`]: crate::render!
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use errnote::render::render;
//!
//! assert_eq!(render("x"), r#""x""#);
//!
//! // JSON object keys must be strings, so this falls back to `Debug`.
//! let grid = BTreeMap::from([((0, 1), "a")]);
//! assert_eq!(render(&grid), r#"{(0, 1): "a"}"#);
//! ```

use alloc::{format, string::String};
use core::fmt::{self, Write};

use serde::Serialize;

/// Renders `value` as JSON, falling back to its `Debug` form.
pub fn render<T>(value: &T) -> String
where
    T: Serialize + fmt::Debug + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(text) if !text.is_empty() => text,
        _ => render_debug(value),
    }
}

/// Renders a value that has no `Debug` form as JSON.
///
/// When the JSON encoder rejects it, there is nothing else to show and the
/// type name is used, as in [`render_opaque`].
pub fn render_serialized<T>(value: &T) -> String
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(text) if !text.is_empty() => text,
        _ => render_opaque::<T>(),
    }
}

/// Renders `value` with its `Debug` form, the fallback used by [`render`].
///
/// A `Debug` implementation that fails or writes nothing is replaced by
/// [`render_opaque`].
pub fn render_debug<T>(value: &T) -> String
where
    T: fmt::Debug + ?Sized,
{
    let mut text = String::new();
    match write!(text, "{value:?}") {
        Ok(()) if !text.is_empty() => text,
        _ => render_opaque::<T>(),
    }
}

/// Renders a placeholder naming the type, for values with no other
/// representation.
pub fn render_opaque<T: ?Sized>() -> String {
    format!("An object of type {}", core::any::type_name::<T>())
}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeMap, vec};

    use serde::Serializer;

    use super::*;

    struct Rejected;

    impl Serialize for Rejected {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    impl fmt::Debug for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Rejected {{ .. }}")
        }
    }

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    struct Silent;

    impl fmt::Debug for Silent {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    struct Broken;

    impl fmt::Debug for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_json_forms() {
        assert_eq!(render("x"), r#""x""#);
        assert_eq!(render(&42u8), "42");
        assert_eq!(render(&vec!["a", "b"]), r#"["a","b"]"#);
        assert_eq!(render(&Option::<u8>::None), "null");
        assert_eq!(render(""), r#""""#);
    }

    #[test]
    fn test_falls_back_to_debug() {
        assert_eq!(render(&Rejected), "Rejected { .. }");

        let mut map = BTreeMap::new();
        map.insert((1, 2), 3);
        assert_eq!(render(&map), "{(1, 2): 3}");
    }

    #[test]
    fn test_serialized_without_debug() {
        assert_eq!(render_serialized(&Point { x: 1, y: 2 }), r#"{"x":1,"y":2}"#);

        struct Unrepresentable;

        impl Serialize for Unrepresentable {
            fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("no"))
            }
        }

        assert!(render_serialized(&Unrepresentable).ends_with("Unrepresentable"));
    }

    #[test]
    fn test_empty_or_failing_debug_uses_type_name() {
        assert!(render_debug(&Silent).starts_with("An object of type"));
        assert!(render_debug(&Broken).ends_with("Broken"));
    }

    #[test]
    fn test_opaque_names_type() {
        assert_eq!(render_opaque::<u32>(), "An object of type u32");
        assert!(!render_opaque::<str>().is_empty());
    }

    #[test]
    fn test_non_finite_floats_render() {
        // serde_json encodes these as `null` rather than failing
        assert_eq!(render(&f64::NAN), "null");
        assert_eq!(render(&1.5f64), "1.5");
    }
}
