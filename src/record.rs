//! The structured record carried by every annotated error.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::{fmt, iter::FusedIterator};

use serde::{Deserialize, Serialize};

/// Text used for [`Inner::Leaf`] when there was no error to wrap.
pub const NIL_ERROR: &str = "nil err";

/// Function identity used when the caller could not be resolved.
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Rendered form of an argument that carries a context or cancellation
/// signal.
pub const CONTEXT_ARGUMENT: &str = "ctx";

/// One layer of annotation.
///
/// A record is built once per annotate call, rendered to text and never
/// changed afterwards. Its serialized form uses the keys `fn_name`, `args`,
/// `msg` and `inner`, in that order; these names are what lets one layer
/// recognize another when chaining through text.
///
/// # Examples
///
/// ```
/// use errnote::{Inner, Record};
///
/// let record = Record::new(
///     "pkg.Save",
///     vec![r#""x""#.into()],
///     "writing file",
///     Inner::leaf("disk full"),
/// );
/// let text = record.to_text();
/// assert_eq!(
///     text,
///     r#"{"fn_name":"pkg.Save","args":["\"x\""],"msg":"writing file","inner":"disk full"}"#
/// );
/// assert_eq!(Record::parse(&text), Some(record));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    fn_name: String,
    args: Vec<String>,
    msg: String,
    inner: Inner,
}

/// What a [`Record`] wraps.
///
/// Serialized untagged: a leaf is a plain JSON string, a wrapped record is a
/// nested object with the same four keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inner {
    /// The text of an error that was not itself a record, or
    /// [`NIL_ERROR`] when there was no error.
    Leaf(String),
    /// The record of a previous annotation layer.
    Wrapped(Box<Record>),
}

impl Inner {
    /// Creates a leaf from error text.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Creates the leaf used when there was no error to wrap.
    pub fn nil() -> Self {
        Self::Leaf(NIL_ERROR.into())
    }

    /// Returns the nested record, if this wraps one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Leaf(_) => None,
            Self::Wrapped(record) => Some(record),
        }
    }

    /// Returns the leaf text, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Wrapped(_) => None,
        }
    }

    /// Returns `true` for the [`NIL_ERROR`] leaf.
    pub fn is_nil(&self) -> bool {
        self.as_leaf() == Some(NIL_ERROR)
    }
}

impl From<Record> for Inner {
    fn from(record: Record) -> Self {
        Self::Wrapped(Box::new(record))
    }
}

impl Record {
    /// Creates a record from its four fields.
    pub fn new(
        fn_name: impl Into<String>,
        args: Vec<String>,
        msg: impl Into<String>,
        inner: Inner,
    ) -> Self {
        Self {
            fn_name: fn_name.into(),
            args,
            msg: msg.into(),
            inner,
        }
    }

    /// Identity of the function that created this layer.
    pub fn fn_name(&self) -> &str {
        &self.fn_name
    }

    /// Rendered arguments, in call-site order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The joined message fragments; empty when none were given.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// What this layer wraps.
    pub fn inner(&self) -> &Inner {
        &self.inner
    }

    /// Tries to read `text` as a rendered record.
    ///
    /// Only a JSON object carrying all four keys with the right shapes is
    /// accepted; unknown extra keys are ignored. Anything else returns
    /// `None` and is treated as plain error text by the annotator.
    ///
    /// Nested records deeper than the JSON decoder's recursion limit are not
    /// recognized and also return `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Renders the record to its JSON text.
    pub fn to_text(&self) -> String {
        crate::render::render(self)
    }

    /// Number of annotation layers, counting this one.
    pub fn depth(&self) -> usize {
        self.layers().count()
    }

    /// Iterates over the layers from this one down to the innermost.
    pub fn layers(&self) -> Layers<'_> {
        Layers { next: Some(self) }
    }

    /// The leaf text at the bottom of the chain.
    pub fn root_cause(&self) -> &str {
        let mut current = self;
        loop {
            match &current.inner {
                Inner::Leaf(text) => return text,
                Inner::Wrapped(record) => current = record,
            }
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Iterator over the layers of a [`Record`], outermost first.
///
/// Created by [`Record::layers`].
#[must_use]
#[derive(Clone, Debug)]
pub struct Layers<'a> {
    next: Option<&'a Record>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner.as_record();
        Some(current)
    }
}

impl FusedIterator for Layers<'_> {}
