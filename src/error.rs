use alloc::string::String;
use core::fmt;

use triomphe::Arc;

use crate::{
    record::{Layers, Record},
    render::render,
};

/// The error returned by an annotate call.
///
/// Its text (both `Display` and `Debug`) is the JSON rendering of its
/// [`Record`]. The record is kept alongside, so inspecting or re-wrapping an
/// annotated error never has to parse text. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use errnote::{AnnotatedError, Annotator, ErrorSource, Record};
///
/// let error = Annotator::new().annotate(ErrorSource::NIL, &["starting"]);
/// let text = error.to_string();
///
/// // The text alone is enough to get the record back
/// let parsed = AnnotatedError::parse(&text).unwrap();
/// assert_eq!(parsed.record(), error.record());
/// assert_eq!(Record::parse(&text).as_ref(), Some(error.record()));
/// ```
#[derive(Clone)]
pub struct AnnotatedError {
    data: Arc<ErrorData>,
}

struct ErrorData {
    record: Record,
    text: String,
}

impl AnnotatedError {
    /// Creates an error from a finished record.
    pub fn from_record(record: Record) -> Self {
        let text = render(&record);
        Self {
            data: Arc::new(ErrorData { record, text }),
        }
    }

    /// Reads error text produced by any annotator back into an error.
    pub fn parse(text: &str) -> Option<Self> {
        Record::parse(text).map(Self::from_record)
    }

    /// The record behind this error.
    pub fn record(&self) -> &Record {
        &self.data.record
    }

    /// The rendered text of the record.
    pub fn as_str(&self) -> &str {
        &self.data.text
    }

    /// Number of annotation layers.
    pub fn depth(&self) -> usize {
        self.data.record.depth()
    }

    /// Iterates over the annotation layers, outermost first.
    pub fn layers(&self) -> Layers<'_> {
        self.data.record.layers()
    }

    /// The text of the error at the bottom of the chain.
    pub fn root_cause(&self) -> &str {
        self.data.record.root_cause()
    }
}

impl fmt::Display for AnnotatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.text)
    }
}

impl fmt::Debug for AnnotatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.text)
    }
}

impl core::error::Error for AnnotatedError {}

impl PartialEq for AnnotatedError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data.text == other.data.text
    }
}

impl Eq for AnnotatedError {}

impl From<Record> for AnnotatedError {
    fn from(record: Record) -> Self {
        Self::from_record(record)
    }
}

impl From<AnnotatedError> for String {
    fn from(error: AnnotatedError) -> Self {
        match Arc::try_unwrap(error.data) {
            Ok(data) => data.text,
            Err(data) => data.text.clone(),
        }
    }
}
