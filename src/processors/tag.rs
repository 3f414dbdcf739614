//! Attaches a fixed set of tags to each record

use crate::core::{FieldValue, LogRecord, Processor};

/// Merges its tags into `extra["tags"]`
///
/// Tags already present on the record are kept and new ones are appended
/// after them, skipping duplicates.
#[derive(Debug, Clone, Default)]
pub struct TagProcessor {
    tags: Vec<String>,
}

impl TagProcessor {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Processor for TagProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        let mut merged = match record.extra_mut().remove("tags") {
            Some(FieldValue::List(existing)) => existing,
            Some(other) => vec![other],
            None => Vec::with_capacity(self.tags.len()),
        };
        for tag in &self.tags {
            let tag = FieldValue::from(tag.as_str());
            if !merged.contains(&tag) {
                merged.push(tag);
            }
        }
        record.extra_mut().insert("tags", FieldValue::List(merged));
        record
    }
}
