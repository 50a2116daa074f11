use crate::nefsort_core::error::{NefsortError, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use time::PrimitiveDateTime;

/// Field holding the capture timestamp in exiftool's human-readable output.
pub const CREATE_DATE_FIELD: &str = "Create Date";

/// Date format used in EXIF data.
pub const EXIF_DATE_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

/// A single metadata value. Labels that appear more than once keep every
/// value in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl MetadataValue {
    fn push(&mut self, value: String) {
        match self {
            MetadataValue::Scalar(existing) => {
                let first = std::mem::take(existing);
                *self = MetadataValue::Multi(vec![first, value]);
            }
            MetadataValue::Multi(values) => values.push(value),
        }
    }
}

/// Label -> value mapping parsed from one file's metadata dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    fields: HashMap<String, MetadataValue>,
}

impl MetadataRecord {
    pub fn get(&self, label: &str) -> Option<&MetadataValue> {
        self.fields.get(label)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, label: String, value: String) {
        match self.fields.entry(label) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(MetadataValue::Scalar(value));
            }
        }
    }
}

impl FromIterator<(String, MetadataValue)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (String, MetadataValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parse exiftool's `Label : Value` output into a record.
///
/// Only the first colon separates label from value, so values such as
/// timestamps keep their own colons. A line without any colon is an error.
pub fn parse_exif(raw_stdout: &str) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::default();

    for (index, row) in raw_stdout.lines().enumerate() {
        let Some((label, value)) = row.split_once(':') else {
            return Err(NefsortError::MalformedMetadataLine {
                line_number: index + 1,
                line: row.to_string(),
            });
        };
        record.insert(label.trim().to_string(), value.trim().to_string());
    }

    Ok(record)
}

/// Extract the capture timestamp from a record.
///
/// When the date label was repeated, the first occurrence wins. The value is
/// naive local time; no offset is applied.
pub fn get_image_datetime(record: &MetadataRecord) -> Result<PrimitiveDateTime> {
    let create_date = match record.get(CREATE_DATE_FIELD) {
        Some(MetadataValue::Scalar(value)) => value.as_str(),
        Some(MetadataValue::Multi(values)) => match values.first() {
            Some(value) => value.as_str(),
            None => return Err(NefsortError::MissingDateField(CREATE_DATE_FIELD.to_string())),
        },
        None => return Err(NefsortError::MissingDateField(CREATE_DATE_FIELD.to_string())),
    };

    PrimitiveDateTime::parse(create_date, EXIF_DATE_FORMAT).map_err(|e| {
        NefsortError::InvalidDateFormat {
            value: create_date.to_string(),
            reason: e.to_string(),
        }
    })
}
