use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::record::{CollectionSchema, Record};

/// Sortable UTC timestamp with microsecond precision and no offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Server-side values assigned once per logical create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStamp {
    pub id: Uuid,
    pub issued_at: DateTime<Utc>,
}

impl RecordStamp {
    pub fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
        }
    }

    pub fn formatted_time(&self) -> String {
        self.issued_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Places the identifier first, then the validated fields, then the
    /// schema's timestamp and status. Any caller value under a derived
    /// field name is overwritten.
    pub fn apply(&self, schema: &CollectionSchema, fields: Record) -> Record {
        let mut record = Record::new();
        record.insert(schema.id_field.to_string(), Value::from(self.id.to_string()));

        for (name, value) in fields {
            if !schema.is_derived(&name) {
                record.insert(name, value);
            }
        }

        if let Some(field) = schema.timestamp_field {
            record.insert(field.to_string(), Value::from(self.formatted_time()));
        }
        if let Some((field, status)) = schema.status_field {
            record.insert(field.to_string(), Value::from(status));
        }

        record
    }
}
