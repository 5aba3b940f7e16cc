use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::field::{fields_to_json, Field, Value};
use crate::level::Level;

/// One finished log entry as handed to a backend.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Dotted scope name, e.g. `table.pool.session`.
    pub logger: String,
    pub message: String,
    #[serde(serialize_with = "serialize_fields")]
    pub fields: Vec<Field>,
    pub service_name: Option<String>,
}

impl LogRecord {
    /// First field with the given key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level,
            "logger": self.logger,
            "message": self.message,
            "fields": fields_to_json(&self.fields),
            "service_name": self.service_name,
        })
    }
}

fn serialize_fields<S: Serializer>(fields: &[Field], serializer: S) -> Result<S::Ok, S::Error> {
    fields_to_json(fields).serialize(serializer)
}
