use serde::Serialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::mem;
use std::time::Duration;

use super::array::Array;
use super::pool::RecordPool;
use crate::field::{Field, Value};
use crate::level::Level;
use crate::logger::Logger;

/// Fields of one pending log entry.
///
/// Bound records come from [`super::StructuralLogger`]'s level methods and
/// are emitted by [`Record::message`]. Unbound records come from
/// [`super::StructuralLogger::object`] and only serve as nested objects.
/// Either way the buffer goes back to the pool exactly once.
pub struct Record {
    logger: Option<Logger>,
    level: Level,
    fields: Vec<Field>,
    pool: RecordPool,
    finalized: bool,
}

impl Record {
    pub(crate) fn new(logger: Option<Logger>, level: Level, pool: &RecordPool) -> Self {
        Record { logger, level, fields: pool.acquire(), pool: pool.clone(), finalized: false }
    }

    fn push(&mut self, key: &str, value: Value) -> &mut Self {
        self.push_field(Field::new(key, value))
    }

    fn push_field(&mut self, field: Field) -> &mut Self {
        if !self.finalized {
            self.fields.push(field);
        }
        self
    }

    pub fn string(&mut self, key: &str, value: &str) -> &mut Self {
        self.push(key, Value::Str(value.to_string()))
    }

    pub fn strings(&mut self, key: &str, value: &[&str]) -> &mut Self {
        self.push(key, Value::Strings(value.iter().map(|s| s.to_string()).collect()))
    }

    pub fn stringer(&mut self, key: &str, value: &dyn Display) -> &mut Self {
        self.push(key, Value::Str(value.to_string()))
    }

    pub fn duration(&mut self, key: &str, value: Duration) -> &mut Self {
        self.push(key, Value::Duration(value))
    }

    pub fn int(&mut self, key: &str, value: isize) -> &mut Self {
        self.push(key, Value::Int(value as i64))
    }

    pub fn int8(&mut self, key: &str, value: i8) -> &mut Self {
        self.push(key, Value::Int(value.into()))
    }

    pub fn int16(&mut self, key: &str, value: i16) -> &mut Self {
        self.push(key, Value::Int(value.into()))
    }

    pub fn int32(&mut self, key: &str, value: i32) -> &mut Self {
        self.push(key, Value::Int(value.into()))
    }

    pub fn int64(&mut self, key: &str, value: i64) -> &mut Self {
        self.push(key, Value::Int(value))
    }

    pub fn uint(&mut self, key: &str, value: usize) -> &mut Self {
        self.push(key, Value::Uint(value as u64))
    }

    pub fn uint8(&mut self, key: &str, value: u8) -> &mut Self {
        self.push(key, Value::Uint(value.into()))
    }

    pub fn uint16(&mut self, key: &str, value: u16) -> &mut Self {
        self.push(key, Value::Uint(value.into()))
    }

    pub fn uint32(&mut self, key: &str, value: u32) -> &mut Self {
        self.push(key, Value::Uint(value.into()))
    }

    pub fn uint64(&mut self, key: &str, value: u64) -> &mut Self {
        self.push(key, Value::Uint(value))
    }

    pub fn float32(&mut self, key: &str, value: f32) -> &mut Self {
        self.push(key, Value::Float(value.into()))
    }

    pub fn float64(&mut self, key: &str, value: f64) -> &mut Self {
        self.push(key, Value::Float(value))
    }

    pub fn bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.push(key, Value::Bool(value))
    }

    /// Error under the `error` key.
    pub fn error(&mut self, value: &dyn StdError) -> &mut Self {
        self.named_error("error", value)
    }

    pub fn named_error(&mut self, key: &str, value: &dyn StdError) -> &mut Self {
        self.push(key, Value::Error(value.to_string()))
    }

    pub fn any<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> &mut Self {
        self.push_field(Field::any(key, value))
    }

    /// Nest `value`'s fields under `key`. Its buffer goes back to the pool.
    pub fn object(&mut self, key: &str, value: Record) -> &mut Self {
        self.push(key, value.into_object())
    }

    pub fn array(&mut self, key: &str, value: Array) -> &mut Self {
        self.push(key, Value::Array(value.into_items()))
    }

    pub(crate) fn into_object(mut self) -> Value {
        Value::Object(self.fields.drain(..).collect())
    }

    /// Emit the accumulated fields with `msg` and recycle the buffer.
    ///
    /// Does nothing on an unbound or already finalized record. Setters
    /// called after finalization are ignored.
    pub fn message(&mut self, msg: &str) {
        let Some(logger) = self.logger.take() else {
            return;
        };
        self.finalized = true;
        logger.emit(self.level, msg, self.fields.drain(..));
        self.pool.release(mem::take(&mut self.fields));
    }
}

impl Drop for Record {
    fn drop(&mut self) {
        if !self.finalized {
            self.pool.release(mem::take(&mut self.fields));
        }
    }
}
