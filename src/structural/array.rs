use serde::Serialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::time::Duration;

use super::record::Record;
use crate::field::{Field, Value};

/// Ordered list of values nested into a [`Record`].
#[derive(Debug, Default)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: Value) -> &mut Self {
        self.items.push(value);
        self
    }

    pub(crate) fn into_items(self) -> Vec<Value> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.push(Value::Str(value.to_string()))
    }

    pub fn strings(&mut self, value: &[&str]) -> &mut Self {
        self.push(Value::Strings(value.iter().map(|s| s.to_string()).collect()))
    }

    pub fn stringer(&mut self, value: &dyn Display) -> &mut Self {
        self.push(Value::Str(value.to_string()))
    }

    pub fn duration(&mut self, value: Duration) -> &mut Self {
        self.push(Value::Duration(value))
    }

    pub fn int(&mut self, value: isize) -> &mut Self {
        self.push(Value::Int(value as i64))
    }

    pub fn int8(&mut self, value: i8) -> &mut Self {
        self.push(Value::Int(value.into()))
    }

    pub fn int16(&mut self, value: i16) -> &mut Self {
        self.push(Value::Int(value.into()))
    }

    pub fn int32(&mut self, value: i32) -> &mut Self {
        self.push(Value::Int(value.into()))
    }

    pub fn int64(&mut self, value: i64) -> &mut Self {
        self.push(Value::Int(value))
    }

    pub fn uint(&mut self, value: usize) -> &mut Self {
        self.push(Value::Uint(value as u64))
    }

    pub fn uint8(&mut self, value: u8) -> &mut Self {
        self.push(Value::Uint(value.into()))
    }

    pub fn uint16(&mut self, value: u16) -> &mut Self {
        self.push(Value::Uint(value.into()))
    }

    pub fn uint32(&mut self, value: u32) -> &mut Self {
        self.push(Value::Uint(value.into()))
    }

    pub fn uint64(&mut self, value: u64) -> &mut Self {
        self.push(Value::Uint(value))
    }

    pub fn float32(&mut self, value: f32) -> &mut Self {
        self.push(Value::Float(value.into()))
    }

    pub fn float64(&mut self, value: f64) -> &mut Self {
        self.push(Value::Float(value))
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.push(Value::Bool(value))
    }

    pub fn error(&mut self, value: &dyn StdError) -> &mut Self {
        self.push(Value::Error(value.to_string()))
    }

    pub fn any<T: Serialize + ?Sized>(&mut self, value: &T) -> &mut Self {
        let Field { value, .. } = Field::any("", value);
        self.push(value)
    }

    pub fn object(&mut self, value: Record) -> &mut Self {
        self.push(value.into_object())
    }

    pub fn array(&mut self, value: Array) -> &mut Self {
        self.push(Value::Array(value.items))
    }
}
