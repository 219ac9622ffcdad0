use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::engine::data_types::KeyKind;

/// Row-mode representation of a single non-null key slot.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum KeyValue {
    Int(i64),
    Float(OrderedFloat<f64>),
}

impl KeyValue {
    pub fn zero(kind: KeyKind) -> KeyValue {
        match kind {
            KeyKind::Integral => KeyValue::Int(0),
            KeyKind::Floating => KeyValue::Float(OrderedFloat(0.0)),
        }
    }

    pub fn set_int(&mut self, value: i64) {
        *self = KeyValue::Int(value);
    }

    pub fn set_float(&mut self, value: f64) {
        *self = KeyValue::Float(OrderedFloat(value));
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyValue::Int(i) => write!(f, "{}", i),
            KeyValue::Float(x) => write!(f, "{:e}", x),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(val: i64) -> Self {
        KeyValue::Int(val)
    }
}

impl From<f64> for KeyValue {
    fn from(val: f64) -> Self {
        KeyValue::Float(OrderedFloat(val))
    }
}
