use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use seahash::SeaHasher;

/// Fixed-shape grouping key for a single row: `long_count` integral slots followed by
/// `double_count` floating slots, each with a null flag, plus a cached hash.
///
/// The wrappers owned by a `KeyPlan` are overwritten by every batch. Clone a wrapper before
/// using it as a map key; the clone compares and hashes by its slot contents.
#[derive(Clone, Debug)]
pub struct KeyWrapper {
    long_values: Vec<i64>,
    double_values: Vec<f64>,
    is_null: Vec<bool>,
    hashcode: u64,
}

impl KeyWrapper {
    pub fn new(long_count: usize, double_count: usize) -> KeyWrapper {
        KeyWrapper {
            long_values: vec![0; long_count],
            double_values: vec![0.0; double_count],
            is_null: vec![false; long_count + double_count],
            hashcode: 0,
        }
    }

    pub fn long_count(&self) -> usize {
        self.long_values.len()
    }

    pub fn double_count(&self) -> usize {
        self.double_values.len()
    }

    #[inline]
    pub fn assign_long(&mut self, slot: usize, value: i64) {
        self.long_values[slot] = value;
        self.is_null[slot] = false;
    }

    #[inline]
    pub fn assign_null_long(&mut self, slot: usize) {
        self.long_values[slot] = 0;
        self.is_null[slot] = true;
    }

    #[inline]
    pub fn assign_double(&mut self, slot: usize, value: f64) {
        self.double_values[slot] = value;
        self.is_null[self.long_values.len() + slot] = false;
    }

    #[inline]
    pub fn assign_null_double(&mut self, slot: usize) {
        self.double_values[slot] = 0.0;
        self.is_null[self.long_values.len() + slot] = true;
    }

    /// Computes and caches the hash of the slot contents. Null slots only contribute their flag.
    pub fn set_hash_key(&mut self) {
        let mut hasher = SeaHasher::new();
        let long_count = self.long_values.len();
        for (slot, &value) in self.long_values.iter().enumerate() {
            let null = self.is_null[slot];
            hasher.write_u8(null as u8);
            if !null {
                hasher.write_i64(value);
            }
        }
        for (slot, &value) in self.double_values.iter().enumerate() {
            let null = self.is_null[long_count + slot];
            hasher.write_u8(null as u8);
            if !null {
                OrderedFloat(value).hash(&mut hasher);
            }
        }
        self.hashcode = hasher.finish();
    }

    pub fn hash_code(&self) -> u64 {
        self.hashcode
    }

    /// Null flag by flattened slot position (integral slots first, then floating slots).
    pub fn is_null(&self, flat_slot: usize) -> bool {
        self.is_null[flat_slot]
    }

    pub fn is_null_long(&self, slot: usize) -> bool {
        self.is_null[slot]
    }

    pub fn is_null_double(&self, slot: usize) -> bool {
        self.is_null[self.long_values.len() + slot]
    }

    pub fn long_value(&self, slot: usize) -> i64 {
        self.long_values[slot]
    }

    pub fn double_value(&self, slot: usize) -> f64 {
        self.double_values[slot]
    }
}

impl PartialEq for KeyWrapper {
    fn eq(&self, other: &KeyWrapper) -> bool {
        if self.is_null != other.is_null
            || self.long_values.len() != other.long_values.len()
            || self.double_values.len() != other.double_values.len() {
            return false;
        }
        let long_count = self.long_values.len();
        let longs_eq = (0..long_count)
            .all(|i| self.is_null[i] || self.long_values[i] == other.long_values[i]);
        longs_eq && (0..self.double_values.len()).all(|i| {
            self.is_null[long_count + i]
                || OrderedFloat(self.double_values[i]) == OrderedFloat(other.double_values[i])
        })
    }
}

impl Eq for KeyWrapper {}

impl Hash for KeyWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hashcode);
    }
}

impl fmt::Display for KeyWrapper {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let long_count = self.long_values.len();
        let longs = self.long_values.iter().enumerate().map(|(i, v)| {
            if self.is_null[i] { "null".to_string() } else { v.to_string() }
        });
        let doubles = self.double_values.iter().enumerate().map(|(i, v)| {
            if self.is_null[long_count + i] { "null".to_string() } else { format!("{:e}", v) }
        });
        write!(f, "[{}]", longs.chain(doubles).join(", "))
    }
}
