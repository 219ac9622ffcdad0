use std::cmp::min;
use std::fmt;
use std::fmt::Write;

use itertools::Itertools;

/// Columnar buffer of one scalar kind.
///
/// `is_null` is only consulted when `no_nulls` is false and may be empty otherwise. When
/// `is_repeating` is set, position 0 holds the value (or null) of every logical row.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnVector<T> {
    pub vector: Vec<T>,
    pub is_null: Vec<bool>,
    pub no_nulls: bool,
    pub is_repeating: bool,
}

impl<T: Copy + Default> ColumnVector<T> {
    pub fn new(len: usize) -> ColumnVector<T> {
        ColumnVector {
            vector: vec![T::default(); len],
            is_null: vec![false; len],
            no_nulls: true,
            is_repeating: false,
        }
    }

    pub fn from_values(values: Vec<T>) -> ColumnVector<T> {
        let len = values.len();
        ColumnVector {
            vector: values,
            is_null: vec![false; len],
            no_nulls: true,
            is_repeating: false,
        }
    }

    pub fn from_options(values: &[Option<T>]) -> ColumnVector<T> {
        let vector = values.iter().map(|v| v.unwrap_or_default()).collect();
        let is_null: Vec<bool> = values.iter().map(Option::is_none).collect();
        let no_nulls = !is_null.iter().any(|&n| n);
        ColumnVector {
            vector,
            is_null,
            no_nulls,
            is_repeating: false,
        }
    }

    pub fn repeating(value: T, len: usize) -> ColumnVector<T> {
        let mut column = ColumnVector::new(len.max(1));
        column.set_repeating(Some(value));
        column
    }

    pub fn null_repeating(len: usize) -> ColumnVector<T> {
        let mut column = ColumnVector::new(len.max(1));
        column.set_repeating(None);
        column
    }

    pub fn len(&self) -> usize {
        self.vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    /// Turns the column into a repeating column in place, without reallocating.
    pub fn set_repeating(&mut self, value: Option<T>) {
        if self.vector.is_empty() {
            self.vector.push(T::default());
            self.is_null.push(false);
        }
        self.is_repeating = true;
        match value {
            Some(value) => {
                self.vector[0] = value;
                self.is_null[0] = false;
                self.no_nulls = true;
            }
            None => {
                self.vector[0] = T::default();
                self.is_null[0] = true;
                self.no_nulls = false;
            }
        }
    }

    /// Clears all flags so the buffer can be written as a fresh, dense column.
    pub fn reset(&mut self) {
        self.no_nulls = true;
        self.is_repeating = false;
        for n in self.is_null.iter_mut() {
            *n = false;
        }
    }

    /// Grows the buffers to at least `len` physical positions.
    pub fn ensure_len(&mut self, len: usize) {
        if self.vector.len() < len {
            self.vector.resize(len, T::default());
            self.is_null.resize(len, false);
        }
    }

    /// Value at physical position `index`, resolving repetition and nulls.
    pub fn get(&self, index: usize) -> Option<T> {
        let index = if self.is_repeating { 0 } else { index };
        if !self.no_nulls && self.is_null[index] {
            None
        } else {
            Some(self.vector[index])
        }
    }
}

impl<T: Copy + Default + fmt::Display> fmt::Display for ColumnVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shown = if self.is_repeating { min(1, self.len()) } else { min(16, self.len()) };
        let mut s = String::new();
        if self.is_repeating {
            write!(s, "repeating ")?;
        }
        write!(s, "[{}", (0..shown)
            .map(|i| match self.get(i) {
                Some(v) => format!("{}", v),
                None => "null".to_string(),
            })
            .join(", "))?;
        if shown < self.len() && !self.is_repeating {
            write!(s, ", ...] ({} more)", self.len() - shown)?;
        } else {
            write!(s, "]")?;
        }
        write!(f, "{}", s)
    }
}
