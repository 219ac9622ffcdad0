use std::fmt;

use crate::engine::data_types::*;
use crate::QueryError;

#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Long(ColumnVector<i64>),
    Double(ColumnVector<f64>),
}

impl Column {
    pub fn kind(&self) -> KeyKind {
        match self {
            Column::Long(_) => KeyKind::Integral,
            Column::Double(_) => KeyKind::Floating,
        }
    }

    pub fn no_nulls(&self) -> bool {
        match self {
            Column::Long(c) => c.no_nulls,
            Column::Double(c) => c.no_nulls,
        }
    }

    pub fn is_repeating(&self) -> bool {
        match self {
            Column::Long(c) => c.is_repeating,
            Column::Double(c) => c.is_repeating,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Long(c) => c.len(),
            Column::Double(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ColumnVector<i64>> for Column {
    fn from(column: ColumnVector<i64>) -> Column {
        Column::Long(column)
    }
}

impl From<ColumnVector<f64>> for Column {
    fn from(column: ColumnVector<f64>) -> Column {
        Column::Double(column)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Column::Long(c) => write!(f, "Long{}", c),
            Column::Double(c) => write!(f, "Double{}", c),
        }
    }
}

/// A column-major chunk of rows.
///
/// When `selected_in_use` is set, logical row `r` lives at physical position `selected[r]` and
/// only the first `size` entries of `selected` are meaningful.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorizedBatch {
    pub size: usize,
    pub selected_in_use: bool,
    pub selected: Vec<usize>,
    pub cols: Vec<Column>,
}

impl VectorizedBatch {
    pub fn new(size: usize, cols: Vec<Column>) -> VectorizedBatch {
        VectorizedBatch {
            size,
            selected_in_use: false,
            selected: Vec::new(),
            cols,
        }
    }

    pub fn with_selection(mut self, selected: Vec<usize>) -> VectorizedBatch {
        self.size = selected.len();
        self.selected = selected;
        self.selected_in_use = true;
        self
    }

    /// Number of physical positions that must be materialized to cover every logical row.
    pub fn physical_len(&self) -> usize {
        if self.selected_in_use {
            self.selected[..self.size].iter().max().map_or(0, |&max| max + 1)
        } else {
            self.size
        }
    }

    pub fn column(&self, index: usize) -> Result<&Column, QueryError> {
        let count = self.cols.len();
        self.cols.get(index).ok_or_else(|| {
            QueryError::TypeError(format!("Column {} out of range for batch with {} columns", index, count))
        })
    }

    pub fn column_mut(&mut self, index: usize) -> Result<&mut Column, QueryError> {
        let count = self.cols.len();
        self.cols.get_mut(index).ok_or_else(|| {
            QueryError::TypeError(format!("Column {} out of range for batch with {} columns", index, count))
        })
    }
}
