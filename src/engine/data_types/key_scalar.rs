use std::fmt;

use crate::engine::data_types::*;
use crate::engine::key_wrapper::KeyWrapper;
use crate::QueryError;

/// Scalar kinds that can be stored in a key wrapper slot.
pub trait KeyScalar: Copy + Default + PartialEq + fmt::Debug + fmt::Display + 'static {
    fn t() -> KeyKind;
    fn unwrap(column: &Column) -> Result<&ColumnVector<Self>, QueryError>;
    fn unwrap_mut(column: &mut Column) -> Result<&mut ColumnVector<Self>, QueryError>;
    fn assign(wrapper: &mut KeyWrapper, slot: usize, value: Self);
    fn assign_null(wrapper: &mut KeyWrapper, slot: usize);
}

fn type_error(expected: KeyKind, column: &Column) -> QueryError {
    QueryError::TypeError(format!("Expected {} column, found {}", expected, column.kind()))
}

impl KeyScalar for i64 {
    fn t() -> KeyKind { KeyKind::Integral }

    fn unwrap(column: &Column) -> Result<&ColumnVector<i64>, QueryError> {
        match column {
            Column::Long(c) => Ok(c),
            _ => Err(type_error(KeyKind::Integral, column)),
        }
    }

    fn unwrap_mut(column: &mut Column) -> Result<&mut ColumnVector<i64>, QueryError> {
        match column {
            Column::Long(c) => Ok(c),
            _ => Err(type_error(KeyKind::Integral, column)),
        }
    }

    #[inline]
    fn assign(wrapper: &mut KeyWrapper, slot: usize, value: i64) { wrapper.assign_long(slot, value) }

    #[inline]
    fn assign_null(wrapper: &mut KeyWrapper, slot: usize) { wrapper.assign_null_long(slot) }
}

impl KeyScalar for f64 {
    fn t() -> KeyKind { KeyKind::Floating }

    fn unwrap(column: &Column) -> Result<&ColumnVector<f64>, QueryError> {
        match column {
            Column::Double(c) => Ok(c),
            _ => Err(type_error(KeyKind::Floating, column)),
        }
    }

    fn unwrap_mut(column: &mut Column) -> Result<&mut ColumnVector<f64>, QueryError> {
        match column {
            Column::Double(c) => Ok(c),
            _ => Err(type_error(KeyKind::Floating, column)),
        }
    }

    #[inline]
    fn assign(wrapper: &mut KeyWrapper, slot: usize, value: f64) { wrapper.assign_double(slot, value) }

    #[inline]
    fn assign_null(wrapper: &mut KeyWrapper, slot: usize) { wrapper.assign_null_double(slot) }
}
