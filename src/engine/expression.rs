use std::fmt;

use crate::engine::data_types::*;
use crate::QueryError;

pub type BoxedExpression = Box<dyn KeyExpression>;

/// Vectorized expression that produces one grouping key column.
pub trait KeyExpression: fmt::Debug {
    /// Writes the expression result for the logical rows of `batch` into `output_column()`.
    fn evaluate(&mut self, batch: &mut VectorizedBatch) -> Result<(), QueryError>;
    /// Type name of the produced column, e.g. `"bigint"` or `"double"`.
    fn output_type(&self) -> &str;
    fn output_column(&self) -> usize;
    fn display(&self) -> String;
}

/// Key that is an existing column of the batch.
#[derive(Debug)]
pub struct IdentityExpression {
    pub column: usize,
    pub type_name: String,
}

impl IdentityExpression {
    pub fn boxed(column: usize, type_name: &str) -> BoxedExpression {
        Box::new(IdentityExpression { column, type_name: type_name.to_string() })
    }
}

impl KeyExpression for IdentityExpression {
    fn evaluate(&mut self, _: &mut VectorizedBatch) -> Result<(), QueryError> { Ok(()) }
    fn output_type(&self) -> &str { &self.type_name }
    fn output_column(&self) -> usize { self.column }

    fn display(&self) -> String {
        format!("col_{}:{}", self.column, self.type_name)
    }
}

/// Writes a constant (or constant null) as a repeating column.
#[derive(Debug)]
pub struct ConstantExpression<T> {
    pub value: Option<T>,
    pub output: usize,
}

impl<T: KeyScalar> ConstantExpression<T> {
    pub fn boxed(value: Option<T>, output: usize) -> BoxedExpression {
        Box::new(ConstantExpression { value, output })
    }
}

impl<T: KeyScalar> KeyExpression for ConstantExpression<T> {
    fn evaluate(&mut self, batch: &mut VectorizedBatch) -> Result<(), QueryError> {
        let output = T::unwrap_mut(batch.column_mut(self.output)?)?;
        output.set_repeating(self.value);
        Ok(())
    }

    fn output_type(&self) -> &str { T::t().type_name() }
    fn output_column(&self) -> usize { self.output }

    fn display(&self) -> String {
        match self.value {
            Some(v) => format!("col_{} = {}", self.output, v),
            None => format!("col_{} = null", self.output),
        }
    }
}

/// Converts an integral column into a floating column, honouring nulls, repetition and the
/// selection vector. Only the physical positions of logical rows are written.
#[derive(Debug)]
pub struct CastLongToDouble {
    pub input: usize,
    pub output: usize,
}

impl CastLongToDouble {
    pub fn boxed(input: usize, output: usize) -> BoxedExpression {
        Box::new(CastLongToDouble { input, output })
    }
}

impl KeyExpression for CastLongToDouble {
    fn evaluate(&mut self, batch: &mut VectorizedBatch) -> Result<(), QueryError> {
        let size = batch.size;
        if batch.selected_in_use && batch.selected.len() < size {
            bail!(QueryError::TypeError, "Selection vector has {} entries for batch of size {}",
                  batch.selected.len(), size);
        }
        let physical_len = batch.physical_len();
        let (input, output) = input_output(&mut batch.cols, self.input, self.output)?;
        let input = i64::unwrap(input)?;
        let output = f64::unwrap_mut(output)?;

        output.reset();
        if input.is_repeating {
            let value = match (input.no_nulls, input.vector.first()) {
                (false, _) => None,
                (true, Some(&v)) => Some(v as f64),
                (true, None) => bail!(QueryError::TypeError, "Repeating cast input column {} has no value", self.input),
            };
            output.set_repeating(value);
            return Ok(());
        }
        if input.vector.len() < physical_len {
            bail!(QueryError::TypeError, "Cast input column {} has {} values but {} are required",
                  self.input, input.vector.len(), physical_len);
        }
        if !input.no_nulls && input.is_null.len() < physical_len {
            bail!(QueryError::TypeError, "Cast input column {} has {} null flags but {} are required",
                  self.input, input.is_null.len(), physical_len);
        }
        output.ensure_len(physical_len);
        output.no_nulls = input.no_nulls;
        if batch.selected_in_use {
            for &i in &batch.selected[..size] {
                output.vector[i] = input.vector[i] as f64;
                output.is_null[i] = !input.no_nulls && input.is_null[i];
            }
        } else {
            for i in 0..size {
                output.vector[i] = input.vector[i] as f64;
                output.is_null[i] = !input.no_nulls && input.is_null[i];
            }
        }
        Ok(())
    }

    fn output_type(&self) -> &str { "double" }
    fn output_column(&self) -> usize { self.output }

    fn display(&self) -> String {
        format!("col_{} = double(col_{})", self.output, self.input)
    }
}

fn input_output(cols: &mut [Column], input: usize, output: usize) -> Result<(&Column, &mut Column), QueryError> {
    let count = cols.len();
    if input == output || input >= count || output >= count {
        return Err(QueryError::TypeError(format!(
            "Invalid input/output columns {}/{} for batch with {} columns", input, output, count)));
    }
    if input < output {
        let (head, tail) = cols.split_at_mut(output);
        Ok((&head[input], &mut tail[0]))
    } else {
        let (head, tail) = cols.split_at_mut(input);
        Ok((&tail[0], &mut head[output]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_with_selection_writes_physical_positions() {
        let mut batch = VectorizedBatch::new(4, vec![
            ColumnVector::from_options(&[Some(1i64), None, Some(3), Some(4)]).into(),
            ColumnVector::<f64>::new(0).into(),
        ]).with_selection(vec![1, 2]);
        CastLongToDouble::boxed(0, 1).evaluate(&mut batch).unwrap();
        let output = f64::unwrap(&batch.cols[1]).unwrap();
        assert!(!output.no_nulls);
        assert_eq!(output.get(1), None);
        assert_eq!(output.get(2), Some(3.0));
    }

    #[test]
    fn test_cast_short_input() {
        let mut batch = VectorizedBatch::new(4, vec![
            ColumnVector::from_values(vec![1i64, 2]).into(),
            ColumnVector::<f64>::new(4).into(),
        ]);
        let err = CastLongToDouble::boxed(0, 1).evaluate(&mut batch).unwrap_err();
        assert_eq!(err, QueryError::TypeError("Cast input column 0 has 2 values but 4 are required".to_string()));

        let mut batch = VectorizedBatch::new(4, vec![
            ColumnVector::from_values(vec![1i64, 2, 3]).into(),
            ColumnVector::<f64>::new(0).into(),
        ]).with_selection(vec![0, 5]);
        let err = CastLongToDouble::boxed(0, 1).evaluate(&mut batch).unwrap_err();
        assert!(matches!(err, QueryError::TypeError(_)));
    }

    #[test]
    fn test_cast_no_nulls_input_without_null_flags() {
        let mut batch = VectorizedBatch::new(2, vec![
            ColumnVector { vector: vec![7i64, 8], is_null: vec![], no_nulls: true, is_repeating: false }.into(),
            ColumnVector::<f64>::new(0).into(),
        ]);
        CastLongToDouble::boxed(0, 1).evaluate(&mut batch).unwrap();
        let output = f64::unwrap(&batch.cols[1]).unwrap();
        assert_eq!(output.get(1), Some(8.0));
    }

    #[test]
    fn test_cast_repeating() {
        let mut batch = VectorizedBatch::new(3, vec![
            ColumnVector::<f64>::new(3).into(),
            ColumnVector::repeating(5i64, 3).into(),
        ]);
        CastLongToDouble::boxed(1, 0).evaluate(&mut batch).unwrap();
        let output = f64::unwrap(&batch.cols[0]).unwrap();
        assert!(output.is_repeating);
        assert_eq!(output.get(2), Some(5.0));
    }

    #[test]
    fn test_constant_null_is_repeating_null() {
        let mut batch = VectorizedBatch::new(2, vec![ColumnVector::<i64>::new(2).into()]);
        ConstantExpression::<i64>::boxed(None, 0).evaluate(&mut batch).unwrap();
        assert!(!batch.cols[0].no_nulls());
        assert!(batch.cols[0].is_repeating());
    }

    #[test]
    fn test_constant_wrong_column_kind() {
        let mut batch = VectorizedBatch::new(2, vec![ColumnVector::<i64>::new(2).into()]);
        let err = ConstantExpression::<f64>::boxed(Some(1.0), 0).evaluate(&mut batch).unwrap_err();
        assert!(matches!(err, QueryError::TypeError(_)));
    }
}
