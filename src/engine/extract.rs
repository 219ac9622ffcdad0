use crate::engine::data_types::*;
use crate::engine::key_plan::KeyPlan;
use crate::engine::key_wrapper::KeyWrapper;
use crate::observability::metrics;
use crate::QueryError;

impl KeyPlan {
    /// Evaluates the key expressions on `batch`, copies each row's key values into the key
    /// wrappers `0..batch.size` and computes their hashes.
    ///
    /// The null/repeating/selection shape of each key column is resolved once per column, so
    /// every per-row loop below is free of shape checks.
    pub fn evaluate_batch(&mut self, batch: &mut VectorizedBatch) -> Result<(), QueryError> {
        // Invalidated up front so a failed batch exposes no rows.
        self.batch_len = 0;
        if batch.size > self.key_wrappers.len() {
            return Err(QueryError::BatchOverflow { size: batch.size, capacity: self.key_wrappers.len() });
        }
        if batch.selected_in_use && batch.selected.len() < batch.size {
            return Err(QueryError::TypeError(format!(
                "Selection vector has {} entries for batch of size {}", batch.selected.len(), batch.size)));
        }
        log::trace!("evaluate_batch size={} selected_in_use={}", batch.size, batch.selected_in_use);

        for expr in self.key_expressions.iter_mut() {
            expr.evaluate(batch)?;
        }

        let size = batch.size;
        let wrappers = &mut self.key_wrappers[..size];
        for (slot, &key_index) in self.long_indices.iter().enumerate() {
            let column_index = self.key_expressions[key_index].output_column();
            let column = i64::unwrap(batch.column(column_index)?)?;
            assign_column(wrappers, slot, column, batch.selected_in_use, &batch.selected[..]).map_err(|err| {
                log::error!("Failed to assign long key {}: {}", self.key_expressions[key_index].display(), err);
                err
            })?;
        }
        for (slot, &key_index) in self.double_indices.iter().enumerate() {
            let column_index = self.key_expressions[key_index].output_column();
            let column = f64::unwrap(batch.column(column_index)?)?;
            assign_column(wrappers, slot, column, batch.selected_in_use, &batch.selected[..]).map_err(|err| {
                log::error!("Failed to assign double key {}: {}", self.key_expressions[key_index].display(), err);
                err
            })?;
        }
        for wrapper in wrappers.iter_mut() {
            wrapper.set_hash_key();
        }

        self.batch_len = size;
        if self.opts.collect_metrics {
            metrics::KEY_BATCHES_EXTRACTED.inc();
            metrics::KEY_ROWS_EXTRACTED.inc_by(size as f64);
        }
        Ok(())
    }
}

/// Picks the assignment loop for one key column. `wrappers` holds exactly the batch's rows.
fn assign_column<T: KeyScalar>(wrappers: &mut [KeyWrapper],
                               slot: usize,
                               column: &ColumnVector<T>,
                               selected_in_use: bool,
                               selected: &[usize]) -> Result<(), QueryError> {
    if wrappers.is_empty() {
        return Ok(());
    }
    let selected = &selected[..if selected_in_use { wrappers.len() } else { 0 }];
    let required = if column.is_repeating {
        if column.no_nulls { 1 } else { 0 }
    } else if selected_in_use {
        selected.iter().max().map_or(0, |&max| max + 1)
    } else {
        wrappers.len()
    };
    if column.vector.len() < required {
        bail!(QueryError::TypeError, "{:?} key column has {} values but {} are required for batch of size {}",
              T::t(), column.vector.len(), required, wrappers.len());
    }
    if !column.no_nulls && !column.is_repeating && column.is_null.len() < required {
        bail!(QueryError::TypeError, "{:?} key column has {} null flags but {} are required for batch of size {}",
              T::t(), column.is_null.len(), required, wrappers.len());
    }
    match (column.no_nulls, column.is_repeating, selected_in_use) {
        (true, false, false) => assign_no_nulls_no_repeating_no_selection(wrappers, slot, column),
        (true, false, true) => assign_no_nulls_no_repeating_selection(wrappers, slot, column, selected),
        (true, true, _) => assign_no_nulls_repeating(wrappers, slot, column),
        (false, false, false) => assign_nulls_no_repeating_no_selection(wrappers, slot, column),
        (false, true, _) => assign_nulls_repeating::<T>(wrappers, slot),
        (false, false, true) => assign_nulls_no_repeating_selection(wrappers, slot, column, selected),
        #[allow(unreachable_patterns)]
        (no_nulls, is_repeating, selected_in_use) => {
            return Err(fatal!("Unimplemented {:?} null/repeat/selected combination {}/{}/{}",
                              T::t(), no_nulls, is_repeating, selected_in_use));
        }
    }
    Ok(())
}

#[inline]
fn assign_no_nulls_no_repeating_no_selection<T: KeyScalar>(wrappers: &mut [KeyWrapper], slot: usize, column: &ColumnVector<T>) {
    for (wrapper, &value) in wrappers.iter_mut().zip(column.vector.iter()) {
        T::assign(wrapper, slot, value);
    }
}

#[inline]
fn assign_no_nulls_no_repeating_selection<T: KeyScalar>(wrappers: &mut [KeyWrapper],
                                                        slot: usize,
                                                        column: &ColumnVector<T>,
                                                        selected: &[usize]) {
    for (wrapper, &i) in wrappers.iter_mut().zip(selected.iter()) {
        T::assign(wrapper, slot, column.vector[i]);
    }
}

#[inline]
fn assign_no_nulls_repeating<T: KeyScalar>(wrappers: &mut [KeyWrapper], slot: usize, column: &ColumnVector<T>) {
    let value = column.vector[0];
    for wrapper in wrappers.iter_mut() {
        T::assign(wrapper, slot, value);
    }
}

#[inline]
fn assign_nulls_no_repeating_no_selection<T: KeyScalar>(wrappers: &mut [KeyWrapper], slot: usize, column: &ColumnVector<T>) {
    for (r, wrapper) in wrappers.iter_mut().enumerate() {
        if !column.is_null[r] {
            T::assign(wrapper, slot, column.vector[r]);
        } else {
            T::assign_null(wrapper, slot);
        }
    }
}

#[inline]
fn assign_nulls_repeating<T: KeyScalar>(wrappers: &mut [KeyWrapper], slot: usize) {
    for wrapper in wrappers.iter_mut() {
        T::assign_null(wrapper, slot);
    }
}

#[inline]
fn assign_nulls_no_repeating_selection<T: KeyScalar>(wrappers: &mut [KeyWrapper],
                                                     slot: usize,
                                                     column: &ColumnVector<T>,
                                                     selected: &[usize]) {
    for (wrapper, &i) in wrappers.iter_mut().zip(selected.iter()) {
        // Null flag and value are both read at the physical position.
        if !column.is_null[i] {
            T::assign(wrapper, slot, column.vector[i]);
        } else {
            T::assign_null(wrapper, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrappers(n: usize) -> Vec<KeyWrapper> {
        (0..n).map(|_| KeyWrapper::new(1, 1)).collect()
    }

    #[test]
    fn test_all_shapes_dispatch() {
        for &no_nulls in &[true, false] {
            for &is_repeating in &[true, false] {
                for &selected_in_use in &[true, false] {
                    let mut column = ColumnVector::from_values(vec![1i64, 2, 3]);
                    column.no_nulls = no_nulls;
                    column.is_repeating = is_repeating;
                    let mut kws = wrappers(2);
                    assert_eq!(assign_column(&mut kws, 0, &column, selected_in_use, &[0, 2]), Ok(()));
                }
            }
        }
    }

    #[test]
    fn test_selection_with_nulls_uses_physical_null_flag() {
        let column = ColumnVector::from_options(&[Some(1.0f64), None, Some(3.0), Some(4.0)]);
        let mut kws = wrappers(2);
        assign_column(&mut kws, 0, &column, true, &[2, 1]).unwrap();
        assert!(!kws[0].is_null_double(0));
        assert_eq!(kws[0].double_value(0), 3.0);
        assert!(kws[1].is_null_double(0));
    }

    #[test]
    fn test_no_nulls_column_without_null_flags() {
        let column = ColumnVector { vector: vec![10i64, 20, 30], is_null: vec![], no_nulls: true, is_repeating: false };
        let mut kws = wrappers(3);
        assert_eq!(assign_column(&mut kws, 0, &column, false, &[]), Ok(()));
        assert_eq!(kws.iter().map(|kw| kw.long_value(0)).collect::<Vec<_>>(), vec![10, 20, 30]);
        let mut kws = wrappers(2);
        assert_eq!(assign_column(&mut kws, 0, &column, true, &[2, 0]), Ok(()));
        assert_eq!(kws[0].long_value(0), 30);
    }

    #[test]
    fn test_short_null_flags() {
        let column = ColumnVector { vector: vec![1.0f64, 2.0, 3.0], is_null: vec![false], no_nulls: false, is_repeating: false };
        let mut kws = wrappers(3);
        let err = assign_column(&mut kws, 0, &column, false, &[]).unwrap_err();
        assert_eq!(err, QueryError::TypeError(
            "Floating key column has 1 null flags but 3 are required for batch of size 3".to_string()));
    }

    #[test]
    fn test_selection_past_column_end() {
        let column = ColumnVector::from_values(vec![1i64, 2, 3]);
        let mut kws = wrappers(2);
        let err = assign_column(&mut kws, 0, &column, true, &[0, 7]).unwrap_err();
        assert_eq!(err, QueryError::TypeError(
            "Integral key column has 3 values but 8 are required for batch of size 2".to_string()));
    }

    #[test]
    fn test_null_repeating_without_values() {
        let column = ColumnVector::<i64> { vector: vec![], is_null: vec![], no_nulls: false, is_repeating: true };
        let mut kws = wrappers(2);
        assert_eq!(assign_column(&mut kws, 0, &column, false, &[]), Ok(()));
        assert!(kws.iter().all(|kw| kw.is_null_long(0)));
    }

    #[test]
    fn test_repeating_ignores_selection() {
        let column = ColumnVector::repeating(9i64, 1);
        let mut kws = wrappers(3);
        assign_column(&mut kws, 0, &column, true, &[5, 7, 9]).unwrap();
        assert!(kws.iter().all(|kw| kw.long_value(0) == 9 && !kw.is_null_long(0)));
    }
}
