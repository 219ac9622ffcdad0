use crate::engine::data_types::KeyValue;
use crate::engine::key_plan::{KeyPlan, SlotLookup};
use crate::engine::key_wrapper::KeyWrapper;
use crate::QueryError;

impl KeyPlan {
    /// Row-mode value of key `key_index` in `wrapper`, or `None` if that key is null.
    ///
    /// The returned value lives in a buffer owned by the plan and is overwritten by the next call
    /// for the same key slot.
    pub fn writable_key_value(&mut self, wrapper: &KeyWrapper, key_index: usize) -> Result<Option<&KeyValue>, QueryError> {
        ensure!(wrapper.long_count() == self.long_indices.len() && wrapper.double_count() == self.double_indices.len(),
                "Key wrapper with {} long and {} double slots does not match plan with {} long and {} double keys",
                wrapper.long_count(), wrapper.double_count(), self.long_indices.len(), self.double_indices.len());
        let lookup = lookup(&self.index_lookup, key_index)?;
        write_key_value(lookup, key_index, wrapper, &mut self.long_key_value_output, &mut self.double_key_value_output)
    }

    /// Same as `writable_key_value` for the plan's own wrapper of `row` in the latest batch.
    pub fn writable_row_key_value(&mut self, row: usize, key_index: usize) -> Result<Option<&KeyValue>, QueryError> {
        ensure!(row < self.batch_len, "Row {} out of range for batch of size {}", row, self.batch_len);
        let lookup = lookup(&self.index_lookup, key_index)?;
        write_key_value(lookup, key_index, &self.key_wrappers[row],
                        &mut self.long_key_value_output, &mut self.double_key_value_output)
    }
}

fn lookup(index_lookup: &[SlotLookup], key_index: usize) -> Result<SlotLookup, QueryError> {
    index_lookup.get(key_index).copied().ok_or_else(|| {
        fatal!("Key index {} out of range for {} keys", key_index, index_lookup.len())
    })
}

fn write_key_value<'a>(lookup: SlotLookup,
                       key_index: usize,
                       wrapper: &KeyWrapper,
                       long_output: &'a mut [KeyValue],
                       double_output: &'a mut [KeyValue]) -> Result<Option<&'a KeyValue>, QueryError> {
    match (lookup.long_index, lookup.double_index) {
        (Some(slot), None) => {
            if wrapper.is_null_long(slot) {
                return Ok(None);
            }
            long_output[slot].set_int(wrapper.long_value(slot));
            Ok(Some(&long_output[slot]))
        }
        (None, Some(slot)) => {
            if wrapper.is_null_double(slot) {
                return Ok(None);
            }
            double_output[slot].set_float(wrapper.double_value(slot));
            Ok(Some(&double_output[slot]))
        }
        (long_index, double_index) => Err(fatal!(
            "Internal inconsistent SlotLookup at index [{}]:{:?} {:?}", key_index, long_index, double_index)),
    }
}
