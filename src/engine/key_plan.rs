use std::fmt;

use itertools::Itertools;

use crate::engine::data_types::*;
use crate::engine::expression::BoxedExpression;
use crate::engine::key_wrapper::KeyWrapper;
use crate::observability::metrics;
use crate::options::Options;
use crate::QueryError;

/// Position of one key expression inside the key wrappers. Exactly one slot is present for a
/// plan produced by `KeyPlan::compile`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct SlotLookup {
    pub long_index: Option<usize>,
    pub double_index: Option<usize>,
}

/// Compiled key layout for one query together with the buffers reused for every batch.
#[derive(Debug)]
pub struct KeyPlan {
    pub(crate) key_expressions: Vec<BoxedExpression>,
    pub(crate) long_indices: Vec<usize>,
    pub(crate) double_indices: Vec<usize>,
    pub(crate) index_lookup: Vec<SlotLookup>,
    // Mutable and overwritten by every batch. Never use these as map keys, clone them first.
    pub(crate) key_wrappers: Vec<KeyWrapper>,
    pub(crate) long_key_value_output: Vec<KeyValue>,
    pub(crate) double_key_value_output: Vec<KeyValue>,
    pub(crate) batch_len: usize,
    pub(crate) opts: Options,
}

impl KeyPlan {
    /// Classifies the key expressions by output kind and preallocates all buffers.
    ///
    /// This runs once per query. Nothing computed here depends on the batches that follow.
    pub fn compile(key_expressions: Vec<BoxedExpression>, opts: &Options) -> Result<KeyPlan, QueryError> {
        opts.validate()?;
        let mut long_indices = Vec::with_capacity(key_expressions.len());
        let mut double_indices = Vec::with_capacity(key_expressions.len());
        let mut index_lookup = Vec::with_capacity(key_expressions.len());

        for (i, expr) in key_expressions.iter().enumerate() {
            let kind = KeyKind::from_type_name(expr.output_type()).map_err(|err| {
                log::warn!("Cannot group by {}: {}", expr.display(), err);
                err
            })?;
            let lookup = match kind {
                KeyKind::Integral => {
                    long_indices.push(i);
                    SlotLookup { long_index: Some(long_indices.len() - 1), double_index: None }
                }
                KeyKind::Floating => {
                    double_indices.push(i);
                    SlotLookup { long_index: None, double_index: Some(double_indices.len() - 1) }
                }
            };
            index_lookup.push(lookup);
        }
        long_indices.shrink_to_fit();
        double_indices.shrink_to_fit();

        let long_count = long_indices.len();
        let double_count = double_indices.len();
        let key_wrappers = (0..opts.batch_capacity)
            .map(|_| KeyWrapper::new(long_count, double_count))
            .collect();
        let plan = KeyPlan {
            long_key_value_output: vec![KeyValue::zero(KeyKind::Integral); long_count],
            double_key_value_output: vec![KeyValue::zero(KeyKind::Floating); double_count],
            key_expressions,
            long_indices,
            double_indices,
            index_lookup,
            key_wrappers,
            batch_len: 0,
            opts: opts.clone(),
        };
        log::debug!("Compiled key plan {} (capacity {})", plan, opts.batch_capacity);
        if opts.collect_metrics {
            metrics::KEY_PLANS_COMPILED.inc();
        }
        Ok(plan)
    }

    /// Key wrappers for the rows of the most recent batch.
    pub fn key_wrappers(&self) -> &[KeyWrapper] {
        &self.key_wrappers[..self.batch_len]
    }

    pub fn key_wrapper(&self, row: usize) -> Option<&KeyWrapper> {
        self.key_wrappers().get(row)
    }

    pub fn capacity(&self) -> usize {
        self.key_wrappers.len()
    }

    pub fn key_count(&self) -> usize {
        self.key_expressions.len()
    }

    pub fn long_indices(&self) -> &[usize] {
        &self.long_indices
    }

    pub fn double_indices(&self) -> &[usize] {
        &self.double_indices
    }

    pub fn index_lookup(&self) -> &[SlotLookup] {
        &self.index_lookup
    }
}

impl fmt::Display for KeyPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keys = self.key_expressions.iter().zip(self.index_lookup.iter())
            .map(|(expr, lookup)| match (lookup.long_index, lookup.double_index) {
                (Some(slot), _) => format!("long[{}] <- {}", slot, expr.display()),
                (_, Some(slot)) => format!("double[{}] <- {}", slot, expr.display()),
                _ => format!("? <- {}", expr.display()),
            })
            .join(", ");
        write!(f, "KeyPlan({})", keys)
    }
}
