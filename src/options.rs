use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Default number of rows in a vectorized batch.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Number of key wrappers preallocated per plan. Batches may not exceed this.
    pub batch_capacity: usize,
    pub collect_metrics: bool,
}

impl Options {
    pub fn with_batch_capacity(mut self, batch_capacity: usize) -> Options {
        self.batch_capacity = batch_capacity;
        self
    }

    pub fn with_metrics(mut self, collect_metrics: bool) -> Options {
        self.collect_metrics = collect_metrics;
        self
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.batch_capacity == 0 {
            return Err(QueryError::InvalidOptions("batch_capacity must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            batch_capacity: DEFAULT_BATCH_SIZE,
            collect_metrics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_options() {
        let opts: Options = serde_json::from_str(r#"{"batch_capacity": 16}"#).unwrap();
        assert_eq!(opts, Options::default().with_batch_capacity(16));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Options::default().with_batch_capacity(0).validate().unwrap_err();
        assert!(matches!(err, QueryError::InvalidOptions(_)));
    }
}
