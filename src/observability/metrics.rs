use prometheus::register_counter;
use prometheus::Counter;

lazy_static! {
    pub static ref KEY_PLANS_COMPILED: Counter =
        register_counter!("key_plans_compiled", "Number of key plans compiled").unwrap();
    pub static ref KEY_BATCHES_EXTRACTED: Counter =
        register_counter!("key_batches_extracted", "Number of batches processed by key extraction").unwrap();
    pub static ref KEY_ROWS_EXTRACTED: Counter =
        register_counter!("key_rows_extracted", "Number of rows assigned a grouping key").unwrap();
}
