pub mod data_types;
pub mod expression;
mod extract;
pub mod key_plan;
pub mod key_wrapper;
mod readback;

pub use self::data_types::*;
pub use self::expression::*;
pub use self::key_plan::{KeyPlan, SlotLookup};
pub use self::key_wrapper::KeyWrapper;
