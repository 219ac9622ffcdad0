mod batch;
mod column_vector;
mod key_scalar;
mod key_value;
mod types;

pub use self::batch::*;
pub use self::column_vector::*;
pub use self::key_scalar::*;
pub use self::key_value::*;
pub use self::types::*;
