#[macro_use]
extern crate lazy_static;

#[macro_use]
mod errors;
mod engine;
mod observability;
mod options;

pub use crate::engine::{
    CastLongToDouble,
    Column,
    ColumnVector,
    ConstantExpression,
    IdentityExpression,
    BoxedExpression,
    KeyExpression,
    KeyKind,
    KeyPlan,
    KeyScalar,
    KeyValue,
    KeyWrapper,
    SlotLookup,
    VectorizedBatch,
};
pub use crate::errors::QueryError;
pub use crate::options::{Options, DEFAULT_BATCH_SIZE};

pub type KeyResult<T> = Result<T, QueryError>;
