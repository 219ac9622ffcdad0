use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unsupported vector output type: {0}")]
    UnsupportedKeyKind(String),
    #[error("Some assumption was violated. This is a bug: {0}")]
    InternalInconsistency(String),
    #[error("Type error: {0}")]
    TypeError(String),
    #[error("Batch of {size} rows exceeds key wrapper capacity of {capacity}")]
    BatchOverflow { size: usize, capacity: usize },
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

#[macro_export]
macro_rules! fatal {
    ($e:expr) => {
        $crate::QueryError::InternalInconsistency($e.to_string())
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::QueryError::InternalInconsistency(format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! bail {
    ($kind:expr, $e:expr) => {
        return Err($kind($e.to_owned()))
    };
    ($kind:expr, $fmt:expr, $($arg:tt)+) => {
        return Err($kind(format!($fmt, $($arg)+)))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            return Err($crate::QueryError::InternalInconsistency($e.to_string()));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err($crate::QueryError::InternalInconsistency(format!($fmt, $($arg)+)));
        }
    };
}
