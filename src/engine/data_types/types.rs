use std::fmt;

use crate::QueryError;

/// Physical representation of a grouping key column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum KeyKind {
    Integral,
    Floating,
}

impl KeyKind {
    /// Maps an expression output type name onto the column kind it is stored in.
    pub fn from_type_name(type_name: &str) -> Result<KeyKind, QueryError> {
        if type_name.eq_ignore_ascii_case("long") || type_name.eq_ignore_ascii_case("bigint") {
            Ok(KeyKind::Integral)
        } else if type_name.eq_ignore_ascii_case("double") {
            Ok(KeyKind::Floating)
        } else {
            Err(QueryError::UnsupportedKeyKind(type_name.to_string()))
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            KeyKind::Integral => "bigint",
            KeyKind::Floating => "double",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
