//! Error types for Sluice.

use alloc::string::String;
use core::fmt;

/// Result type alias for Sluice operations.
pub type Result<T> = core::result::Result<T, Error>;

/// The phase an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while building a plan, before any tuple is read.
    Translation,
    /// Raised while pulling tuples through a plan.
    Execution,
}

/// Error types for Sluice operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// SQL construct outside the supported subset.
    Unsupported {
        feature: String,
    },
    /// SQL text could not be parsed.
    Parse {
        message: String,
    },
    /// Table or alias does not resolve to a registered table.
    TableNotFound {
        name: String,
    },
    /// The same table name or alias appears twice in one FROM list.
    DuplicateTable {
        name: String,
    },
    /// Column not found.
    ColumnNotFound {
        table: Option<String>,
        column: String,
    },
    /// Qualified column matches more than one schema position.
    AmbiguousColumn {
        table: String,
        column: String,
    },
    /// The same (table, column) pair would appear twice in one schema.
    DuplicateColumn {
        table: String,
        column: String,
    },
    /// Expression used where the other kind of expression is required,
    /// e.g. `A + 1` as a WHERE predicate.
    TypeMismatch {
        expected: &'static str,
        expr: String,
    },
    /// Join predicate that no step of the left-deep join tree can evaluate.
    UnsatisfiablePredicate {
        predicate: String,
    },
    /// Invalid schema description.
    InvalidSchema {
        message: String,
    },
    /// Data file could not be opened or read.
    Io {
        path: String,
        message: String,
    },
    /// A data line is not a well-formed tuple.
    MalformedTuple {
        path: String,
        line: usize,
        message: String,
    },
    /// A bound column position is outside the tuple being evaluated.
    ColumnIndexOutOfRange {
        column: String,
        index: usize,
        arity: usize,
    },
    /// Integer division by zero.
    DivisionByZero {
        expr: String,
    },
    /// Integer overflow during arithmetic.
    ArithmeticOverflow {
        expr: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unsupported { feature } => write!(f, "Unsupported feature: {}", feature),
            Error::Parse { message } => write!(f, "Parse error: {}", message),
            Error::TableNotFound { name } => write!(f, "Table not found: {}", name),
            Error::DuplicateTable { name } => {
                write!(f, "Table {} appears more than once in FROM", name)
            }
            Error::ColumnNotFound { table: Some(table), column } => {
                write!(f, "Column {}.{} not found", table, column)
            }
            Error::ColumnNotFound { table: None, column } => {
                write!(f, "Column {} not found", column)
            }
            Error::AmbiguousColumn { table, column } => {
                write!(f, "Column {}.{} is ambiguous", table, column)
            }
            Error::DuplicateColumn { table, column } => {
                write!(f, "Duplicate column {}.{} in schema", table, column)
            }
            Error::TypeMismatch { expected, expr } => {
                write!(f, "Type mismatch: expected {} expression, got {}", expected, expr)
            }
            Error::UnsatisfiablePredicate { predicate } => {
                write!(f, "Join predicate cannot be placed in the join tree: {}", predicate)
            }
            Error::InvalidSchema { message } => write!(f, "Invalid schema: {}", message),
            Error::Io { path, message } => write!(f, "I/O error on {}: {}", path, message),
            Error::MalformedTuple { path, line, message } => {
                write!(f, "Malformed tuple at {}:{}: {}", path, line, message)
            }
            Error::ColumnIndexOutOfRange { column, index, arity } => write!(
                f,
                "Column {} resolved to position {} but tuple has {} values",
                column, index, arity
            ),
            Error::DivisionByZero { expr } => write!(f, "Division by zero in {}", expr),
            Error::ArithmeticOverflow { expr } => write!(f, "Integer overflow in {}", expr),
        }
    }
}

impl core::error::Error for Error {}

impl Error {
    /// Returns whether the error was raised at plan time or during execution.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. }
            | Error::MalformedTuple { .. }
            | Error::ColumnIndexOutOfRange { .. }
            | Error::DivisionByZero { .. }
            | Error::ArithmeticOverflow { .. } => ErrorKind::Execution,
            _ => ErrorKind::Translation,
        }
    }

    /// Creates an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Error::Unsupported {
            feature: feature.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates a duplicate FROM-list table error.
    pub fn duplicate_table(name: impl Into<String>) -> Self {
        Error::DuplicateTable { name: name.into() }
    }

    /// Creates a column not found error.
    pub fn column_not_found(table: Option<&str>, column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            table: table.map(String::from),
            column: column.into(),
        }
    }

    /// Creates an ambiguous column error.
    pub fn ambiguous_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::AmbiguousColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a duplicate column error.
    pub fn duplicate_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::DuplicateColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &'static str, expr: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected,
            expr: expr.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed tuple error.
    pub fn malformed_tuple(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Error::MalformedTuple {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Creates a division by zero error.
    pub fn division_by_zero(expr: impl Into<String>) -> Self {
        Error::DivisionByZero { expr: expr.into() }
    }

    /// Creates an arithmetic overflow error.
    pub fn overflow(expr: impl Into<String>) -> Self {
        Error::ArithmeticOverflow { expr: expr.into() }
    }

    /// Creates an unsatisfiable predicate error.
    pub fn unsatisfiable_predicate(predicate: impl Into<String>) -> Self {
        Error::UnsatisfiablePredicate {
            predicate: predicate.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::table_not_found("Boats");
        assert!(err.to_string().contains("Boats"));

        let err = Error::column_not_found(Some("S"), "Z");
        assert_eq!(err.to_string(), "Column S.Z not found");

        let err = Error::column_not_found(None, "Z");
        assert_eq!(err.to_string(), "Column Z not found");

        let err = Error::malformed_tuple("data/Sailors", 3, "expected 3 fields, got 2");
        assert!(err.to_string().contains("data/Sailors:3"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::unsupported("OR").kind(), ErrorKind::Translation);
        assert_eq!(Error::ambiguous_column("S", "A").kind(), ErrorKind::Translation);
        assert_eq!(Error::io("data/Sailors", "not found").kind(), ErrorKind::Execution);
        assert_eq!(
            Error::division_by_zero("S.A / 0").kind(),
            ErrorKind::Execution
        );
    }
}
