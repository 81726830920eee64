//! SQL data type definitions.

use core::fmt;

use super::Ident;

/// Integer type families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerKind {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    Integer,
    BigInt,
    /// BigQuery's `INT64`.
    Int64,
}

impl IntegerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Int64 => "INT64",
        }
    }
}

/// A field of a `STRUCT<..>` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: Option<Ident>,
    pub data_type: DataType,
}

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// Any integer type, with the display width and modifiers some
    /// dialects allow.
    Integer {
        kind: IntegerKind,
        width: Option<u32>,
        unsigned: bool,
        zerofill: bool,
    },

    // Floating point
    /// Real (4-byte float).
    Real,
    /// `FLOAT[(p)]`.
    Float(Option<u32>),
    /// `DOUBLE [PRECISION]`, or `FLOAT64`.
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u32>,
        /// Number of digits after decimal point.
        scale: Option<u32>,
    },
    /// Numeric (alias for Decimal).
    Numeric {
        /// Total number of digits.
        precision: Option<u32>,
        /// Number of digits after decimal point.
        scale: Option<u32>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text (variable length, no limit).
    Text,

    // Binary types
    /// Binary large object.
    Blob,
    /// Binary with specified length.
    Binary(Option<u32>),
    /// Variable-length binary.
    Varbinary(Option<u32>),

    // Date/time types
    /// Date.
    Date,
    /// Time.
    Time,
    /// Timestamp.
    Timestamp,
    /// Datetime.
    Datetime,

    /// Boolean.
    Boolean,
    /// Json.
    Json,

    /// `ARRAY<T>`.
    Array(Box<DataType>),
    /// `STRUCT<name T, ..>`.
    Struct(Vec<StructField>),

    /// Any other named type, with its raw parenthesized arguments.
    Custom { name: String, args: Vec<String> },
}

impl DataType {
    /// A plain integer type with no modifiers.
    #[must_use]
    pub const fn integer(kind: IntegerKind) -> Self {
        Self::Integer {
            kind,
            width: None,
            unsigned: false,
            zerofill: false,
        }
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

fn write_length(f: &mut fmt::Formatter<'_>, name: &str, length: Option<u32>) -> fmt::Result {
    match length {
        Some(n) => write!(f, "{name}({n})"),
        None => f.write_str(name),
    }
}

fn write_precision(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    precision: Option<u32>,
    scale: Option<u32>,
) -> fmt::Result {
    match (precision, scale) {
        (Some(p), Some(s)) => write!(f, "{name}({p}, {s})"),
        (Some(p), None) => write!(f, "{name}({p})"),
        _ => f.write_str(name),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer {
                kind,
                width,
                unsigned,
                zerofill,
            } => {
                write_length(f, kind.as_str(), *width)?;
                if *unsigned {
                    f.write_str(" UNSIGNED")?;
                }
                if *zerofill {
                    f.write_str(" ZEROFILL")?;
                }
                Ok(())
            }
            Self::Real => f.write_str("REAL"),
            Self::Float(p) => write_length(f, "FLOAT", *p),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal { precision, scale } => write_precision(f, "DECIMAL", *precision, *scale),
            Self::Numeric { precision, scale } => write_precision(f, "NUMERIC", *precision, *scale),
            Self::Char(n) => write_length(f, "CHAR", *n),
            Self::Varchar(n) => write_length(f, "VARCHAR", *n),
            Self::Text => f.write_str("TEXT"),
            Self::Blob => f.write_str("BLOB"),
            Self::Binary(n) => write_length(f, "BINARY", *n),
            Self::Varbinary(n) => write_length(f, "VARBINARY", *n),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Datetime => f.write_str("DATETIME"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Json => f.write_str("JSON"),
            Self::Array(inner) => write!(f, "ARRAY<{inner}>"),
            Self::Struct(fields) => {
                f.write_str("STRUCT<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(name) = &field.name {
                        write!(f, "{name} ")?;
                    }
                    write!(f, "{}", field.data_type)?;
                }
                f.write_str(">")
            }
            Self::Custom { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    write!(f, "({})", args.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::integer(IntegerKind::BigInt).to_string(), "BIGINT");
        assert_eq!(
            DataType::Integer {
                kind: IntegerKind::Int,
                width: Some(11),
                unsigned: true,
                zerofill: false,
            }
            .to_string(),
            "INT(11) UNSIGNED"
        );
        assert_eq!(DataType::Varchar(Some(255)).to_sql(), "VARCHAR(255)");
        assert_eq!(
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .to_sql(),
            "DECIMAL(10, 2)"
        );
        assert_eq!(
            DataType::Array(Box::new(DataType::integer(IntegerKind::Int64))).to_string(),
            "ARRAY<INT64>"
        );
        assert_eq!(
            DataType::Custom {
                name: "ENUM".into(),
                args: vec!["'a'".into(), "'b'".into()],
            }
            .to_string(),
            "ENUM('a', 'b')"
        );
    }
}
