/// Cell Module
///
/// A `Cell` is the loosely-typed value every result column and every config
/// entry is handed out as. It keeps the raw text and converts on demand.
use crate::core::{DatabaseError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An immutable, nullable text value with typed accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    value: Option<String>,
}

impl Cell {
    /// Creates a cell from a nullable value
    pub fn new(value: Option<String>) -> Self {
        Cell { value }
    }

    /// Creates a cell holding SQL NULL
    pub fn null() -> Self {
        Cell { value: None }
    }

    /// Returns true if the underlying value is absent
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the raw text, `None` for NULL
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Consumes the cell and returns the raw text
    pub fn into_inner(self) -> Option<String> {
        self.value
    }

    pub fn to_byte(&self) -> Result<i8> {
        self.parse("i8", false)
    }

    pub fn to_int(&self) -> Result<i32> {
        self.parse("i32", false)
    }

    pub fn to_long(&self) -> Result<i64> {
        self.parse("i64", false)
    }

    pub fn to_float(&self) -> Result<f32> {
        self.parse("f32", true)
    }

    pub fn to_double(&self) -> Result<f64> {
        self.parse("f64", true)
    }

    /// Interprets the value as a boolean.
    ///
    /// `"true"` in any letter case and the literal `"1"` are true. Everything
    /// else, NULL included, is false.
    pub fn to_boolean(&self) -> bool {
        match self.value.as_deref() {
            Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
            None => false,
        }
    }

    fn parse<T: FromStr>(&self, target: &'static str, trim: bool) -> Result<T> {
        let coercion = || DatabaseError::Coercion {
            value: self.value.clone(),
            target,
        };
        let text = self.value.as_deref().ok_or_else(coercion)?;
        let text = if trim { text.trim() } else { text };
        text.parse::<T>().map_err(|_| coercion())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => f.write_str(v),
            None => f.write_str("NULL"),
        }
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        Cell::new(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(Some(value))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(Some(value.to_string()))
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.value {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_none(),
        }
    }
}

impl PartialEq<str> for Cell {
    fn eq(&self, other: &str) -> bool {
        self.value.as_deref() == Some(other)
    }
}

impl PartialEq<&str> for Cell {
    fn eq(&self, other: &&str) -> bool {
        self.value.as_deref() == Some(*other)
    }
}

impl PartialEq<bool> for Cell {
    fn eq(&self, other: &bool) -> bool {
        self.to_boolean() == *other
    }
}

macro_rules! numeric_eq {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Cell {
                fn eq(&self, other: &$ty) -> bool {
                    self.$method().map(|v| v == *other).unwrap_or(false)
                }
            }
        )*
    };
}

numeric_eq!(i8 => to_byte, i32 => to_int, i64 => to_long, f32 => to_float, f64 => to_double);
