/// Query Types Module
///
/// Result containers handed back by a connection, the positional parameter
/// type, and the lexical statement classification used to decide whether a
/// command's rows are materialized.
use crate::core::Cell;
use indexmap::IndexMap;

/// One result record: column name to value, in result column order.
pub type Row = IndexMap<String, Cell>;

/// All records of a result, in the order the engine returned them.
pub type Table = Vec<Row>;

/// A positional parameter. Always bound as text, or as SQL NULL when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Param(Option<String>);

impl Param {
    /// A parameter bound as SQL NULL
    pub fn null() -> Self {
        Param(None)
    }

    /// Returns the text to bind, `None` for SQL NULL
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param(Some(value.to_string()))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param(Some(value))
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Param(Some(value.clone()))
    }
}

impl From<Cell> for Param {
    fn from(value: Cell) -> Self {
        Param(value.into_inner())
    }
}

impl From<&Cell> for Param {
    fn from(value: &Cell) -> Self {
        Param(value.as_str().map(str::to_string))
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

macro_rules! display_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param(Some(value.to_string()))
                }
            }
        )*
    };
}

display_param!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool, char);

/// Builds a `Vec<Param>` from heterogeneous values.
///
/// ```
/// use databaselib::params;
///
/// let params = params![1, "foobar", None::<&str>];
/// assert_eq!(params.len(), 3);
/// assert!(params[2].is_null());
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::core::Param>::new()
    };
    ($($param:expr),+ $(,)?) => {
        vec![$($crate::core::Param::from($param)),+]
    };
}

/// Whether a command's rows are materialized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatementType {
    /// SELECT statement
    Select,
    /// Anything else, run for its effect
    Other,
}

impl StatementType {
    /// Classifies a command by its leading keyword.
    ///
    /// Purely lexical: anything whose trimmed text starts with `select` in any
    /// letter case is a `Select`, so `WITH ...` queries and `PRAGMA`s are not.
    pub fn from_sql(sql: &str) -> Self {
        if sql.trim().to_lowercase().starts_with("select") {
            StatementType::Select
        } else {
            StatementType::Other
        }
    }

    /// Whether rows of this statement are materialized
    pub fn returns_rows(self) -> bool {
        self == StatementType::Select
    }
}
