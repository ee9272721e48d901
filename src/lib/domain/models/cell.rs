use std::fmt;

/// A single spreadsheet value after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl Cell {
    /// Empty cells, empty strings and NaN all count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Float(f) => f.is_nan(),
            Cell::Int(_) | Cell::Bool(_) => false,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", v),
        }
    }
}
