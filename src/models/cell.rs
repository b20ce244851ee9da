use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

use crate::utils::constants::NULL_MARKERS;

/// A single dynamically typed table cell.
///
/// Ordering places numbers before text and nulls last, which is also the
/// order used for pivot groups and for sorting joined rows.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null_marker(raw: &str) -> bool {
        NULL_MARKERS.contains(&raw.trim())
    }

    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Widen integers to floats, leaving every other value untouched.
    pub fn to_float(&self) -> CellValue {
        match self {
            CellValue::Integer(v) => CellValue::Float(*v as f64),
            other => other.clone(),
        }
    }

    /// Attempt to represent the value as a nullable integer.
    ///
    /// Returns `None` when the value carries a fractional part, is out of
    /// range, or is text.
    pub fn narrowed_to_integer(&self) -> Option<CellValue> {
        match self {
            CellValue::Null => Some(CellValue::Null),
            CellValue::Integer(v) => Some(CellValue::Integer(*v)),
            CellValue::Float(v) if v.is_nan() => Some(CellValue::Null),
            CellValue::Float(v)
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 =>
            {
                Some(CellValue::Integer(*v as i64))
            }
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Integer(_) | CellValue::Float(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Null => 2,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (
                CellValue::Integer(_) | CellValue::Float(_),
                CellValue::Integer(_) | CellValue::Float(_),
            ) => {
                let a = self.as_f64().unwrap_or(f64::NAN);
                let b = other.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b).then_with(|| {
                    matches!(self, CellValue::Float(_)).cmp(&matches!(other, CellValue::Float(_)))
                })
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&CellValue> for Value {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Integer(v) => Value::from(*v),
            // Non-finite floats have no JSON representation
            CellValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}
