//! Lookup result distinguishing a missing key from a stored null.

use serde_json::{Number, Value};

/// Logical value of a key at a given instant.
///
/// `Absent` covers both "never written" and "expired". A live key holding
/// JSON null is `Present(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lookup {
    #[default]
    Absent,
    Present(Value),
}

impl Lookup {
    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Borrows the value if present.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Lookup::Absent => None,
            Lookup::Present(value) => Some(value),
        }
    }

    /// Compares against the logical value of a key, treating numbers by
    /// numeric value so `2` matches `2.0`.
    pub fn matches(&self, current: Option<&Value>) -> bool {
        match (self, current) {
            (Lookup::Absent, None) => true,
            (Lookup::Present(expected), Some(current)) => values_equal(expected, current),
            _ => false,
        }
    }
}

/// Structural equality over JSON values where numbers compare numerically.
///
/// Two integers compare exactly; if either side is a float both are
/// compared as `f64`. Arrays compare element-wise, objects key-wise.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).map_or(false, |b| values_equal(a, b)))
        }
        _ => a == b,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        a.as_f64() == b.as_f64()
    } else {
        a == b
    }
}

impl From<Option<Value>> for Lookup {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Lookup::Absent, Lookup::Present)
    }
}

impl From<Value> for Lookup {
    fn from(value: Value) -> Self {
        Lookup::Present(value)
    }
}
