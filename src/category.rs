//! Category values
//!
//! Categories are string keys mapped to scalar values. Values carry a total
//! order (variant rank first, then value) so they can key ordered maps, which
//! is what grouping members by category relies on.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Key/value categories of a single Treant.
pub type CategoryMap = BTreeMap<String, CategoryValue>;

/// A scalar category value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl CategoryValue {
    fn rank(&self) -> u8 {
        match self {
            CategoryValue::Bool(_) => 0,
            CategoryValue::Int(_) => 1,
            CategoryValue::Float(_) => 2,
            CategoryValue::Str(_) => 3,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CategoryValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CategoryValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CategoryValue::Float(f) => Some(*f),
            CategoryValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// False for NaN and infinite floats, which JSON cannot represent.
    pub fn is_finite(&self) -> bool {
        match self {
            CategoryValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CategoryValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Ord for CategoryValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CategoryValue::Bool(a), CategoryValue::Bool(b)) => a.cmp(b),
            (CategoryValue::Int(a), CategoryValue::Int(b)) => a.cmp(b),
            (CategoryValue::Float(a), CategoryValue::Float(b)) => a.total_cmp(b),
            (CategoryValue::Str(a), CategoryValue::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CategoryValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CategoryValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CategoryValue {}

impl Hash for CategoryValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CategoryValue::Bool(b) => b.hash(state),
            CategoryValue::Int(i) => i.hash(state),
            CategoryValue::Float(f) => f.to_bits().hash(state),
            CategoryValue::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Bool(b) => write!(f, "{}", b),
            CategoryValue::Int(i) => write!(f, "{}", i),
            CategoryValue::Float(x) => write!(f, "{}", x),
            CategoryValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Parses command-line literals: `true`/`false`, integers, floats, else a string.
impl FromStr for CategoryValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(b) = s.parse::<bool>() {
            return Ok(CategoryValue::Bool(b));
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(CategoryValue::Int(i));
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Ok(CategoryValue::Float(f));
            }
        }
        Ok(CategoryValue::Str(s.to_string()))
    }
}

impl From<bool> for CategoryValue {
    fn from(value: bool) -> Self {
        CategoryValue::Bool(value)
    }
}

impl From<i64> for CategoryValue {
    fn from(value: i64) -> Self {
        CategoryValue::Int(value)
    }
}

impl From<i32> for CategoryValue {
    fn from(value: i32) -> Self {
        CategoryValue::Int(value as i64)
    }
}

impl From<f64> for CategoryValue {
    fn from(value: f64) -> Self {
        CategoryValue::Float(value)
    }
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        CategoryValue::Str(value.to_string())
    }
}

impl From<String> for CategoryValue {
    fn from(value: String) -> Self {
        CategoryValue::Str(value)
    }
}

impl From<&CategoryValue> for CategoryValue {
    fn from(value: &CategoryValue) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for CategoryValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for CategoryValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for CategoryValue {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}
