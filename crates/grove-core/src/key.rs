//! Node identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a record, and of the node built from it.
///
/// Each JSON type keys separately: `1`, `"1"`, `true` and `"true"` are four
/// distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    /// Integral identifier.
    Int(i64),
    /// Integral identifier above `i64::MAX`.
    UInt(u64),
    /// Non-integral numeric identifier.
    Float(FloatKey),
    /// Boolean identifier.
    Bool(bool),
    /// Textual identifier.
    Str(CompactString),
}

/// A non-integral number used as a key.
///
/// Built only from JSON numbers, which are never NaN, so comparing bit
/// patterns agrees with comparing values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatKey(f64);

impl FloatKey {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl NodeKey {
    /// Derive a key from a record value.
    ///
    /// Returns `None` for `null`, arrays and objects. Integral floats within
    /// `i64` range collapse to [`NodeKey::Int`], so `4` and `4.0` are the
    /// same key.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::String(s) => Some(Self::Str(CompactString::from(s.as_str()))),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Self::Int(i));
                }
                if let Some(u) = n.as_u64() {
                    return Some(Self::UInt(u));
                }
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                        Self::Int(f as i64)
                    } else {
                        Self::Float(FloatKey(f))
                    }
                })
            }
        }
    }

    /// Convert back into a JSON value of the original type.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::from(*i),
            Self::UInt(u) => Value::from(*u),
            Self::Float(f) => Value::from(f.get()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Str(s) => Value::String(s.to_string()),
        }
    }

    /// Get the integer form, if this is an `i64` key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the string form, if this is a textual key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{}", x.get()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeKey {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<CompactString> for NodeKey {
    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_numbers() {
        assert_eq!(NodeKey::from_value(&json!(7)), Some(NodeKey::Int(7)));
        assert_eq!(NodeKey::from_value(&json!(-3)), Some(NodeKey::Int(-3)));
        assert_eq!(NodeKey::from_value(&json!(4.0)), Some(NodeKey::Int(4)));
        assert_eq!(
            NodeKey::from_value(&json!(1.5)),
            Some(NodeKey::Float(FloatKey(1.5)))
        );
        assert_eq!(
            NodeKey::from_value(&json!(u64::MAX)),
            Some(NodeKey::UInt(u64::MAX))
        );
    }

    #[test]
    fn test_from_value_non_keys() {
        assert_eq!(NodeKey::from_value(&Value::Null), None);
        assert_eq!(NodeKey::from_value(&json!([1, 2])), None);
        assert_eq!(NodeKey::from_value(&json!({"a": 1})), None);
        assert_eq!(NodeKey::from_value(&json!(true)), Some(NodeKey::Bool(true)));
    }

    #[test]
    fn test_json_types_never_collide() {
        let keys: Vec<NodeKey> = [
            json!(1),
            json!("1"),
            json!(true),
            json!("true"),
            json!(1.5),
            json!("1.5"),
            json!(u64::MAX),
            json!(u64::MAX.to_string()),
        ]
        .iter()
        .filter_map(NodeKey::from_value)
        .collect();

        let distinct: std::collections::HashSet<&NodeKey> = keys.iter().collect();
        assert_eq!(distinct.len(), keys.len());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(NodeKey::from("menu").as_str(), Some("menu"));
        assert_eq!(NodeKey::Bool(false).as_str(), None);
        assert_eq!(NodeKey::from(3).as_str(), None);
    }

    #[test]
    fn test_to_value() {
        assert_eq!(NodeKey::from(5).to_value(), json!(5));
        assert_eq!(NodeKey::from("a").to_value(), json!("a"));
        assert_eq!(NodeKey::Bool(true).to_value(), json!(true));
        assert_eq!(NodeKey::Float(FloatKey(0.5)).to_value(), json!(0.5));
        assert_eq!(NodeKey::UInt(u64::MAX).to_value(), json!(u64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeKey::from(12).to_string(), "12");
        assert_eq!(NodeKey::from("x").to_string(), "\"x\"");
        assert_eq!(NodeKey::Bool(true).to_string(), "true");
        assert_eq!(NodeKey::from("true").to_string(), "\"true\"");
    }
}
