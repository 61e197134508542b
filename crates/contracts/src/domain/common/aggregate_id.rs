use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Common behaviour of aggregate id types
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Id as it appears in URLs
    fn as_string(&self) -> String;

    /// Parses an id taken from a URL
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Declares a numeric backend id. The wire form is the bare number; ids
/// parsed from URLs must be strictly positive.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn as_string(&self) -> String {
                self.0.to_string()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                match s.trim().parse::<i64>() {
                    Ok(v) if v > 0 => Ok(Self(v)),
                    Ok(_) => Err(format!("Invalid id: {}", s)),
                    Err(e) => Err(format!("Invalid id: {}", e)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use numeric_id;

#[cfg(test)]
mod tests {
    use super::AggregateId;

    numeric_id!(SampleId);

    #[test]
    fn parses_positive_ids_only() {
        assert_eq!(SampleId::from_string("42"), Ok(SampleId(42)));
        assert_eq!(SampleId::from_string(" 7 "), Ok(SampleId(7)));
        assert!(SampleId::from_string("0").is_err());
        assert!(SampleId::from_string("-3").is_err());
        assert!(SampleId::from_string("abc").is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&SampleId(9)).unwrap();
        assert_eq!(json, "9");
        let id: SampleId = serde_json::from_str("15").unwrap();
        assert_eq!(id.as_string(), "15");
    }
}
