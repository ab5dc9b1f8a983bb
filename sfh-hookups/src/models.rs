//! Hookup record identity and type model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HookupError;

/// Identifier of a hookup record
///
/// Wraps the raw string as received. Well-formedness is checked by the
/// repository, so a malformed value surfaces as `InvalidIdentifier` rather
/// than `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookupId(String);

impl HookupId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Utility category of a hookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityType {
    Gas,
    Water,
    Electricity,
}

impl UtilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UtilityType::Gas => "gas",
            UtilityType::Water => "water",
            UtilityType::Electricity => "electricity",
        }
    }
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UtilityType {
    type Err = HookupError;

    /// Case-insensitive: "GAS", "Gas" and "gas" all parse
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [UtilityType::Gas, UtilityType::Water, UtilityType::Electricity]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| HookupError::InvalidUtilityType(value.to_string()))
    }
}

/// A stored hookup record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hookup {
    pub id: HookupId,
    pub name: String,
    pub utility_type: UtilityType,
    pub endpoint: String,
}

/// Hookup awaiting its first save
///
/// Carries no identifier; the repository assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHookup {
    pub name: String,
    pub utility_type: UtilityType,
    pub endpoint: String,
}

impl NewHookup {
    pub fn new(name: impl Into<String>, utility_type: UtilityType, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            utility_type,
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utility_type_any_case() {
        assert_eq!("gas".parse::<UtilityType>().unwrap(), UtilityType::Gas);
        assert_eq!("WATER".parse::<UtilityType>().unwrap(), UtilityType::Water);
        assert_eq!(
            "Electricity".parse::<UtilityType>().unwrap(),
            UtilityType::Electricity
        );
    }

    #[test]
    fn test_parse_unknown_utility_type() {
        let err = "energy".parse::<UtilityType>().unwrap_err();
        assert!(matches!(err, HookupError::InvalidUtilityType(ref v) if v == "energy"));

        assert!("".parse::<UtilityType>().is_err());
        assert!(" gas".parse::<UtilityType>().is_err());
    }

    #[test]
    fn test_utility_type_renders_lowercase() {
        assert_eq!(UtilityType::Electricity.to_string(), "electricity");
        assert_eq!(
            serde_json::to_value(UtilityType::Gas).unwrap(),
            serde_json::json!("gas")
        );
    }

    #[test]
    fn test_hookup_id_is_opaque() {
        let id = HookupId::new("not-a-uuid");
        assert_eq!(id.as_str(), "not-a-uuid");
        assert_eq!(id.to_string(), "not-a-uuid");
    }
}
