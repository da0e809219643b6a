//! Configuration types for clientsim-config
//!
//! The set of keys whose values are filesystem paths relative to the tests
//! directory.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A configuration entry holding a path relative to the tests directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PathField {
    CriterionFile,
    PfwConfFile,
    ScriptsFile,
    ActionGathererFile,
    ScenariosDirectory,
    LogFile,
    CoverageFile,
    CoverageDir,
    PfwDomainConfFile,
}

impl PathField {
    /// Every path field, in resolution order
    pub const ALL: [PathField; 9] = [
        PathField::CriterionFile,
        PathField::PfwConfFile,
        PathField::ScriptsFile,
        PathField::ActionGathererFile,
        PathField::ScenariosDirectory,
        PathField::LogFile,
        PathField::CoverageFile,
        PathField::CoverageDir,
        PathField::PfwDomainConfFile,
    ];

    /// Key of this field in the JSON document
    pub fn key(self) -> &'static str {
        match self {
            PathField::CriterionFile => "CriterionFile",
            PathField::PfwConfFile => "PfwConfFile",
            PathField::ScriptsFile => "ScriptsFile",
            PathField::ActionGathererFile => "ActionGathererFile",
            PathField::ScenariosDirectory => "ScenariosDirectory",
            PathField::LogFile => "LogFile",
            PathField::CoverageFile => "CoverageFile",
            PathField::CoverageDir => "CoverageDir",
            PathField::PfwDomainConfFile => "PfwDomainConfFile",
        }
    }

    /// Whether the entry names a directory rather than a file
    pub fn is_directory(self) -> bool {
        matches!(self, PathField::ScenariosDirectory | PathField::CoverageDir)
    }
}

impl fmt::Display for PathField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PathField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("'{}' is not a path field", s))
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct() {
        let mut keys: Vec<_> = PathField::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), PathField::ALL.len());
    }

    #[test]
    fn test_no_concatenated_key() {
        assert!(PathField::ALL.iter().all(|f| f.key() != "PfwConfFileScriptsFile"));
        assert!("PfwConfFileScriptsFile".parse::<PathField>().is_err());
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for field in PathField::ALL {
            assert_eq!(field.to_string().parse::<PathField>().unwrap(), field);
        }
    }

    #[test]
    fn test_directory_fields() {
        let dirs: Vec<_> = PathField::ALL
            .into_iter()
            .filter(|f| f.is_directory())
            .collect();
        assert_eq!(
            dirs,
            vec![PathField::ScenariosDirectory, PathField::CoverageDir]
        );
    }

    #[test]
    fn test_serde_uses_key_names() {
        let json = serde_json::to_string(&PathField::PfwDomainConfFile).unwrap();
        assert_eq!(json, "\"PfwDomainConfFile\"");
    }
}
