//! Rule configuration for `composer render` and `composer inspect`.
//!
//! Rule values come from an optional TOML file and from repeated
//! `--set name=bool` flags. Flags are applied after the file, so they win.
//!
//! # Example
//!
//! ```toml
//! [rules]
//! logged_in = true
//! is_admin = false
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Top-level rules file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Rule values keyed by the name used in documents.
    #[serde(default)]
    pub rules: BTreeMap<String, bool>,
}

/// Read and parse a rules TOML file from `path`.
pub fn read_rules_config(path: &Path) -> Result<RulesConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Parse a `name=true|false` assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, bool), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid rule assignment '{}': expected NAME=BOOL", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid rule assignment '{}': empty rule name", raw));
    }
    let value = match value.trim() {
        "true" => true,
        "false" => false,
        other => {
            return Err(format!(
                "invalid rule assignment '{}': '{}' is not true or false",
                raw, other
            ))
        }
    };
    Ok((name.to_string(), value))
}

/// Merge the optional rules file with `--set` assignments.
pub fn resolve_rules(
    file: Option<&Path>,
    assignments: &[String],
) -> Result<BTreeMap<String, bool>, String> {
    let mut rules = match file {
        Some(path) => read_rules_config(path)?.rules,
        None => BTreeMap::new(),
    };
    for raw in assignments {
        let (name, value) = parse_assignment(raw)?;
        rules.insert(name, value);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn assignments_parse_booleans() {
        assert_eq!(parse_assignment("a=true"), Ok(("a".to_string(), true)));
        assert_eq!(parse_assignment(" b = false "), Ok(("b".to_string(), false)));
        assert!(parse_assignment("c").is_err());
        assert!(parse_assignment("=true").is_err());
        assert!(parse_assignment("d=yes").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\nlogged_in = false\nis_admin = true").unwrap();

        let rules = resolve_rules(Some(file.path()), &["logged_in=true".to_string()]).unwrap();
        assert_eq!(rules.get("logged_in"), Some(&true));
        assert_eq!(rules.get("is_admin"), Some(&true));
    }

    #[test]
    fn missing_rules_table_is_empty() {
        let config: RulesConfig = toml::from_str("").unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn non_boolean_value_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\nlogged_in = \"yes\"").unwrap();
        let err = read_rules_config(file.path()).unwrap_err();
        assert!(err.contains("could not parse"));
    }

    #[test]
    fn unreadable_file_is_reported() {
        let err = resolve_rules(Some(Path::new("/nonexistent/rules.toml")), &[]).unwrap_err();
        assert!(err.contains("could not read"));
    }
}
