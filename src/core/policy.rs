//! Policy file loading

use crate::types::{FlareResult, SessionPolicy};

/// Load policy from JSON file (missing fields take defaults)
pub fn load_policy(path: &str) -> FlareResult<SessionPolicy> {
    let json = std::fs::read_to_string(path)?;
    let policy: SessionPolicy = serde_json::from_str(&json)?;
    policy.validate()?;
    Ok(policy)
}

/// Save policy as pretty JSON, returning the path written
pub fn save_policy(policy: &SessionPolicy, path: &str) -> FlareResult<String> {
    let json = serde_json::to_string_pretty(policy)?;
    std::fs::write(path, json)?;
    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConsentLevel, FlareError};

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("flare_{}_{}.json", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let policy = SessionPolicy {
            consent_level: ConsentLevel::Relational,
            max_recursion_depth: 12,
            heuristics_active: true,
            ..SessionPolicy::default()
        };
        save_policy(&policy, &path).unwrap();
        let loaded = load_policy(&path).unwrap();
        assert_eq!(loaded, policy);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_policy("/nonexistent/flare/policy.json").unwrap_err();
        assert!(matches!(err, FlareError::Io(_)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let path = temp_path("invalid");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_policy(&path).unwrap_err();
        assert!(matches!(err, FlareError::Parse(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_zero_depth_is_config_error() {
        let path = temp_path("zero_depth");
        std::fs::write(&path, r#"{"max_recursion_depth": 0}"#).unwrap();
        let err = load_policy(&path).unwrap_err();
        assert!(matches!(err, FlareError::Config(_)));
        let _ = std::fs::remove_file(&path);
    }
}
