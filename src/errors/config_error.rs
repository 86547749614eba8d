use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {key}='{value}': {reason}")]
    Invalid { key: String, value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_variant_format() {
        let err = ConfigError::Invalid { key: "K".into(),
                                         value: "0".into(),
                                         reason: "must be positive".into() };
        assert_eq!(err.to_string(), "invalid K='0': must be positive");
    }
}
