use thiserror::Error;

/// Errors raised while building a [`DomainMatcher`](crate::DomainMatcher).
///
/// Matching itself never fails; every variant here is produced by
/// [`DomainMatcherBuilder::build`](crate::DomainMatcherBuilder::build) or by a
/// [`GeoSiteLoader`](crate::geo::GeoSiteLoader).
#[derive(Error, Debug)]
pub enum GeoMatchError {
    #[error("Invalid condition format: {0}")]
    MalformedRule(String),

    #[error("Invalid group payload: group:{0}")]
    MalformedGroupPayload(String),

    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("Dataset corrupt: {0}")]
    DatasetCorrupt(String),

    #[error("Domain list for group:{0} not found")]
    GroupNotFound(String),

    #[error("Invalid regex pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl GeoMatchError {
    /// True for failures that come from reading or decoding the dataset,
    /// as opposed to problems with the rules themselves.
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            GeoMatchError::DatasetUnavailable(_) | GeoMatchError::DatasetCorrupt(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GeoMatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_rule_display_includes_rule() {
        let err = GeoMatchError::MalformedRule("suffix:example.com".into());
        let display = format!("{}", err);
        assert!(display.contains("suffix:example.com"), "got: {}", display);
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("*baidu.com").unwrap_err();
        let err = GeoMatchError::InvalidPattern {
            pattern: "*baidu.com".into(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("*baidu.com"));
    }

    #[test]
    fn test_dataset_errors_are_classified() {
        assert!(GeoMatchError::DatasetUnavailable("missing".into()).is_dataset_error());
        assert!(GeoMatchError::DatasetCorrupt("truncated".into()).is_dataset_error());
        assert!(!GeoMatchError::GroupNotFound("google".into()).is_dataset_error());
        assert!(!GeoMatchError::MalformedRule("foo".into()).is_dataset_error());
    }
}
