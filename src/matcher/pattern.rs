use regex::Regex;

use super::DomainPredicate;
use crate::error::{GeoMatchError, Result};
use crate::types::{Condition, ConditionKind};

/// Regex matcher - matches when the pattern is found anywhere in the domain.
///
/// Patterns are not anchored; use `^`/`$` for whole-domain matches.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| GeoMatchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }
}

impl DomainPredicate for RegexMatcher {
    fn matches(&self, domain: &str) -> bool {
        self.regex.is_match(domain)
    }

    fn condition(&self) -> Condition {
        Condition::new(ConditionKind::Regexp, self.regex.as_str())
    }
}
