use super::DomainPredicate;
use crate::types::{Condition, ConditionKind};

/// Domain-suffix matcher - matches the domain itself and all of its subdomains.
///
/// The suffix must start on a label boundary: `baidu.com` matches
/// `www.baidu.com` but not `ibaidu.com`.
#[derive(Debug, Clone)]
pub struct SuffixMatcher {
    suffix: String,
}

impl SuffixMatcher {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl DomainPredicate for SuffixMatcher {
    fn matches(&self, domain: &str) -> bool {
        match domain.strip_suffix(self.suffix.as_str()) {
            Some(rest) => rest.is_empty() || rest.ends_with('.'),
            None => false,
        }
    }

    fn condition(&self) -> Condition {
        Condition::new(ConditionKind::Domain, self.suffix.as_str())
    }
}
