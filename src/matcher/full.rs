use super::DomainPredicate;
use crate::types::{Condition, ConditionKind};

/// Full matcher - matches only the exact domain
#[derive(Debug, Clone)]
pub struct FullMatcher {
    domain: String,
}

impl FullMatcher {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl DomainPredicate for FullMatcher {
    fn matches(&self, domain: &str) -> bool {
        domain == self.domain
    }

    fn condition(&self) -> Condition {
        Condition::new(ConditionKind::Full, self.domain.as_str())
    }
}
