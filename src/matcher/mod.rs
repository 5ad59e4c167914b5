mod full;
mod keyword;
mod pattern;
mod suffix;

pub use full::FullMatcher;
pub use keyword::KeywordMatcher;
pub use pattern::RegexMatcher;
pub use suffix::SuffixMatcher;

use crate::error::Result;
use crate::geo::{DomainKind, DomainRecord};
use crate::types::Condition;

/// Trait for single-pattern domain matchers
pub trait DomainPredicate: Send + Sync {
    /// Check if the (already normalized) domain matches this matcher
    fn matches(&self, domain: &str) -> bool;

    /// The primitive condition this matcher stands for
    fn condition(&self) -> Condition;

    /// Match and describe the hit
    fn match_domain(&self, domain: &str) -> Option<Condition> {
        if self.matches(domain) {
            Some(self.condition())
        } else {
            None
        }
    }
}

/// Enum wrapper for all matcher types
#[derive(Debug, Clone)]
pub enum Matcher {
    Keyword(KeywordMatcher),
    Full(FullMatcher),
    Suffix(SuffixMatcher),
    Regex(RegexMatcher),
}

impl Matcher {
    /// Compile a dataset record into its matcher.
    ///
    /// Fails only for regex records whose pattern does not compile.
    pub fn from_record(record: &DomainRecord) -> Result<Self> {
        let value = record.value.as_str();
        Ok(match record.kind {
            DomainKind::Plain => Matcher::Keyword(KeywordMatcher::new(value)),
            DomainKind::Full => Matcher::Full(FullMatcher::new(value)),
            DomainKind::Domain => Matcher::Suffix(SuffixMatcher::new(value)),
            DomainKind::Regex => Matcher::Regex(RegexMatcher::new(value)?),
        })
    }
}

impl DomainPredicate for Matcher {
    fn matches(&self, domain: &str) -> bool {
        match self {
            Matcher::Keyword(m) => m.matches(domain),
            Matcher::Full(m) => m.matches(domain),
            Matcher::Suffix(m) => m.matches(domain),
            Matcher::Regex(m) => m.matches(domain),
        }
    }

    fn condition(&self) -> Condition {
        match self {
            Matcher::Keyword(m) => m.condition(),
            Matcher::Full(m) => m.condition(),
            Matcher::Suffix(m) => m.condition(),
            Matcher::Regex(m) => m.condition(),
        }
    }
}
