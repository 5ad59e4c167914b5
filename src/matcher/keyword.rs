use super::DomainPredicate;
use crate::types::{Condition, ConditionKind};

/// Keyword matcher - matches when the keyword occurs anywhere in the domain
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
}

impl KeywordMatcher {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl DomainPredicate for KeywordMatcher {
    fn matches(&self, domain: &str) -> bool {
        domain.contains(self.keyword.as_str())
    }

    fn condition(&self) -> Condition {
        Condition::new(ConditionKind::Keyword, self.keyword.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match() {
        let matcher = KeywordMatcher::new("video");

        assert!(matcher.matches("www.pornvideo.com"));
        assert!(matcher.matches("www.googlevideo.com"));
        assert!(matcher.matches("video"));
        assert!(!matcher.matches("google.com"));
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let matcher = KeywordMatcher::new("baidu");
        assert!(matcher.matches("xbaidux.com"));
        assert!(!matcher.matches("www.BAIDU.com"));
    }

    #[test]
    fn test_keyword_reports_itself() {
        let matcher = KeywordMatcher::new("baidu");
        assert_eq!(matcher.match_domain("baidu.com").unwrap().to_string(), "keyword:baidu");
        assert!(matcher.match_domain("google.com").is_none());
    }
}
