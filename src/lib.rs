//! GeoMatch - domain rule matching with per-rule match provenance
//!
//! This library classifies domain names against routing rules and explains,
//! for every rule that fires, why it fired:
//! - Keyword (substring) matching
//! - Full (exact) matching
//! - Domain suffix matching on label boundaries
//! - Regex search
//! - Named groups from V2Ray `geosite.dat` or sing-geosite `geosite.db` lists,
//!   optionally filtered by attribute
//!
//! # Example
//!
//! ```rust
//! use geomatch::{DomainMatcherBuilder, DomainRecord, MemoryGeoSiteLoader};
//!
//! let dataset = MemoryGeoSiteLoader::new().with_group(
//!     "microsoft",
//!     vec![
//!         DomainRecord::new_domain("microsoft.com"),
//!         DomainRecord::new_full("www.microsoft.com"),
//!     ],
//! );
//!
//! let matcher = DomainMatcherBuilder::new()
//!     .with_dataset(dataset)
//!     .add_condition("keyword:video")
//!     .add_condition("group:microsoft")
//!     .build()
//!     .unwrap();
//!
//! let hits: Vec<String> = matcher
//!     .match_domain("www.microsoft.com.")
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(
//!     hits,
//!     [
//!         "group:microsoft/domain:microsoft.com",
//!         "group:microsoft/full:www.microsoft.com",
//!     ]
//! );
//! assert!(matcher.match_domain("example.com").is_empty());
//! ```
//!
//! # Rule Syntax
//!
//! | Rule | Example | Matches |
//! |------|---------|---------|
//! | Keyword | `keyword:video` | Domains containing `video` |
//! | Full | `full:www.baidu.com` | Exactly `www.baidu.com` |
//! | Domain | `domain:baidu.com` | `baidu.com` and its subdomains |
//! | Regexp | `regexp:.*baidu.com` | Domains where the pattern is found |
//! | Group | `group:google@ads` | Domains of the `google` list tagged `ads` |
//!
//! `geosite:` is accepted in place of `group:`. Matching is case-sensitive
//! and one trailing dot of the queried domain is ignored.

pub mod builder;
pub mod compile;
pub mod error;
pub mod geo;
pub mod matcher;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use builder::DomainMatcherBuilder;
pub use compile::{compile, expand_group, DomainMatcher};
pub use error::{GeoMatchError, Result};
pub use geo::{
    DomainKind, DomainRecord, FileGeoSiteLoader, GeoSiteData, GeoSiteFormat, GeoSiteLoader,
    MemoryGeoSiteLoader,
};
pub use matcher::{DomainPredicate, FullMatcher, KeywordMatcher, Matcher, RegexMatcher, SuffixMatcher};
pub use parser::{parse_condition, parse_conditions, parse_group_payload};
pub use types::{Condition, ConditionKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let dataset = MemoryGeoSiteLoader::new()
            .with_group(
                "geolocation-!cn",
                vec![
                    DomainRecord::new_domain("microsoft.com"),
                    DomainRecord::new_domain("youtube.com"),
                ],
            )
            .with_group("gfw", vec![DomainRecord::new_domain("youtube.com")]);

        let matcher = DomainMatcherBuilder::new()
            .with_dataset(dataset)
            .add_conditions(["group:geolocation-!cn", "keyword:tube", "group:gfw"])
            .build()
            .unwrap();

        assert_eq!(matcher.condition_count(), 3);
        assert_eq!(matcher.matcher_count(), 4);

        let hits: Vec<String> = matcher
            .match_domain("www.youtube.com")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            hits,
            vec![
                "group:geolocation-!cn/domain:youtube.com",
                "keyword:tube",
                "group:gfw/domain:youtube.com",
            ]
        );

        assert!(matcher.match_domain("www.baidu.com").is_empty());
    }

    #[test]
    fn test_matcher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DomainMatcher>();
        assert_send_sync::<DomainMatcherBuilder>();
    }
}
