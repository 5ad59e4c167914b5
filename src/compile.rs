use crate::error::{GeoMatchError, Result};
use crate::geo::{DomainKind, DomainRecord, GeoSiteData};
use crate::matcher::{DomainPredicate, Matcher};
use crate::parser::parse_group_payload;
use crate::types::{Condition, ConditionKind};

/// A compiled matcher tagged with the index of the rule it came from
#[derive(Debug, Clone)]
struct MatcherRecord {
    matcher: Matcher,
    condition: usize,
}

/// Compiled domain rule set.
///
/// Holds the rule templates and, in rule order then dataset order, one
/// matcher per expanded domain record. Nothing is mutated after
/// construction, so a `DomainMatcher` can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    records: Vec<MatcherRecord>,
    conditions: Vec<Condition>,
}

impl DomainMatcher {
    /// Match a domain against every rule and explain each hit.
    ///
    /// One trailing dot is stripped first. Every matcher that fires adds one
    /// entry, so a group rule can appear several times when several of its
    /// records match. Group entries carry the record that fired as a child.
    pub fn match_domain(&self, domain: &str) -> Vec<Condition> {
        let domain = normalize(domain);

        let mut result = Vec::new();
        for record in &self.records {
            if let Some(hit) = record.matcher.match_domain(domain) {
                let template = &self.conditions[record.condition];
                if template.is_group() {
                    result.push(template.with_child(hit));
                } else {
                    result.push(template.clone());
                }
            }
        }
        result
    }

    /// Check if any rule matches, without building explanations
    pub fn matches(&self, domain: &str) -> bool {
        let domain = normalize(domain);
        self.records.iter().any(|r| r.matcher.matches(domain))
    }

    /// Rule templates in rule order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Number of rules
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Number of compiled matchers (one per expanded record)
    pub fn matcher_count(&self) -> usize {
        self.records.len()
    }

    /// True when no matcher can ever fire
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}

/// Compile parsed conditions into a DomainMatcher, expanding group rules
/// against `data`. The first failure aborts the whole compilation.
pub fn compile(conditions: Vec<Condition>, data: &GeoSiteData) -> Result<DomainMatcher> {
    let mut records = Vec::with_capacity(conditions.len());

    for (index, condition) in conditions.iter().enumerate() {
        let kind = match condition.kind() {
            ConditionKind::Group => {
                for domain in expand_group(condition.payload(), data)? {
                    records.push(MatcherRecord {
                        matcher: Matcher::from_record(domain)?,
                        condition: index,
                    });
                }
                continue;
            }
            ConditionKind::Keyword => DomainKind::Plain,
            ConditionKind::Full => DomainKind::Full,
            ConditionKind::Domain => DomainKind::Domain,
            ConditionKind::Regexp => DomainKind::Regex,
        };

        let domain = DomainRecord::new(kind, condition.payload());
        records.push(MatcherRecord {
            matcher: Matcher::from_record(&domain)?,
            condition: index,
        });
    }

    Ok(DomainMatcher {
        records,
        conditions,
    })
}

/// Resolve a group payload (`name` or `name@attr`) to its domain records,
/// in dataset order.
pub fn expand_group<'a>(payload: &str, data: &'a GeoSiteData) -> Result<Vec<&'a DomainRecord>> {
    let (name, attr) = parse_group_payload(payload)?;
    let code = name.to_uppercase();

    let domains = data
        .lookup(&code)
        .ok_or_else(|| GeoMatchError::GroupNotFound(payload.to_string()))?;

    let expanded: Vec<&DomainRecord> = match attr {
        Some(attr) => domains.iter().filter(|d| d.has_attribute(attr)).collect(),
        None => domains.iter().collect(),
    };

    if expanded.is_empty() {
        tracing::warn!(group = %code, attribute = ?attr, "group expands to no domains");
    } else {
        tracing::debug!(
            group = %code,
            attribute = ?attr,
            records = expanded.len(),
            "expanded group"
        );
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_conditions;

    fn dataset() -> GeoSiteData {
        let mut data = GeoSiteData::new();
        data.insert(
            "GOOGLE",
            vec![
                DomainRecord::new_domain("google.com"),
                DomainRecord::new_domain("googleoptimize.com").with_attribute("ads"),
                DomainRecord::new_full("www.google.cn").with_attribute("cn"),
            ],
        );
        data.insert(
            "MICROSOFT",
            vec![
                DomainRecord::new_domain("microsoft.com"),
                DomainRecord::new_full("www.microsoft.com"),
            ],
        );
        data
    }

    fn build(rules: &[&str]) -> Result<DomainMatcher> {
        compile(parse_conditions(rules)?, &dataset())
    }

    fn explain(matcher: &DomainMatcher, domain: &str) -> Vec<String> {
        matcher
            .match_domain(domain)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_one_matcher_per_primitive_rule() {
        let matcher = build(&["keyword:video", "full:www.baidu.com"]).unwrap();
        assert_eq!(matcher.condition_count(), 2);
        assert_eq!(matcher.matcher_count(), 2);
    }

    #[test]
    fn test_group_expands_in_dataset_order() {
        let matcher = build(&["group:google"]).unwrap();
        assert_eq!(matcher.condition_count(), 1);
        assert_eq!(matcher.matcher_count(), 3);
        assert_eq!(
            explain(&matcher, "ads.googleoptimize.com"),
            vec!["group:google/domain:googleoptimize.com"]
        );
    }

    #[test]
    fn test_multiple_hits_from_one_group() {
        let matcher = build(&["group:microsoft"]).unwrap();
        assert_eq!(
            explain(&matcher, "www.microsoft.com"),
            vec![
                "group:microsoft/domain:microsoft.com",
                "group:microsoft/full:www.microsoft.com",
            ]
        );
    }

    #[test]
    fn test_trailing_dot_is_stripped_once() {
        let matcher = build(&["full:www.baidu.com"]).unwrap();
        assert_eq!(explain(&matcher, "www.baidu.com."), vec!["full:www.baidu.com"]);
        assert!(matcher.match_domain("www.baidu.com..").is_empty());
        assert!(matcher.matches("www.baidu.com."));
    }

    #[test]
    fn test_templates_not_mutated_by_queries() {
        let matcher = build(&["group:microsoft"]).unwrap();
        for _ in 0..3 {
            let hits = matcher.match_domain("www.microsoft.com");
            assert!(hits.iter().all(|c| c.children().len() == 1));
        }
        assert!(matcher.conditions()[0].children().is_empty());
    }

    #[test]
    fn test_group_lookup_is_case_insensitive() {
        assert!(build(&["group:Google"]).is_ok());
        assert!(build(&["group:GOOGLE"]).is_ok());
    }

    #[test]
    fn test_missing_group() {
        let err = build(&["keyword:a", "group:nope"]).unwrap_err();
        assert!(matches!(err, GeoMatchError::GroupNotFound(ref g) if g == "nope"));
    }

    #[test]
    fn test_attribute_filter() {
        let data = dataset();
        let ads = expand_group("google@ads", &data).unwrap();
        assert_eq!(ads, vec![&DomainRecord::new_domain("googleoptimize.com").with_attribute("ads")]);

        assert!(expand_group("google@nothing", &data).unwrap().is_empty());
        assert!(matches!(
            expand_group("google@", &data),
            Err(GeoMatchError::MalformedGroupPayload(_))
        ));
    }

    #[test]
    fn test_empty_filter_yields_rule_that_never_fires() {
        let matcher = build(&["group:google@nothing"]).unwrap();
        assert_eq!(matcher.condition_count(), 1);
        assert!(matcher.is_empty());
        assert!(matcher.match_domain("google.com").is_empty());
    }

    #[test]
    fn test_invalid_regex_aborts() {
        let err = build(&["keyword:a", "regexp:*baidu.com"]).unwrap_err();
        assert!(matches!(err, GeoMatchError::InvalidPattern { .. }));
    }
}
