use crate::error::{GeoMatchError, Result};
use crate::types::{Condition, ConditionKind};

/// Legacy prefix for group rules, kept for rule sets written against V2Ray
const GEOSITE_ALIAS: &str = "geosite";

/// Parse a rule string of the form `prefix:payload`.
///
/// Recognized prefixes are `keyword`, `regexp`, `full`, `domain` and `group`
/// (`geosite` is accepted as a synonym of `group`). The payload is kept
/// verbatim; an empty payload is allowed.
pub fn parse_condition(rule: &str) -> Result<Condition> {
    let (prefix, payload) = rule
        .split_once(':')
        .ok_or_else(|| GeoMatchError::MalformedRule(rule.to_string()))?;

    if prefix == GEOSITE_ALIAS {
        return Ok(Condition::new(ConditionKind::Group, payload));
    }

    ConditionKind::ALL
        .iter()
        .find(|kind| kind.prefix() == prefix)
        .map(|kind| Condition::new(*kind, payload))
        .ok_or_else(|| GeoMatchError::MalformedRule(rule.to_string()))
}

/// Parse every rule in order, stopping at the first malformed one
pub fn parse_conditions<S: AsRef<str>>(rules: &[S]) -> Result<Vec<Condition>> {
    rules.iter().map(|r| parse_condition(r.as_ref())).collect()
}

/// Split a group payload like `google@ads` into its identifier and attribute.
///
/// The split happens at the first `@`, so `a@b@c` yields attribute `b@c`.
/// A trailing bare `@` is rejected.
pub fn parse_group_payload(payload: &str) -> Result<(&str, Option<&str>)> {
    match payload.split_once('@') {
        None => Ok((payload, None)),
        Some((_, "")) => Err(GeoMatchError::MalformedGroupPayload(payload.to_string())),
        Some((name, attr)) => Ok((name, Some(attr))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_prefix() {
        let cases = [
            ("keyword:video", ConditionKind::Keyword, "video"),
            ("full:www.baidu.com", ConditionKind::Full, "www.baidu.com"),
            ("domain:baidu.com", ConditionKind::Domain, "baidu.com"),
            ("regexp:.*baidu.com", ConditionKind::Regexp, ".*baidu.com"),
            ("group:geolocation-!cn", ConditionKind::Group, "geolocation-!cn"),
        ];
        for (rule, kind, payload) in cases {
            let cond = parse_condition(rule).unwrap();
            assert_eq!(cond.kind(), kind, "rule {}", rule);
            assert_eq!(cond.payload(), payload, "rule {}", rule);
            assert_eq!(cond.to_string(), rule);
        }
    }

    #[test]
    fn test_geosite_alias_becomes_group() {
        let cond = parse_condition("geosite:google@ads").unwrap();
        assert_eq!(cond.kind(), ConditionKind::Group);
        assert_eq!(cond.payload(), "google@ads");
        assert_eq!(cond.to_string(), "group:google@ads");
    }

    #[test]
    fn test_payload_keeps_later_colons() {
        let cond = parse_condition("regexp:^a:b$").unwrap();
        assert_eq!(cond.payload(), "^a:b$");
    }

    #[test]
    fn test_malformed_rules() {
        for rule in ["suffix:example.com", "example.com", "", "Keyword:video", ":x"] {
            match parse_condition(rule) {
                Err(GeoMatchError::MalformedRule(r)) => assert_eq!(r, rule),
                other => panic!("expected MalformedRule for {:?}, got {:?}", rule, other),
            }
        }
    }

    #[test]
    fn test_parse_conditions_stops_at_first_error() {
        let rules = ["keyword:a", "bogus", "full:b"];
        let err = parse_conditions(&rules).unwrap_err();
        assert!(matches!(err, GeoMatchError::MalformedRule(ref r) if r == "bogus"));

        let ok = parse_conditions(&["keyword:a", "full:b"]).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_group_payload() {
        assert_eq!(parse_group_payload("google").unwrap(), ("google", None));
        assert_eq!(parse_group_payload("google@ads").unwrap(), ("google", Some("ads")));
        assert_eq!(parse_group_payload("a@b@c").unwrap(), ("a", Some("b@c")));
        assert_eq!(parse_group_payload("@ads").unwrap(), ("", Some("ads")));
        assert!(matches!(
            parse_group_payload("google@"),
            Err(GeoMatchError::MalformedGroupPayload(_))
        ));
    }
}
