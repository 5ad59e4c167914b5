use std::collections::HashMap;

/// Domain type in GeoSite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// Plain text substring match
    Plain,
    /// Regex pattern match
    Regex,
    /// Root domain match (domain + all subdomains)
    Domain,
    /// Exact domain match (full match)
    Full,
}

/// A domain entry of a geosite group, with its attribute tags.
/// Uses Vec instead of a set for attributes since most entries have 0-1 attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub kind: DomainKind,
    pub value: String,
    pub attributes: Vec<String>,
}

impl DomainRecord {
    pub fn new(kind: DomainKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn new_plain(value: impl Into<String>) -> Self {
        Self::new(DomainKind::Plain, value)
    }

    pub fn new_regex(pattern: impl Into<String>) -> Self {
        Self::new(DomainKind::Regex, pattern)
    }

    pub fn new_domain(value: impl Into<String>) -> Self {
        Self::new(DomainKind::Domain, value)
    }

    pub fn new_full(value: impl Into<String>) -> Self {
        Self::new(DomainKind::Full, value)
    }

    pub fn with_attribute(mut self, key: impl Into<String>) -> Self {
        self.attributes.push(key.into());
        self
    }

    /// Exact tag comparison; `ad` does not match a record tagged `ads`
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a == key)
    }
}

/// Decoded geosite dataset: group code → ordered domain records.
///
/// Codes are stored upper-cased so lookups are case-insensitive once the
/// caller upper-cases the requested identifier.
#[derive(Debug, Clone, Default)]
pub struct GeoSiteData {
    groups: HashMap<String, Vec<DomainRecord>>,
}

impl GeoSiteData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group. The first group registered under a code wins; later
    /// duplicates are ignored and `false` is returned.
    pub fn insert(&mut self, code: &str, records: Vec<DomainRecord>) -> bool {
        let code = code.to_uppercase();
        if self.groups.contains_key(&code) {
            return false;
        }
        self.groups.insert(code, records);
        true
    }

    /// Look up a group by its upper-cased code
    pub fn lookup(&self, code: &str) -> Option<&[DomainRecord]> {
        self.groups.get(code).map(Vec::as_slice)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.groups.contains_key(code)
    }

    /// Group codes in no particular order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_attributes() {
        let record = DomainRecord::new_domain("googleoptimize.com")
            .with_attribute("ads")
            .with_attribute("cn");

        assert!(record.has_attribute("ads"));
        assert!(record.has_attribute("cn"));
        assert!(!record.has_attribute("ad"));
        assert!(!record.has_attribute("ADS"));
    }

    #[test]
    fn test_codes_are_uppercased() {
        let mut data = GeoSiteData::new();
        assert!(data.insert("google", vec![DomainRecord::new_domain("google.com")]));

        assert!(data.contains("GOOGLE"));
        assert!(data.lookup("google").is_none());
        assert_eq!(data.lookup("GOOGLE").unwrap().len(), 1);
    }

    #[test]
    fn test_first_group_wins() {
        let mut data = GeoSiteData::new();
        data.insert("CN", vec![DomainRecord::new_domain("baidu.com")]);
        assert!(!data.insert("cn", vec![DomainRecord::new_domain("qq.com")]));

        let records = data.lookup("CN").unwrap();
        assert_eq!(records, &[DomainRecord::new_domain("baidu.com")]);
        assert_eq!(data.len(), 1);
    }
}
