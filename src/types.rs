use std::fmt;

/// Kind of a rule condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Substring match
    Keyword,
    /// Exact domain match
    Full,
    /// Domain and all of its subdomains
    Domain,
    /// Regex search
    Regexp,
    /// Named domain list from the geosite dataset
    Group,
}

impl ConditionKind {
    /// All kinds, in the order rule prefixes are tried
    pub const ALL: [ConditionKind; 5] = [
        ConditionKind::Keyword,
        ConditionKind::Regexp,
        ConditionKind::Full,
        ConditionKind::Domain,
        ConditionKind::Group,
    ];

    /// Rule-string prefix for this kind (without the colon)
    pub fn prefix(&self) -> &'static str {
        match self {
            ConditionKind::Keyword => "keyword",
            ConditionKind::Full => "full",
            ConditionKind::Domain => "domain",
            ConditionKind::Regexp => "regexp",
            ConditionKind::Group => "group",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single rule, or one entry of a match explanation.
///
/// Conditions built from rule strings are templates and never carry children.
/// A condition returned by [`DomainMatcher::match_domain`](crate::DomainMatcher::match_domain)
/// for a group rule carries the primitive condition that fired inside the
/// group as its child, so `group:gfw` matching through its `domain:youtube.com`
/// record renders as `group:gfw/domain:youtube.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    kind: ConditionKind,
    payload: String,
    children: Vec<Condition>,
}

impl Condition {
    pub fn new(kind: ConditionKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn children(&self) -> &[Condition] {
        &self.children
    }

    pub fn is_group(&self) -> bool {
        self.kind == ConditionKind::Group
    }

    /// Copy of this condition with `child` appended to its provenance
    pub(crate) fn with_child(&self, child: Condition) -> Self {
        let mut children = Vec::with_capacity(self.children.len() + 1);
        children.extend(self.children.iter().cloned());
        children.push(child);
        Self {
            kind: self.kind,
            payload: self.payload.clone(),
            children,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.payload)?;
        for child in &self.children {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}
