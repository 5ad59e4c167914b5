//! Builder module.
//!
//! Collects rule strings and a dataset source, then compiles them into a
//! [`DomainMatcher`].

use std::path::Path;
use std::sync::Arc;

use crate::compile::{compile, DomainMatcher};
use crate::error::{GeoMatchError, Result};
use crate::geo::{FileGeoSiteLoader, GeoSiteLoader};
use crate::parser::parse_conditions;

/// Builder for [`DomainMatcher`].
///
/// Rules keep the order in which they were added; that order is the order of
/// the explanations returned by [`DomainMatcher::match_domain`].
#[derive(Clone, Default)]
pub struct DomainMatcherBuilder {
    dataset: Option<Arc<dyn GeoSiteLoader>>,
    conditions: Vec<String>,
}

impl DomainMatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dataset source used to resolve `group:` rules
    pub fn with_dataset(mut self, loader: impl GeoSiteLoader + 'static) -> Self {
        self.dataset = Some(Arc::new(loader));
        self
    }

    /// Use a geosite file, detecting its format from the extension.
    ///
    /// A directory resolves to `geosite.dat` inside it.
    pub fn with_dataset_path(self, path: impl AsRef<Path>) -> Self {
        self.with_dataset(FileGeoSiteLoader::new(path))
    }

    /// Append one rule string such as `domain:example.com`
    pub fn add_condition(mut self, rule: impl Into<String>) -> Self {
        self.conditions.push(rule.into());
        self
    }

    /// Append several rule strings, keeping their order
    pub fn add_conditions<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Rule strings added so far
    pub fn rules(&self) -> &[String] {
        &self.conditions
    }

    /// Parse the rules, load the dataset and compile everything.
    ///
    /// Any failure aborts the build; no partially built matcher is returned.
    /// The builder itself is left untouched and can be built again.
    pub fn build(&self) -> Result<DomainMatcher> {
        let conditions = parse_conditions(self.conditions.as_slice())?;
        tracing::debug!(rules = conditions.len(), "parsed domain rules");

        let loader = self
            .dataset
            .as_ref()
            .ok_or_else(|| GeoMatchError::DatasetUnavailable("dataset not configured".to_string()))?;
        let data = loader.load()?;

        let matcher = compile(conditions, &data)?;
        tracing::info!(
            rules = matcher.condition_count(),
            matchers = matcher.matcher_count(),
            "built domain matcher"
        );
        Ok(matcher)
    }
}
