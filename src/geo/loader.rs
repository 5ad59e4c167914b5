use std::path::{Path, PathBuf};

use crate::error::{GeoMatchError, Result};

use super::format::GeoSiteFormat;
use super::record::{DomainRecord, GeoSiteData};
use super::{dat, singsite};

/// Trait for loading GeoSite data.
///
/// A loader is read once per [`DomainMatcherBuilder::build`](crate::DomainMatcherBuilder::build);
/// failures are not retried.
pub trait GeoSiteLoader: Send + Sync {
    /// Read and decode the whole dataset
    fn load(&self) -> Result<GeoSiteData>;
}

/// File-based GeoSiteLoader with format auto-detection.
///
/// A directory path resolves to the format's default filename inside it
/// (`geosite.dat` unless a format is set).
#[derive(Debug, Clone)]
pub struct FileGeoSiteLoader {
    path: PathBuf,
    format: Option<GeoSiteFormat>,
}

impl FileGeoSiteLoader {
    /// Create a new FileGeoSiteLoader
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
        }
    }

    /// Set explicit GeoSite format (overrides auto-detection)
    pub fn with_format(mut self, format: GeoSiteFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File actually read by [`load`](GeoSiteLoader::load)
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.is_dir() {
            let format = self.format.unwrap_or(GeoSiteFormat::Dat);
            self.path.join(format.default_filename())
        } else {
            self.path.clone()
        }
    }

    /// Get GeoSite format (explicit or detected from the resolved path)
    pub fn format(&self) -> Option<GeoSiteFormat> {
        self.format
            .or_else(|| GeoSiteFormat::detect(self.resolved_path()))
    }
}

impl GeoSiteLoader for FileGeoSiteLoader {
    fn load(&self) -> Result<GeoSiteData> {
        let path = self.resolved_path();
        let format = self.format.or_else(|| GeoSiteFormat::detect(&path)).ok_or_else(|| {
            GeoMatchError::DatasetUnavailable(format!(
                "Cannot detect GeoSite format of {}",
                path.display()
            ))
        })?;

        let data = match format {
            GeoSiteFormat::Dat => dat::load_geosite(&path)?,
            GeoSiteFormat::Sing => singsite::load_geosite(&path)?,
        };

        tracing::debug!(
            path = %path.display(),
            format = ?format,
            groups = data.len(),
            "loaded geosite dataset"
        );
        Ok(data)
    }
}

/// In-memory GeoSiteLoader for testing and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryGeoSiteLoader {
    data: GeoSiteData,
}

impl MemoryGeoSiteLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group; the code is matched case-insensitively
    pub fn add_group(&mut self, code: &str, records: Vec<DomainRecord>) {
        self.data.insert(code, records);
    }

    pub fn with_group(mut self, code: &str, records: Vec<DomainRecord>) -> Self {
        self.add_group(code, records);
        self
    }
}

impl From<GeoSiteData> for MemoryGeoSiteLoader {
    fn from(data: GeoSiteData) -> Self {
        Self { data }
    }
}

impl GeoSiteLoader for MemoryGeoSiteLoader {
    fn load(&self) -> Result<GeoSiteData> {
        Ok(self.data.clone())
    }
}

/// Verify GeoSite file integrity
pub fn verify_geosite_file(path: &Path, format: GeoSiteFormat) -> Result<()> {
    match format {
        GeoSiteFormat::Dat => dat::verify_geosite(path),
        GeoSiteFormat::Sing => singsite::verify(path),
    }
}
