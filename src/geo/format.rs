use std::path::Path;

/// GeoSite file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoSiteFormat {
    /// V2Ray DAT format (protobuf)
    Dat,
    /// sing-geosite DB format
    Sing,
}

impl GeoSiteFormat {
    /// Detect format from file extension
    pub fn detect(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "dat" => Some(GeoSiteFormat::Dat),
            "db" => Some(GeoSiteFormat::Sing),
            _ => None,
        }
    }

    /// Get default filename for this format
    pub fn default_filename(&self) -> &'static str {
        match self {
            GeoSiteFormat::Dat => "geosite.dat",
            GeoSiteFormat::Sing => "geosite.db",
        }
    }
}
