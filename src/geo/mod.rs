pub mod dat;
pub mod format;
pub mod loader;
pub mod record;
pub mod singsite;

pub use format::GeoSiteFormat;
pub use loader::{verify_geosite_file, FileGeoSiteLoader, GeoSiteLoader, MemoryGeoSiteLoader};
pub use record::{DomainKind, DomainRecord, GeoSiteData};
