use std::fs;
use std::path::Path;

use prost::Message;

use super::record::{DomainKind, DomainRecord, GeoSiteData};
use crate::error::{GeoMatchError, Result};

/// Protobuf messages of the V2Ray `geosite.dat` format (`router.proto`)
pub mod geodat {
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Domain {
        #[prost(enumeration = "domain::Type", tag = "1")]
        pub r#type: i32,
        #[prost(string, tag = "2")]
        pub value: String,
        #[prost(message, repeated, tag = "3")]
        pub attribute: Vec<domain::Attribute>,
    }

    pub mod domain {
        #[derive(Clone, PartialEq, prost::Message)]
        pub struct Attribute {
            #[prost(string, tag = "1")]
            pub key: String,
            #[prost(oneof = "attribute::TypedValue", tags = "2, 3")]
            pub typed_value: Option<attribute::TypedValue>,
        }

        pub mod attribute {
            #[derive(Clone, PartialEq, prost::Oneof)]
            pub enum TypedValue {
                #[prost(bool, tag = "2")]
                BoolValue(bool),
                #[prost(int64, tag = "3")]
                IntValue(i64),
            }
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
        #[repr(i32)]
        pub enum Type {
            Plain = 0,
            Regex = 1,
            RootDomain = 2,
            Full = 3,
        }
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct GeoSite {
        #[prost(string, tag = "1")]
        pub country_code: String,
        #[prost(message, repeated, tag = "2")]
        pub domain: Vec<Domain>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct GeoSiteList {
        #[prost(message, repeated, tag = "1")]
        pub entry: Vec<GeoSite>,
    }
}

/// Load GeoSite data from V2Ray DAT format
pub fn load_geosite(path: impl AsRef<Path>) -> Result<GeoSiteData> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| {
        GeoMatchError::DatasetUnavailable(format!(
            "Failed to read DAT file {}: {}",
            path.display(),
            e
        ))
    })?;

    decode_geosite(&data)
}

/// Decode an in-memory V2Ray GeoSite list
pub fn decode_geosite(bytes: &[u8]) -> Result<GeoSiteData> {
    let list = geodat::GeoSiteList::decode(bytes)
        .map_err(|e| GeoMatchError::DatasetCorrupt(format!("Failed to decode GeoSite DAT: {}", e)))?;

    let mut result = GeoSiteData::new();

    for entry in list.entry {
        let domains = entry
            .domain
            .iter()
            .map(|domain| domain_to_record(&entry.country_code, domain))
            .collect::<Result<Vec<_>>>()?;

        if !result.insert(&entry.country_code, domains) {
            tracing::debug!(code = %entry.country_code, "duplicate geosite entry ignored");
        }
    }

    Ok(result)
}

/// Convert protobuf Domain to DomainRecord
fn domain_to_record(code: &str, domain: &geodat::Domain) -> Result<DomainRecord> {
    use geodat::domain::Type;

    let kind = match Type::try_from(domain.r#type) {
        Ok(Type::Plain) => DomainKind::Plain,
        Ok(Type::Regex) => DomainKind::Regex,
        Ok(Type::RootDomain) => DomainKind::Domain,
        Ok(Type::Full) => DomainKind::Full,
        Err(_) => {
            return Err(GeoMatchError::DatasetCorrupt(format!(
                "Unknown domain type {} in group {}",
                domain.r#type, code
            )))
        }
    };

    Ok(DomainRecord {
        kind,
        value: domain.value.clone(),
        attributes: domain.attribute.iter().map(|a| a.key.clone()).collect(),
    })
}

/// Verify DAT file integrity by attempting to load it
pub fn verify_geosite(path: impl AsRef<Path>) -> Result<()> {
    load_geosite(path)?;
    Ok(())
}
