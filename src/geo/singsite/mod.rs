//! sing-geosite `geosite.db` reader.
//!
//! Layout: a version byte (0), a uvarint group count, one metadata row per
//! group `(vstring code, uvarint index, uvarint item count)`, then the items
//! of every group back to back as `(u8 kind, vstring value)`.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::record::{DomainKind, DomainRecord, GeoSiteData};
use crate::error::{GeoMatchError, Result};

/// Longest string accepted from a file; larger lengths are treated as corruption
const MAX_VSTRING_LENGTH: usize = 10 * 1024 * 1024;

/// Map a sing-geosite item kind byte to the record kind it encodes
fn item_kind(byte: u8) -> Option<DomainKind> {
    match byte {
        0 => Some(DomainKind::Full),
        1 => Some(DomainKind::Domain),
        2 => Some(DomainKind::Plain),
        3 => Some(DomainKind::Regex),
        _ => None,
    }
}

/// Where one group's items live in the file
#[derive(Debug, Clone)]
struct GroupSpan {
    code: String,
    offset: u64,
    items: usize,
}

/// Field decoder over any byte source
struct Fields<R> {
    inner: R,
}

impl<R: Read> Fields<R> {
    fn corrupt(what: &str, e: impl std::fmt::Display) -> GeoMatchError {
        GeoMatchError::DatasetCorrupt(format!("Failed to read {}: {}", what, e))
    }

    fn u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| Self::corrupt("byte", e))?;
        Ok(buf[0])
    }

    fn uvarint(&mut self) -> Result<u64> {
        let mut value = 0u64;
        for shift in (0..64).step_by(7) {
            let byte = self.u8()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(GeoMatchError::DatasetCorrupt("Varint overflow".to_string()))
    }

    fn length(&mut self) -> Result<usize> {
        usize::try_from(self.uvarint()?)
            .map_err(|e| Self::corrupt("length", e))
    }

    fn vstring(&mut self) -> Result<String> {
        let length = self.length()?;
        if length > MAX_VSTRING_LENGTH {
            return Err(GeoMatchError::DatasetCorrupt(format!(
                "String length {} exceeds limit of {} bytes",
                length, MAX_VSTRING_LENGTH
            )));
        }
        let mut buf = vec![0u8; length];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| Self::corrupt("string", e))?;
        String::from_utf8(buf).map_err(|e| Self::corrupt("UTF-8 string", e))
    }

    fn record(&mut self) -> Result<DomainRecord> {
        let byte = self.u8()?;
        let kind = item_kind(byte).ok_or_else(|| {
            GeoMatchError::DatasetCorrupt(format!("Unknown item type: {}", byte))
        })?;
        let value = self.vstring()?;
        Ok(to_record(kind, value))
    }
}

/// Build a record from a decoded item.
///
/// sing-geosite writes suffix items with a leading dot; it is dropped so the
/// item becomes an ordinary label-boundary suffix that also covers the apex.
/// Lists converted from V2Ray carry the apex as a separate full item as well,
/// so an apex query can explain the same group twice (full and domain), where
/// the equivalent `geosite.dat` explains it once.
fn to_record(kind: DomainKind, value: String) -> DomainRecord {
    match kind {
        DomainKind::Domain => match value.strip_prefix('.') {
            Some(stripped) => DomainRecord::new_domain(stripped),
            None => DomainRecord::new_domain(value),
        },
        _ => DomainRecord::new(kind, value),
    }
}

/// Sing-geosite reader
pub struct SingSiteReader<R> {
    fields: Fields<R>,
    groups: Vec<GroupSpan>,
}

impl SingSiteReader<BufReader<File>> {
    /// Open a sing-geosite database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            GeoMatchError::DatasetUnavailable(format!(
                "Failed to open sing-geosite file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> SingSiteReader<R> {
    /// Parse the metadata rows and locate every group's items.
    ///
    /// Groups keep file order, repeated codes included, each with its own span.
    pub fn new(reader: R) -> Result<Self> {
        let mut fields = Fields { inner: reader };

        let version = fields.u8()?;
        if version != 0 {
            return Err(GeoMatchError::DatasetCorrupt(format!(
                "Unknown sing-geosite version: {}",
                version
            )));
        }

        let count = fields.length()?;
        let mut rows = Vec::new();
        for _ in 0..count {
            let code = fields.vstring()?;
            let _index = fields.uvarint()?;
            let items = fields.length()?;
            rows.push((code, items));
        }

        let mut groups = Vec::with_capacity(rows.len());
        for (code, items) in rows {
            let offset = fields.inner.stream_position().map_err(|e| {
                GeoMatchError::DatasetCorrupt(format!("Failed to get stream position: {}", e))
            })?;
            for _ in 0..items {
                fields.u8()?;
                fields.vstring()?;
            }
            groups.push(GroupSpan {
                code,
                offset,
                items,
            });
        }

        Ok(Self { fields, groups })
    }

    /// Codes in file order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.code.as_str())
    }

    fn read_span(&mut self, index: usize) -> Result<Vec<DomainRecord>> {
        let GroupSpan { offset, items, .. } = self.groups[index];
        self.fields
            .inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| GeoMatchError::DatasetCorrupt(format!("Failed to seek: {}", e)))?;

        (0..items).map(|_| self.fields.record()).collect()
    }

    /// Read the records of the first group stored under `code`
    pub fn read(&mut self, code: &str) -> Result<Vec<DomainRecord>> {
        let index = self
            .groups
            .iter()
            .position(|g| g.code == code)
            .ok_or_else(|| GeoMatchError::GroupNotFound(code.to_string()))?;
        self.read_span(index)
    }

    /// Read every group into a dataset; a repeated code keeps its first group
    pub fn read_all(&mut self) -> Result<GeoSiteData> {
        let mut result = GeoSiteData::new();
        for index in 0..self.groups.len() {
            let records = self.read_span(index)?;
            let code = &self.groups[index].code;
            if !result.insert(code, records) {
                tracing::debug!(code = %code, "duplicate geosite entry ignored");
            }
        }
        Ok(result)
    }
}

/// Load GeoSite data from sing-geosite format (loads ALL codes)
pub fn load_geosite(path: impl AsRef<Path>) -> Result<GeoSiteData> {
    SingSiteReader::open(path)?.read_all()
}

/// Verify sing-geosite file integrity
pub fn verify(path: impl AsRef<Path>) -> Result<()> {
    SingSiteReader::open(path).map(drop)
}
