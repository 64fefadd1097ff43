//! CSV import for seeding the scheme catalog.
//!
//! Expected header: `name,eligibility,provider,benefits,link,target_group`.
//! Eligibility cells keep their raw rule text; quote them when they contain
//! commas (`"category=sc,st;income<250000"`).

mod parser;

use crate::workflows::schemes::SchemeDraft;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read scheme catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid scheme catalog CSV: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct SchemeCatalogImporter;

impl SchemeCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SchemeDraft>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SchemeDraft>, CatalogImportError> {
        let drafts = parser::parse_drafts(reader)?;
        Ok(drafts)
    }
}
