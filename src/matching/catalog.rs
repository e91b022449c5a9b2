//! Job catalog: the fixed set of postings every profile is matched against

use crate::error::{CareerMatcherError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bumped whenever the required CSV columns change
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "company", "location", "link"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date_scraped: Option<String>,
}

impl JobListing {
    pub fn new(title: &str, company: &str, location: &str, link: &str) -> Self {
        Self {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            link: link.to_string(),
            source: None,
            date_scraped: None,
        }
    }

    /// Text the posting is embedded from
    pub fn embedding_text(&self) -> String {
        format!("{} {} {}", self.title, self.company, self.location)
    }
}

/// Immutable, ordered list of postings. Order is preserved through matching
/// so ties rank in catalog order.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    listings: Vec<JobListing>,
}

impl JobCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            CareerMatcherError::CatalogLoad(format!("{}: {}", path.display(), e))
        })?;
        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} job postings from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| CareerMatcherError::CatalogLoad(format!("Unreadable header: {}", e)))?
            .clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(CareerMatcherError::CatalogLoad(format!(
                "Missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let mut listings = Vec::new();
        for (row, record) in csv_reader.deserialize::<JobListing>().enumerate() {
            let listing = record.map_err(|e| {
                CareerMatcherError::CatalogLoad(format!("Malformed row {}: {}", row + 1, e))
            })?;
            listings.push(listing);
        }

        Ok(Self { listings })
    }

    pub fn from_listings(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }

    /// Seed postings written when no catalog exists yet
    pub fn default_listings() -> Vec<JobListing> {
        vec![
            JobListing::new("Software Developer", "Tech Company", "Remote", "#"),
            JobListing::new("Data Analyst", "Data Corp", "New York, NY", "#"),
            JobListing::new("Web Developer", "Web Solutions", "San Francisco, CA", "#"),
        ]
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            CareerMatcherError::OutputFormatting(format!("{}: {}", path.display(), e))
        })?;
        for listing in &self.listings {
            writer.serialize(listing).map_err(|e| {
                CareerMatcherError::OutputFormatting(format!("Failed to write posting: {}", e))
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn listings(&self) -> &[JobListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
