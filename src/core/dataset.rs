//! Population dataset — one [`YearRecord`] per calendar year, each holding
//! the population figure of every country for that year.
//!
//! The on-disk shape is a JSON array:
//!
//! ```text
//! [{ "Year": 2000, "Countries": [{ "_id": "…", "Country": "China", "Population": 1262645000 }] }]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

/// The static asset compiled into the binary.
const BUNDLED: &str = include_str!("../../assets/population.json");

// ───────────────────────────────────────── errors ────────────

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("year {year}: country record {index} has an empty id")]
    EmptyId { year: i32, index: usize },
}

// ───────────────────────────────────────── records ───────────

/// A single country's population in a given year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Country")]
    pub name: String,
    #[serde(rename = "Population")]
    pub population: u64,
}

/// All country figures for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YearRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Countries", default)]
    pub countries: Vec<CountryRecord>,
}

// ───────────────────────────────────────── dataset ───────────

/// The full dataset, ordered by year ascending with unique years.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<YearRecord>,
}

impl Dataset {
    /// Build a dataset from raw records, sorting by year and dropping any
    /// record whose year was already seen.
    pub fn from_records(mut records: Vec<YearRecord>) -> Self {
        records.sort_by_key(|r| r.year);

        let mut seen = HashSet::new();
        records.retain(|r| {
            let fresh = seen.insert(r.year);
            if !fresh {
                tracing::warn!(year = r.year, "duplicate year in dataset, keeping the first record");
            }
            fresh
        });

        Self { records }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<YearRecord> = serde_json::from_str(json)?;

        for record in &records {
            if let Some(index) = record.countries.iter().position(|c| c.id.is_empty()) {
                return Err(DatasetError::EmptyId {
                    year: record.year,
                    index,
                });
            }
        }

        Ok(Self::from_records(records))
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse the asset bundled into the binary.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json_str(BUNDLED)
    }

    /// Available years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn get(&self, year: i32) -> Option<&YearRecord> {
        self.records
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|i| &self.records[i])
    }

    pub fn contains(&self, year: i32) -> bool {
        self.get(year).is_some()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.records.first().map(|r| r.year)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
