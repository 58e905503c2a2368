use crate::domain::model::{GeoPoint, Institute};
use crate::utils::error::{CalcError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Read-only catalog of training institutes.
///
/// Iteration order is the order entries were supplied in, and it decides
/// which institute wins when two are equally close to a practice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstituteDirectory {
    institutes: Vec<Institute>,
}

#[derive(Debug, Deserialize)]
struct InstituteRecord {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl InstituteDirectory {
    pub fn new(institutes: Vec<Institute>) -> Self {
        Self { institutes }
    }

    /// Reads `name,latitude,longitude` rows with a header line.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut institutes = Vec::new();

        for (row, record) in csv_reader.deserialize::<InstituteRecord>().enumerate() {
            let record = record?;
            if record.name.is_empty() {
                return Err(CalcError::InvalidConfigValueError {
                    field: format!("catalog.csv row {}", row + 1),
                    value: String::new(),
                    reason: "Institute name cannot be empty".to_string(),
                });
            }
            let location = GeoPoint::new(record.latitude, record.longitude)?;
            institutes.push(Institute::new(record.name, location));
        }

        Ok(Self { institutes })
    }

    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)?;
        let directory = Self::from_csv_reader(file)?;
        tracing::debug!(
            "Loaded {} institutes from {}",
            directory.len(),
            path.as_ref().display()
        );
        Ok(directory)
    }

    /// Appends another catalog, keeping both orders intact.
    pub fn extend(&mut self, other: InstituteDirectory) {
        self.institutes.extend(other.institutes);
    }

    pub fn institutes(&self) -> &[Institute] {
        &self.institutes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Institute> {
        self.institutes.iter()
    }

    pub fn len(&self) -> usize {
        self.institutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutes.is_empty()
    }
}
