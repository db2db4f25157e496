//! CSV format dataset implementation
//!
//! Supports loading feature collections from CSV files where:
//! - Every column is a feature
//! - Every data row has the same number of columns
//! - First row can be headers (automatically detected)

use crate::core::{KernelError, Result};
use crate::data::DenseFeatures;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset loaded from a CSV file
#[derive(Debug, Clone)]
pub struct CSVDataset {
    features: DenseFeatures,
    header: Option<Vec<String>>,
}

impl CSVDataset {
    /// Load a dataset from a CSV file, detecting a header row
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader, detecting a header row
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, true)
    }

    /// Load a dataset from a reader with explicit header option
    pub fn from_reader_with_options<R: BufRead>(reader: R, auto_detect_header: bool) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut header = None;
        let mut seen_content = false;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(KernelError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !seen_content {
                seen_content = true;
                if auto_detect_header && Self::is_header_line(line) {
                    header = Some(line.split(',').map(|f| f.trim().to_string()).collect());
                    continue;
                }
            }

            let row = Self::parse_data_line(line).map_err(|e| {
                KernelError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(KernelError::DimensionMismatch {
                        expected: first.len(),
                        actual: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(KernelError::EmptyDataset);
        }

        Ok(CSVDataset {
            features: DenseFeatures::new(rows),
            header,
        })
    }

    /// Check if a line appears to be a header
    fn is_header_line(line: &str) -> bool {
        let fields: Vec<&str> = line.split(',').collect();

        let non_numeric_count = fields
            .iter()
            .filter(|field| field.trim().parse::<f64>().is_err())
            .count();

        non_numeric_count * 2 > fields.len()
    }

    /// Parse a CSV data line into a dense row
    fn parse_data_line(line: &str) -> Result<Vec<f64>> {
        line.split(',')
            .map(str::trim)
            .enumerate()
            .map(|(idx, field)| {
                field.parse::<f64>().map_err(|_| {
                    KernelError::ParseError(format!(
                        "Invalid feature value at column {}: {}",
                        idx + 1,
                        field
                    ))
                })
            })
            .collect()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Column names, if the file had a header row
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Borrow the loaded feature collection
    pub fn features(&self) -> &DenseFeatures {
        &self.features
    }

    /// Take ownership of the loaded feature collection
    pub fn into_features(self) -> DenseFeatures {
        self.features
    }
}
