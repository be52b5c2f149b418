//! Practice Table Loader Module
//! Reads the GP practice CSV with Polars and applies the display-ready
//! transforms: column renames, placeholder fills and the derived label column.

use polars::prelude::*;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// Source-to-display column renames applied on load.
const COLUMN_RENAMES: [(&str, &str); 18] = [
    ("Practice_Code", "GP Practice code"),
    ("GP_Practice_Name", "GP Practice name"),
    ("Practice_Postcode", "GP Practice postcode"),
    ("CCG21", "CCG code"),
    ("Former CCG", "CCG name"),
    ("PCN_Code", "PCN code"),
    ("PCN_Name", "PCN name"),
    ("LOC22", "Location code"),
    ("LOC22name", "Location name"),
    ("ICS22", "ICB code"),
    ("ICS22name", "ICB name"),
    ("R22", "Region code"),
    ("Region22", "Region name"),
    ("LAD21", "LA District code"),
    ("LTLA21", "LA District name"),
    ("LA21", "LA code"),
    ("UTLA21", "LA name"),
    ("Patients", "Registered Patients"),
];

/// Derived `"<code>: <name>"` label column. Assumed unique per row; it is the
/// only key used for practice lookup.
pub const PRACTICE_DISPLAY: &str = "practice_display";

/// Placeholder written over missing and zero numeric values.
const NUMERIC_PLACEHOLDER: i64 = 1;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Practice file has no rows")]
    Empty,
}

static DATASET: OnceLock<Dataset> = OnceLock::new();

/// The loaded practice table. Read-only once constructed.
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    /// Load and transform the practice CSV.
    ///
    /// Columns are renamed to their display labels, missing and zero values in
    /// numeric columns are replaced by 1, and the `practice_display` label
    /// column is appended.
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10_000))
            .finish()?
            .rename(
                COLUMN_RENAMES.iter().map(|(from, _)| *from),
                COLUMN_RENAMES.iter().map(|(_, to)| *to),
                false,
            )
            .collect()?;

        let fills: Vec<Expr> = df
            .schema()
            .iter()
            .filter_map(|(name, dtype)| {
                if !is_numeric(dtype) {
                    return None;
                }
                let column = col(name.as_str());
                Some(
                    when(column.clone().is_null().or(column.clone().eq(lit(0))))
                        .then(lit(NUMERIC_PLACEHOLDER).cast(dtype.clone()))
                        .otherwise(column)
                        .alias(name.as_str()),
                )
            })
            .collect();

        let df = df
            .lazy()
            .with_columns(fills)
            .with_column(
                concat_str([col("GP Practice code"), col("GP Practice name")], ": ", true)
                    .alias(PRACTICE_DISPLAY),
            )
            .collect()?;

        if df.height() == 0 {
            return Err(LoaderError::Empty);
        }

        Ok(Self { df })
    }

    /// One-time process-wide load. The table is read once and cached for the
    /// process lifetime; later calls return the cached dataset and ignore
    /// `path`. There is no invalidation; a restart is the only refresh.
    pub fn init(path: &Path) -> Result<&'static Dataset, LoaderError> {
        if let Some(dataset) = DATASET.get() {
            return Ok(dataset);
        }
        let dataset = Self::load(path)?;
        info!(
            rows = dataset.df.height(),
            columns = dataset.df.width(),
            "practice table loaded"
        );
        Ok(DATASET.get_or_init(|| dataset))
    }

    /// Get a reference to the loaded table.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
