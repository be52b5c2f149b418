//! Practice Catalogue Module
//! Cascade queries over the loaded table, mirroring the sidebar filters:
//! ICB -> LA district -> practice.

use polars::prelude::*;
use thiserror::Error;

use super::loader::PRACTICE_DISPLAY;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Unknown practice: {0}")]
    UnknownPractice(String),
}

/// One row of the practice table, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeRecord {
    pub code: String,
    pub name: String,
    pub postcode: String,
    pub ccg_code: String,
    pub ccg_name: String,
    pub pcn_code: String,
    pub pcn_name: String,
    pub location_code: String,
    pub location_name: String,
    pub icb_code: String,
    pub icb_name: String,
    pub region_code: String,
    pub region_name: String,
    pub district_code: String,
    pub district_name: String,
    pub la_code: String,
    pub la_name: String,
    pub registered_patients: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub display: String,
}

/// Read-only queries over the practice table.
pub struct Catalog;

impl Catalog {
    /// Distinct ICB names, sorted.
    pub fn icbs(df: &DataFrame) -> Result<Vec<String>, CatalogError> {
        let mut icbs = Self::unique_values(df, "ICB name")?;
        icbs.sort();
        Ok(icbs)
    }

    /// Distinct district names under an ICB, in first-occurrence order.
    pub fn districts(df: &DataFrame, icb: &str) -> Result<Vec<String>, CatalogError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col("ICB name").eq(lit(icb)))
            .collect()?;
        Self::unique_values(&filtered, "LA District name")
    }

    /// Display labels of practices matching the ICB and district selection.
    /// An empty district selection means no district constraint.
    pub fn practices(
        df: &DataFrame,
        icb: &str,
        districts: &[String],
    ) -> Result<Vec<String>, CatalogError> {
        let mut predicate = col("ICB name").eq(lit(icb));
        if !districts.is_empty() {
            let mut in_districts = lit(false);
            for district in districts {
                in_districts =
                    in_districts.or(col("LA District name").eq(lit(district.as_str())));
            }
            predicate = predicate.and(in_districts);
        }
        let filtered = df.clone().lazy().filter(predicate).collect()?;
        Self::unique_values(&filtered, PRACTICE_DISPLAY)
    }

    /// Resolve a display label to its full record. Labels are assumed unique;
    /// the first matching row wins.
    pub fn record(df: &DataFrame, display: &str) -> Result<PracticeRecord, CatalogError> {
        let row = df
            .clone()
            .lazy()
            .filter(col(PRACTICE_DISPLAY).eq(lit(display)))
            .collect()?;
        if row.height() == 0 {
            return Err(CatalogError::UnknownPractice(display.to_string()));
        }

        Ok(PracticeRecord {
            code: Self::text(&row, "GP Practice code")?,
            name: Self::text(&row, "GP Practice name")?,
            postcode: Self::text(&row, "GP Practice postcode")?,
            ccg_code: Self::text(&row, "CCG code")?,
            ccg_name: Self::text(&row, "CCG name")?,
            pcn_code: Self::text(&row, "PCN code")?,
            pcn_name: Self::text(&row, "PCN name")?,
            location_code: Self::text(&row, "Location code")?,
            location_name: Self::text(&row, "Location name")?,
            icb_code: Self::text(&row, "ICB code")?,
            icb_name: Self::text(&row, "ICB name")?,
            region_code: Self::text(&row, "Region code")?,
            region_name: Self::text(&row, "Region name")?,
            district_code: Self::text(&row, "LA District code")?,
            district_name: Self::text(&row, "LA District name")?,
            la_code: Self::text(&row, "LA code")?,
            la_name: Self::text(&row, "LA name")?,
            registered_patients: Self::number(&row, "Registered Patients")? as i64,
            latitude: Self::number(&row, "Latitude")?,
            longitude: Self::number(&row, "Longitude")?,
            display: Self::text(&row, PRACTICE_DISPLAY)?,
        })
    }

    fn text(df: &DataFrame, column: &str) -> Result<String, CatalogError> {
        let value = df.column(column)?.get(0)?;
        Ok(value.to_string().trim_matches('"').to_string())
    }

    fn number(df: &DataFrame, column: &str) -> Result<f64, CatalogError> {
        let column = df.column(column)?.cast(&DataType::Float64)?;
        Ok(column.f64()?.get(0).unwrap_or(f64::NAN))
    }

    /// Non-null values of a column with duplicates removed, keeping
    /// first-seen order.
    fn unique_values(df: &DataFrame, column: &str) -> Result<Vec<String>, CatalogError> {
        let series = df
            .column(column)?
            .as_materialized_series()
            .unique_stable()?;
        Ok((0..series.len())
            .filter_map(|i| {
                let value = series.get(i).ok()?;
                if value.is_null() {
                    None
                } else {
                    Some(value.to_string().trim_matches('"').to_string())
                }
            })
            .collect())
    }
}
