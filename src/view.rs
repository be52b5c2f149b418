//! View Construction Module
//! Pure per-frame request handler: current filter selection in, render
//! description out. No state is carried across frames beyond the memoized
//! table and the selection itself.

use polars::prelude::DataFrame;
use regex::Regex;
use std::sync::OnceLock;

use crate::data::{Catalog, CatalogError, PracticeRecord};
use crate::map::{MapBounds, Marker};

/// The user's current filter choices. Stale entries are normalized away on
/// every rebuild.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Selection {
    pub icb: Option<String>,
    pub districts: Vec<String>,
    pub practice: Option<String>,
}

/// Marker plus fitted viewport for the map panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub marker: Marker,
    pub bounds: MapBounds,
}

/// Render description consumed by the GUI each frame.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub icb_options: Vec<String>,
    pub district_options: Vec<String>,
    pub practice_options: Vec<String>,
    pub selection: Selection,
    pub record: Option<PracticeRecord>,
    pub map: Option<MapView>,
    pub summary: Option<String>,
}

/// Build the render description for the current selection.
///
/// Normalization rules: an absent or stale ICB falls back to the first
/// option, stale districts are dropped, and an absent or stale practice falls
/// back to the first available label. An empty practice set leaves the
/// practice, record, map and summary unset.
pub fn build(df: &DataFrame, selection: &Selection) -> Result<ViewModel, CatalogError> {
    let icb_options = Catalog::icbs(df)?;

    let icb = match &selection.icb {
        Some(choice) if icb_options.contains(choice) => Some(choice.clone()),
        _ => icb_options.first().cloned(),
    };
    let Some(icb) = icb else {
        return Ok(ViewModel {
            icb_options,
            ..ViewModel::default()
        });
    };

    let district_options = Catalog::districts(df, &icb)?;
    let districts: Vec<String> = selection
        .districts
        .iter()
        .filter(|district| district_options.contains(*district))
        .cloned()
        .collect();

    let practice_options = Catalog::practices(df, &icb, &districts)?;
    let practice = match &selection.practice {
        Some(choice) if practice_options.contains(choice) => Some(choice.clone()),
        _ => practice_options.first().cloned(),
    };

    let (record, map, summary) = match &practice {
        Some(display) => {
            let record = Catalog::record(df, display)?;
            let map = MapView {
                marker: Marker {
                    latitude: record.latitude,
                    longitude: record.longitude,
                    label: display.clone(),
                },
                bounds: MapBounds::around(record.latitude, record.longitude),
            };
            (Some(record), Some(map), Some(strip_code_prefix(display)))
        }
        None => (None, None, None),
    };

    Ok(ViewModel {
        icb_options,
        district_options,
        practice_options,
        selection: Selection {
            icb: Some(icb),
            districts,
            practice,
        },
        record,
        map,
        summary,
    })
}

/// Strip the leading `"<code>:"` prefix from a display label.
pub fn strip_code_prefix(label: &str) -> String {
    static CODE_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = CODE_PREFIX.get_or_init(|| Regex::new(r"\w+:").expect("static pattern"));
    re.replace_all(label, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn fixture() -> DataFrame {
        DataFrame::new(vec![
            Column::new("GP Practice code".into(), vec!["A81001", "A81004", "F83004"]),
            Column::new(
                "GP Practice name".into(),
                vec!["THE DENSHAM SURGERY", "BLUEBELL MEDICAL CENTRE", "REGENTS PARK PRACTICE"],
            ),
            Column::new(
                "GP Practice postcode".into(),
                vec!["TS18 1HU", "TS5 8SB", "NW1 4NS"],
            ),
            Column::new("CCG code".into(), vec!["00K", "00M", "93C"]),
            Column::new(
                "CCG name".into(),
                vec!["NHS Tees Valley CCG", "NHS Tees Valley CCG", "NHS North Central London CCG"],
            ),
            Column::new("PCN code".into(), vec!["U46920", "U12548", "U33445"]),
            Column::new(
                "PCN name".into(),
                vec!["Stockton PCN", "Acklam PCN", "Regents PCN"],
            ),
            Column::new(
                "Location code".into(),
                vec!["E40000012", "E40000012", "E40000003"],
            ),
            Column::new(
                "Location name".into(),
                vec!["North East and Yorkshire", "North East and Yorkshire", "London"],
            ),
            Column::new("ICB code".into(), vec!["QHM", "QHM", "QMJ"]),
            Column::new(
                "ICB name".into(),
                vec![
                    "North East and North Cumbria",
                    "North East and North Cumbria",
                    "North Central London",
                ],
            ),
            Column::new("Region code".into(), vec!["Y63", "Y63", "Y56"]),
            Column::new(
                "Region name".into(),
                vec!["North East and Yorkshire", "North East and Yorkshire", "London"],
            ),
            Column::new(
                "LA District code".into(),
                vec!["E06000004", "E06000002", "E09000007"],
            ),
            Column::new(
                "LA District name".into(),
                vec!["Stockton-on-Tees", "Middlesbrough", "Camden"],
            ),
            Column::new(
                "LA code".into(),
                vec!["E06000004", "E06000002", "E09000007"],
            ),
            Column::new(
                "LA name".into(),
                vec!["Stockton-on-Tees", "Middlesbrough", "Camden"],
            ),
            Column::new("Registered Patients".into(), vec![10250i64, 8123, 12900]),
            Column::new("Latitude".into(), vec![54.5705f64, 54.5520, 51.5265]),
            Column::new("Longitude".into(), vec![-1.3187f64, -1.2660, -0.1534]),
            Column::new(
                "practice_display".into(),
                vec![
                    "A81001: THE DENSHAM SURGERY",
                    "A81004: BLUEBELL MEDICAL CENTRE",
                    "F83004: REGENTS PARK PRACTICE",
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn default_selection_resolves_first_icb_and_practice() {
        let view = build(&fixture(), &Selection::default()).unwrap();
        assert_eq!(
            view.selection.icb.as_deref(),
            Some("North Central London") // first in sorted ICB order
        );
        assert_eq!(
            view.selection.practice.as_deref(),
            Some("F83004: REGENTS PARK PRACTICE")
        );
        let record = view.record.expect("record");
        assert_eq!(record.code, "F83004");
        let map = view.map.expect("map");
        assert_eq!(map.bounds, MapBounds::around(51.5265, -0.1534));
        assert_eq!(view.summary.as_deref(), Some("REGENTS PARK PRACTICE"));
    }

    #[test]
    fn stale_selection_falls_back_to_valid_defaults() {
        let selection = Selection {
            icb: Some("Nowhere ICB".to_string()),
            districts: vec!["Atlantis".to_string()],
            practice: Some("Z99999: GONE".to_string()),
        };
        let view = build(&fixture(), &selection).unwrap();
        assert_eq!(view.selection.icb.as_deref(), Some("North Central London"));
        assert!(view.selection.districts.is_empty());
        assert_eq!(
            view.selection.practice.as_deref(),
            Some("F83004: REGENTS PARK PRACTICE")
        );
    }

    #[test]
    fn district_selection_restricts_the_practice_options() {
        let selection = Selection {
            icb: Some("North East and North Cumbria".to_string()),
            districts: vec!["Middlesbrough".to_string()],
            practice: None,
        };
        let view = build(&fixture(), &selection).unwrap();
        assert_eq!(
            view.practice_options,
            vec!["A81004: BLUEBELL MEDICAL CENTRE"]
        );
        assert_eq!(
            view.selection.practice.as_deref(),
            Some("A81004: BLUEBELL MEDICAL CENTRE")
        );
    }

    #[test]
    fn districts_from_another_icb_are_dropped() {
        let selection = Selection {
            icb: Some("North Central London".to_string()),
            districts: vec!["Middlesbrough".to_string()],
            practice: None,
        };
        let view = build(&fixture(), &selection).unwrap();
        assert!(view.selection.districts.is_empty());
        assert_eq!(
            view.practice_options,
            vec!["F83004: REGENTS PARK PRACTICE"]
        );
    }

    #[test]
    fn empty_table_yields_an_empty_view() {
        let df = fixture().head(Some(0));
        let view = build(&df, &Selection::default()).unwrap();
        assert!(view.icb_options.is_empty());
        assert!(view.practice_options.is_empty());
        assert!(view.selection.practice.is_none());
        assert!(view.record.is_none());
        assert!(view.map.is_none());
        assert!(view.summary.is_none());
    }

    #[test]
    fn code_prefix_is_stripped_from_the_summary_label() {
        assert_eq!(
            strip_code_prefix("A81001: THE DENSHAM SURGERY"),
            "THE DENSHAM SURGERY"
        );
        assert_eq!(strip_code_prefix("no prefix here"), "no prefix here");
    }
}
