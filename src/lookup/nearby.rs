//! Coordinate-distance proximity search.
//!
//! Distance is the sum of absolute latitude and longitude differences in
//! degrees. It is a coarse closeness heuristic, not a geodesic distance.

use geo::Coord;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::PincodeError;
use crate::models::{Pincode, Record};

/// Default proximity threshold, in degrees
pub const DEFAULT_MAX_DIFF: f64 = 0.05;

/// Manhattan distance between two positions, in degrees.
pub fn manhattan(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Reference position for a code.
///
/// The first record (in dataset order) carrying the code with both
/// coordinates present and non-zero is the anchor. Duplicates are not
/// averaged. `None` if there is no such record or its coordinates do not
/// parse.
pub fn anchor(code: &Pincode, records: &[Record]) -> Option<Coord<f64>> {
    let first = records
        .iter()
        .find(|r| *code == *r.code() && r.has_coordinates())?;

    let position = first.position();
    if position.is_none() {
        debug!("Anchor record for {} has unparseable coordinates", code);
    }
    position
}

/// Codes whose records lie within `max_diff` of the code's anchor.
///
/// The result is sorted, free of duplicates and never contains the query
/// code itself. A code without an anchor yields an empty list.
pub fn nearby(code: &str, max_diff: f64, records: &[Record]) -> Result<Vec<String>, PincodeError> {
    let code = Pincode::parse(code)?;
    Ok(nearby_linear(&code, max_diff, records))
}

/// Full scan behind [`nearby`], for an already validated code.
pub fn nearby_linear(code: &Pincode, max_diff: f64, records: &[Record]) -> Vec<String> {
    let Some(center) = anchor(code, records) else {
        return Vec::new();
    };

    let found: BTreeSet<&str> = records
        .iter()
        .filter(|r| {
            r.position()
                .is_some_and(|p| manhattan(p, center) <= max_diff)
        })
        .map(Record::code)
        .filter(|c| *code != **c)
        .collect();

    debug!("{} codes within {} of {}", found.len(), max_diff, code);
    found.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<Record> {
        values.into_iter().filter_map(Record::from_value).collect()
    }

    fn office(code: &str, lat: f64, lon: f64) -> Record {
        Record::from_value(json!({
            "Pincode": code,
            "Latitude": lat.to_string(),
            "Longitude": lon.to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn only_self_matches_gives_empty() {
        let data = records(vec![
            json!({"Pincode": "110001", "Name": "Connaught Place", "District": "New Delhi",
                   "Latitude": "28.63", "Longitude": "77.22"}),
            json!({"Pincode": "110001", "Name": "Parliament St", "District": "New Delhi",
                   "Latitude": "28.63", "Longitude": "77.21"}),
        ]);
        assert!(nearby("110001", DEFAULT_MAX_DIFF, &data).unwrap().is_empty());
    }

    #[test]
    fn finds_close_codes_sorted_and_deduped() {
        let data = vec![
            office("560001", 12.97, 77.59),
            office("560009", 12.955, 77.59),
            office("560002", 12.985, 77.575),
            office("560002", 12.98, 77.58),
            office("560098", 12.95, 77.76),
        ];
        let result = nearby("560001", DEFAULT_MAX_DIFF, &data).unwrap();
        assert_eq!(result, vec!["560002", "560009"]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let data = vec![office("100000", 10.0, 20.0), office("100001", 10.0, 20.5)];
        assert_eq!(nearby("100000", 0.5, &data).unwrap(), vec!["100001"]);
        assert!(nearby("100000", 0.49, &data).unwrap().is_empty());
    }

    #[test]
    fn anchor_is_first_record_with_coordinates() {
        let data = records(vec![
            json!({"Pincode": "200001", "Latitude": "", "Longitude": "80.0"}),
            json!({"Pincode": "200001", "Latitude": "25.0", "Longitude": "80.0"}),
            json!({"Pincode": "200001", "Latitude": "26.0", "Longitude": "81.0"}),
            json!({"Pincode": "200002", "Latitude": "25.01", "Longitude": "80.01"}),
            json!({"Pincode": "200003", "Latitude": "26.01", "Longitude": "81.01"}),
        ]);
        let code = Pincode::parse("200001").unwrap();
        assert_eq!(anchor(&code, &data), Some(Coord { x: 80.0, y: 25.0 }));
        assert_eq!(nearby("200001", 0.05, &data).unwrap(), vec!["200002"]);
    }

    #[test]
    fn zero_coordinates_do_not_anchor() {
        let data = records(vec![
            json!({"Pincode": "300001", "Latitude": 0, "Longitude": 0}),
            json!({"Pincode": "300002", "Latitude": 0, "Longitude": 0.01}),
        ]);
        assert!(nearby("300001", 0.05, &data).unwrap().is_empty());
    }

    #[test]
    fn unparseable_anchor_gives_empty() {
        let data = records(vec![
            json!({"Pincode": "300001", "Latitude": "NA", "Longitude": "NA"}),
            json!({"Pincode": "300001", "Latitude": "10.0", "Longitude": "10.0"}),
            json!({"Pincode": "300002", "Latitude": "10.0", "Longitude": "10.0"}),
        ]);
        assert!(nearby("300001", 0.05, &data).unwrap().is_empty());
    }

    #[test]
    fn candidates_without_numeric_coordinates_skipped() {
        let data = records(vec![
            json!({"Pincode": "300001", "Latitude": "10.0", "Longitude": "10.0"}),
            json!({"Pincode": "300002", "Latitude": "NA", "Longitude": "10.0"}),
            json!({"Pincode": "300003", "Longitude": "10.0"}),
            json!({"Pincode": "300004", "Latitude": null, "Longitude": "10.0"}),
            json!({"Pincode": "300005", "Latitude": 10.01, "Longitude": 10}),
        ]);
        assert_eq!(nearby("300001", 0.05, &data).unwrap(), vec!["300005"]);
    }

    #[test]
    fn unknown_code_and_bad_input() {
        let data = vec![office("560001", 12.97, 77.59)];
        assert!(nearby("999999", 0.05, &data).unwrap().is_empty());
        assert!(nearby("56000", 0.05, &data).is_err());
        assert!(nearby("", 0.05, &data).is_err());
    }

    #[test]
    fn nan_threshold_matches_nothing() {
        let data = vec![office("560001", 12.97, 77.59), office("560002", 12.97, 77.59)];
        assert!(nearby("560001", f64::NAN, &data).unwrap().is_empty());
        assert!(nearby("560001", -1.0, &data).unwrap().is_empty());
    }

    fn arb_office() -> impl Strategy<Value = Record> {
        ("[1-9][0-9]{2}00[0-9]", 8.0f64..9.0, 76.0f64..77.0)
            .prop_map(|(code, lat, lon)| office(&code, lat, lon))
    }

    proptest! {
        #[test]
        fn output_sorted_unique_without_self(
            data in prop::collection::vec(arb_office(), 1..40),
            pick in any::<prop::sample::Index>(),
            max_diff in 0.0f64..0.5,
        ) {
            let code = data[pick.index(data.len())].code().to_string();
            let result = nearby(&code, max_diff, &data).unwrap();

            prop_assert!(!result.contains(&code));
            prop_assert!(result.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn symmetric_for_single_anchors(
            a in (8.0f64..9.0, 76.0f64..77.0),
            b in (8.0f64..9.0, 76.0f64..77.0),
            max_diff in 0.0f64..1.0,
        ) {
            let data = vec![office("111111", a.0, a.1), office("222222", b.0, b.1)];
            let ab = nearby("111111", max_diff, &data).unwrap();
            let ba = nearby("222222", max_diff, &data).unwrap();

            let distance = manhattan(data[0].position().unwrap(), data[1].position().unwrap());
            if distance <= max_diff {
                prop_assert_eq!(ab, vec!["222222".to_string()]);
                prop_assert_eq!(ba, vec!["111111".to_string()]);
            } else {
                prop_assert!(ab.is_empty());
                prop_assert!(ba.is_empty());
            }
        }

        #[test]
        fn repeated_calls_agree(
            data in prop::collection::vec(arb_office(), 1..20),
            max_diff in 0.0f64..0.5,
        ) {
            let code = data[0].code().to_string();
            prop_assert_eq!(
                nearby(&code, max_diff, &data).unwrap(),
                nearby(&code, max_diff, &data).unwrap()
            );
        }
    }
}
