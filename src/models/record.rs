//! Dataset record structure.

use geo::Coord;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Field holding the postal code
pub const FIELD_PINCODE: &str = "Pincode";
/// Field holding the post office name
pub const FIELD_NAME: &str = "Name";
/// Field holding the district name
pub const FIELD_DISTRICT: &str = "District";
/// Field holding the latitude
pub const FIELD_LATITUDE: &str = "Latitude";
/// Field holding the longitude
pub const FIELD_LONGITUDE: &str = "Longitude";

/// Name used in coordinate lookups when a record has none
pub const UNKNOWN_NAME: &str = "Unknown";

/// One post office delivery area.
///
/// The source data is loosely typed, so the record keeps the original JSON
/// object and only normalises the postal code (which may arrive as a string
/// or a number) up front. Every other field is read on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
    code: String,
}

impl Record {
    /// Build a record from a JSON object. Returns `None` if the object has
    /// no `Pincode` field.
    pub fn from_object(fields: Map<String, Value>) -> Option<Self> {
        let code = json_text(fields.get(FIELD_PINCODE)?);
        Some(Self { fields, code })
    }

    /// Build a record from an arbitrary JSON value. Returns `None` for
    /// non-objects and objects without a `Pincode` field.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Self::from_object(fields),
            _ => None,
        }
    }

    /// Postal code in string form, as used for comparisons
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Name for display, falling back to [`UNKNOWN_NAME`].
    pub fn name(&self) -> String {
        match self.fields.get(FIELD_NAME) {
            None | Some(Value::Null) => UNKNOWN_NAME.to_string(),
            Some(v) => json_text(v),
        }
    }

    /// District name, if present and non-empty.
    pub fn district(&self) -> Option<&str> {
        match self.fields.get(FIELD_DISTRICT) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Raw coordinates rendered as text, empty when absent.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.raw_text(FIELD_LATITUDE),
            longitude: self.raw_text(FIELD_LONGITUDE),
        }
    }

    /// Whether both coordinates are present with a non-empty, non-zero value.
    pub fn has_coordinates(&self) -> bool {
        self.fields.get(FIELD_LATITUDE).is_some_and(is_truthy)
            && self.fields.get(FIELD_LONGITUDE).is_some_and(is_truthy)
    }

    /// Parsed position (x = longitude, y = latitude). `None` when either
    /// coordinate is missing or not numeric.
    pub fn position(&self) -> Option<Coord<f64>> {
        let lat = parse_degrees(self.fields.get(FIELD_LATITUDE)?)?;
        let lon = parse_degrees(self.fields.get(FIELD_LONGITUDE)?)?;
        Some(Coord { x: lon, y: lat })
    }

    fn raw_text(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(v) => json_text(v),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Latitude/longitude pair exactly as stored in the source record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Strings verbatim, everything else as its JSON text.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn parse_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn requires_object_with_pincode() {
        assert!(Record::from_value(json!([1, 2, 3])).is_none());
        assert!(Record::from_value(json!("110001")).is_none());
        assert!(Record::from_value(json!({"Name": "Nowhere"})).is_none());
        assert!(Record::from_value(json!({"Pincode": "110001"})).is_some());
    }

    #[test]
    fn numeric_pincode_normalised_to_string() {
        assert_eq!(record(json!({"Pincode": 110001})).code(), "110001");
        assert_eq!(record(json!({"Pincode": "110001"})).code(), "110001");
        // floats keep their fractional form and never equal a 6-digit code
        assert_eq!(record(json!({"Pincode": 110001.0})).code(), "110001.0");
    }

    #[test]
    fn name_falls_back_to_unknown() {
        assert_eq!(record(json!({"Pincode": "1"})).name(), "Unknown");
        assert_eq!(record(json!({"Pincode": "1", "Name": null})).name(), "Unknown");
        assert_eq!(record(json!({"Pincode": "1", "Name": "GPO"})).name(), "GPO");
    }

    #[test]
    fn district_ignores_empty_and_non_strings() {
        assert_eq!(
            record(json!({"Pincode": "1", "District": "Pune"})).district(),
            Some("Pune")
        );
        assert_eq!(record(json!({"Pincode": "1", "District": ""})).district(), None);
        assert_eq!(record(json!({"Pincode": "1", "District": 7})).district(), None);
        assert_eq!(record(json!({"Pincode": "1"})).district(), None);
    }

    #[test]
    fn coordinates_rendered_verbatim() {
        let r = record(json!({"Pincode": "1", "Latitude": "28.63", "Longitude": 77.22}));
        assert_eq!(
            r.coordinates(),
            Coordinates {
                latitude: "28.63".into(),
                longitude: "77.22".into()
            }
        );

        let r = record(json!({"Pincode": "1", "Latitude": "NA"}));
        assert_eq!(r.coordinates().latitude, "NA");
        assert_eq!(r.coordinates().longitude, "");
    }

    #[test]
    fn position_parses_strings_and_numbers() {
        let r = record(json!({"Pincode": "1", "Latitude": " 28.5 ", "Longitude": 77}));
        assert_eq!(r.position(), Some(Coord { x: 77.0, y: 28.5 }));

        let r = record(json!({"Pincode": "1", "Latitude": "NA", "Longitude": "77"}));
        assert_eq!(r.position(), None);

        let r = record(json!({"Pincode": "1", "Latitude": true, "Longitude": "77"}));
        assert_eq!(r.position(), None);

        let r = record(json!({"Pincode": "1", "Latitude": "28"}));
        assert_eq!(r.position(), None);
    }

    #[test]
    fn has_coordinates_uses_truthiness() {
        let r = record(json!({"Pincode": "1", "Latitude": "28", "Longitude": "77"}));
        assert!(r.has_coordinates());

        let r = record(json!({"Pincode": "1", "Latitude": 0, "Longitude": "77"}));
        assert!(!r.has_coordinates());

        let r = record(json!({"Pincode": "1", "Latitude": "", "Longitude": "77"}));
        assert!(!r.has_coordinates());

        // a non-numeric string is still truthy
        let r = record(json!({"Pincode": "1", "Latitude": "NA", "Longitude": "NA"}));
        assert!(r.has_coordinates());
    }

    #[test]
    fn serializes_as_original_object() {
        let value = json!({"Pincode": 560001, "Name": "Bangalore GPO", "Circle": "Karnataka"});
        let r = record(value.clone());
        assert_eq!(serde_json::to_value(&r).unwrap(), value);
    }
}
