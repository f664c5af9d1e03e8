use serde::Deserialize;

/// Country-level case counts from the disease statistics endpoint.
///
/// The endpoint returns many more fields; only these are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryStats {
    /// Country name as reported by the source.
    pub country: String,
    /// Total confirmed cases.
    pub cases: u64,
    /// Total deaths.
    pub deaths: u64,
    /// Total recovered.
    pub recovered: u64,
}

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Build a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Where a country is, according to the geodata endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryLocation {
    /// Common (short) country name.
    pub name: String,
    /// Representative coordinate of the country.
    pub center: LatLng,
}

/// One element of the geodata response array.
#[derive(Debug, Deserialize)]
pub(crate) struct GeoRecord {
    pub name: GeoName,
    #[serde(default)]
    pub latlng: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeoName {
    pub common: String,
}

impl TryFrom<GeoRecord> for CountryLocation {
    type Error = crate::FetchError;

    fn try_from(record: GeoRecord) -> Result<Self, Self::Error> {
        match record.latlng.as_slice() {
            [lat, lng] => Ok(CountryLocation {
                name: record.name.common,
                center: LatLng::new(*lat, *lng),
            }),
            other => Err(crate::FetchError::malformed(format!(
                "expected a [lat, lng] pair, got {} values",
                other.len()
            ))),
        }
    }
}

/// Take the first record of a geodata response.
pub(crate) fn first_location(records: Vec<GeoRecord>) -> Result<CountryLocation, crate::FetchError> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| crate::FetchError::malformed("empty country list"))?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cause;

    #[test]
    fn stats_ignore_extra_fields() {
        let body = r#"{
            "updated": 1700000000000,
            "country": "Testland",
            "countryInfo": {"iso2": "TL"},
            "cases": 1234567,
            "todayCases": 0,
            "deaths": 98765,
            "recovered": 1100000,
            "active": 35802
        }"#;
        let stats: CountryStats = serde_json::from_str(body).unwrap();
        assert_eq!(
            stats,
            CountryStats {
                country: "Testland".into(),
                cases: 1_234_567,
                deaths: 98_765,
                recovered: 1_100_000,
            }
        );
    }

    #[test]
    fn first_location_uses_first_element() {
        let body = r#"[
            {"name": {"common": "France", "official": "French Republic"}, "latlng": [46.0, 2.0]},
            {"name": {"common": "Elsewhere"}, "latlng": [0.0, 0.0]}
        ]"#;
        let records: Vec<GeoRecord> = serde_json::from_str(body).unwrap();
        let location = first_location(records).unwrap();
        assert_eq!(location.name, "France");
        assert_eq!(location.center, LatLng::new(46.0, 2.0));
    }

    #[test]
    fn empty_array_is_malformed() {
        let err = first_location(Vec::new()).unwrap_err();
        assert!(matches!(err.cause(), Cause::Malformed(_)));
    }

    #[test]
    fn wrong_coordinate_arity_is_malformed() {
        let body = r#"[{"name": {"common": "Nowhere"}, "latlng": [12.5]}]"#;
        let records: Vec<GeoRecord> = serde_json::from_str(body).unwrap();
        let err = first_location(records).unwrap_err();
        assert_eq!(
            err.cause(),
            &Cause::Malformed("expected a [lat, lng] pair, got 1 values".into())
        );
    }

    #[test]
    fn missing_coordinates_are_malformed() {
        let body = r#"[{"name": {"common": "Nowhere"}}]"#;
        let records: Vec<GeoRecord> = serde_json::from_str(body).unwrap();
        assert!(first_location(records).is_err());
    }
}
