use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ClientError;

/// A point on the globe, in decimal degrees.
///
/// Values are passed to the API as given; OpenUV rejects out-of-range ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Top level of the `/uv` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvReport {
    pub result: UvResult,
}

impl UvReport {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// The `result` object of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvResult {
    #[serde(deserialize_with = "null_as_default")]
    pub uv: f64,
    pub uv_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub uv_max: f64,
    pub uv_max_time: Option<String>,
    /// Dobson units.
    #[serde(deserialize_with = "null_as_default")]
    pub ozone: f64,
    pub ozone_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub safe_exposure_time: SafeExposureTime,
    #[serde(deserialize_with = "null_as_default")]
    pub sun_info: SunInfo,
}

/// Safe exposure time in minutes for each Fitzpatrick skin type.
///
/// OpenUV sends `null` for every type while the UV index is zero; those
/// decode as 0. Other values pass through unchecked, sign included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeExposureTime {
    #[serde(deserialize_with = "null_as_default")]
    pub st1: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub st2: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub st3: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub st4: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub st5: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub st6: i64,
}

impl SafeExposureTime {
    pub fn minutes(&self, skin: SkinType) -> i64 {
        match skin {
            SkinType::I => self.st1,
            SkinType::II => self.st2,
            SkinType::III => self.st3,
            SkinType::IV => self.st4,
            SkinType::V => self.st5,
            SkinType::VI => self.st6,
        }
    }
}

/// Fitzpatrick skin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinType {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl SkinType {
    pub const fn all() -> &'static [SkinType] {
        &[
            SkinType::I,
            SkinType::II,
            SkinType::III,
            SkinType::IV,
            SkinType::V,
            SkinType::VI,
        ]
    }

    /// 1-based index as used by the `stN` wire fields.
    pub fn index(&self) -> u8 {
        match self {
            SkinType::I => 1,
            SkinType::II => 2,
            SkinType::III => 3,
            SkinType::IV => 4,
            SkinType::V => 5,
            SkinType::VI => 6,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SkinType::I => "very fair skin, white",
            SkinType::II => "fair skin, white",
            SkinType::III => "fair skin, cream white",
            SkinType::IV => "olive skin",
            SkinType::V => "brown skin",
            SkinType::VI => "black skin",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub sun_times: SunTimes,
    /// Upstream spells this key `sunt_position`; it is kept verbatim.
    #[serde(
        rename = "sunt_position",
        alias = "sun_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub sun_position: Option<SunPosition>,
}

/// Solar events for the day, as the opaque timestamp strings OpenUV sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SunTimes {
    pub sunrise: Option<String>,
    pub sunrise_end: Option<String>,
    /// End of the morning golden hour.
    pub golden_hour_end: Option<String>,
    pub solar_noon: Option<String>,
    pub golden_hour: Option<String>,
    pub sunset_start: Option<String>,
    pub sunset: Option<String>,
    pub dusk: Option<String>,
    pub nautical_dusk: Option<String>,
    pub night: Option<String>,
    pub nadir: Option<String>,
    pub night_end: Option<String>,
    pub nautical_dawn: Option<String>,
    pub dawn: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunPosition {
    #[serde(deserialize_with = "null_as_default")]
    pub azimuth: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub altitude: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{"result":{"uv":3.5,"uv_max":5.2,"ozone":300.1,"safe_exposure_time":{"st1":10,"st2":15,"st3":20,"st4":30,"st5":45,"st6":60},"sun_info":{"sun_times":{"sunrise":"06:00","solarNoon":"12:00","sunset":"18:00","night":"19:30","goldenHour":"17:00","goldenHourEnd":"06:30"}}}}"#;

    #[test]
    fn decodes_sample_payload() {
        let report = UvReport::from_json(SAMPLE).expect("sample must decode");
        let r = &report.result;

        assert_eq!(r.uv, 3.5);
        assert_eq!(r.uv_max, 5.2);
        assert_eq!(r.ozone, 300.1);
        assert_eq!(r.uv_time, None);

        assert_eq!(
            r.safe_exposure_time,
            SafeExposureTime { st1: 10, st2: 15, st3: 20, st4: 30, st5: 45, st6: 60 }
        );

        let t = &r.sun_info.sun_times;
        assert_eq!(t.sunrise.as_deref(), Some("06:00"));
        assert_eq!(t.solar_noon.as_deref(), Some("12:00"));
        assert_eq!(t.sunset.as_deref(), Some("18:00"));
        assert_eq!(t.night.as_deref(), Some("19:30"));
        assert_eq!(t.golden_hour.as_deref(), Some("17:00"));
        assert_eq!(t.golden_hour_end.as_deref(), Some("06:30"));
        assert_eq!(t.dawn, None);
        assert_eq!(r.sun_info.sun_position, None);
    }

    #[test]
    fn decodes_full_payload() {
        let body = r#"{"result":{
            "uv":0.3,"uv_time":"2024-06-01T05:12:00.000Z",
            "uv_max":7.81,"uv_max_time":"2024-06-01T11:21:04.000Z",
            "ozone":331.2,"ozone_time":"2024-06-01T06:00:00.000Z",
            "safe_exposure_time":{"st1":null,"st2":null,"st3":null,"st4":null,"st5":null,"st6":null},
            "sun_info":{
                "sun_times":{"sunrise":"2024-06-01T03:48:41.000Z","sunriseEnd":"2024-06-01T03:52:53.000Z",
                    "nadir":"2024-05-31T23:21:04.000Z","dawn":"2024-06-01T03:05:33.000Z"},
                "sunt_position":{"azimuth":-1.89,"altitude":0.11}
            }}}"#;

        let report = UvReport::from_json(body).expect("full payload must decode");
        let r = &report.result;

        assert_eq!(r.uv_max_time.as_deref(), Some("2024-06-01T11:21:04.000Z"));
        assert_eq!(r.ozone_time.as_deref(), Some("2024-06-01T06:00:00.000Z"));
        assert_eq!(r.safe_exposure_time, SafeExposureTime::default());
        assert_eq!(
            r.sun_info.sun_times.sunrise_end.as_deref(),
            Some("2024-06-01T03:52:53.000Z")
        );
        assert_eq!(
            r.sun_info.sun_position,
            Some(SunPosition { azimuth: -1.89, altitude: 0.11 })
        );
    }

    #[test]
    fn accepts_regular_sun_position_spelling() {
        let body = r#"{"result":{"sun_info":{"sun_position":{"azimuth":1.0,"altitude":0.5}}}}"#;
        let report = UvReport::from_json(body).unwrap();

        assert_eq!(
            report.result.sun_info.sun_position,
            Some(SunPosition { azimuth: 1.0, altitude: 0.5 })
        );
    }

    #[test]
    fn serializes_with_wire_names() {
        let body = r#"{"result":{"sun_info":{"sun_times":{"goldenHourEnd":"06:30"},"sunt_position":{"azimuth":1.0,"altitude":0.5}}}}"#;
        let report = UvReport::from_json(body).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["result"]["sun_info"]["sun_times"]["goldenHourEnd"], "06:30");
        assert_eq!(json["result"]["sun_info"]["sunt_position"]["azimuth"], 1.0);
    }

    #[test]
    fn missing_safe_exposure_time_defaults_to_zero() {
        let body = r#"{"result":{"uv":1.0,"uv_max":2.0,"ozone":280.0}}"#;
        let report = UvReport::from_json(body).unwrap();

        assert_eq!(report.result.safe_exposure_time, SafeExposureTime::default());
        assert_eq!(report.result.uv, 1.0);
    }

    #[test]
    fn null_scalars_decode_to_zero() {
        let body = r#"{"result":{"uv":null,"uv_max":null,"ozone":null,"uv_time":null}}"#;
        let report = UvReport::from_json(body).expect("nulls must decode");

        assert_eq!(report.result, UvResult::default());
    }

    #[test]
    fn null_nested_objects_decode_to_defaults() {
        let body = r#"{"result":{"uv":2.0,"safe_exposure_time":null,"sun_info":null}}"#;
        let report = UvReport::from_json(body).expect("nulls must decode");

        assert_eq!(report.result.uv, 2.0);
        assert_eq!(report.result.safe_exposure_time, SafeExposureTime::default());
        assert_eq!(report.result.sun_info, SunInfo::default());
    }

    #[test]
    fn null_sun_times_and_position_fields_decode_to_defaults() {
        let body = r#"{"result":{"sun_info":{"sun_times":null,"sunt_position":{"azimuth":null,"altitude":0.4}}}}"#;
        let report = UvReport::from_json(body).expect("nulls must decode");
        let info = &report.result.sun_info;

        assert_eq!(info.sun_times, SunTimes::default());
        assert_eq!(info.sun_position, Some(SunPosition { azimuth: 0.0, altitude: 0.4 }));
    }

    #[test]
    fn exposure_minutes_pass_through_unchecked() {
        let body = r#"{"result":{"safe_exposure_time":{"st1":-5,"st6":5000000000}}}"#;
        let st = UvReport::from_json(body).unwrap().result.safe_exposure_time;

        assert_eq!(st.minutes(SkinType::I), -5);
        assert_eq!(st.minutes(SkinType::VI), 5_000_000_000);
    }

    #[test]
    fn empty_body_is_decode_error() {
        let err = UvReport::from_json("").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = UvReport::from_json("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn error_payload_without_result_is_decode_error() {
        let err = UvReport::from_json(r#"{"error":"Daily API quota exceeded"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn wrong_field_type_is_decode_error() {
        let err = UvReport::from_json(r#"{"result":{"uv":"high"}}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn skin_type_lookup_matches_fields() {
        let set = SafeExposureTime { st1: 1, st2: 2, st3: 3, st4: 4, st5: 5, st6: 6 };

        for skin in SkinType::all() {
            assert_eq!(set.minutes(*skin), i64::from(skin.index()));
        }
        assert_eq!(SkinType::IV.description(), "olive skin");
    }

    #[test]
    fn coordinates_display() {
        assert_eq!(Coordinates::new(52.52, -13.405).to_string(), "52.52, -13.405");
    }
}
