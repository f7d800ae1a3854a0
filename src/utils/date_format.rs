use serde::{self, Deserialize, Deserializer, Serializer};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// Parses a calendar date. Timestamps are accepted too and truncated to their date part,
/// since some endpoints return `issue_date` as a full timestamp.
pub fn parse_date(date_str: &str) -> Result<Date, String> {
    let format = format_description!("[year]-[month]-[day]");
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    Date::parse(date_part, &format).map_err(|e| format!("Failed to parse date '{date_str}': {e}"))
}

/// Parses an RFC 3339 timestamp, falling back to a naive `YYYY-MM-DDTHH:MM:SS` read as UTC.
pub fn parse_datetime(datetime_str: &str) -> Result<OffsetDateTime, String> {
    if let Ok(dt) = OffsetDateTime::parse(datetime_str, &Rfc3339) {
        return Ok(dt);
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    PrimitiveDateTime::parse(datetime_str, &naive)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| format!("Failed to parse datetime '{datetime_str}': {e}"))
}

fn format_date(date: &Date) -> Result<String, time::error::Format> {
    date.format(&format_description!("[year]-[month]-[day]"))
}

// `YYYY-MM-DD` for an optional date. Empty strings and `null` read as `None`.
pub mod date_option {
    use super::{Date, Deserialize, Deserializer, Serializer, format_date, parse_date, serde};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let formatted = format_date(date).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => parse_date(&s).map(Some).map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

// RFC 3339 for optional timestamps such as `created_at`.
pub mod datetime_option {
    use super::{Deserialize, Deserializer, OffsetDateTime, Rfc3339, Serializer, parse_datetime, serde};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(datetime: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match datetime {
            Some(dt) => {
                let formatted = dt.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => parse_datetime(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn parses_plain_and_timestamped_dates() {
        assert_eq!(parse_date("2024-03-15"), Ok(date!(2024 - 03 - 15)));
        assert_eq!(parse_date("2024-03-15T10:00:00+03:00"), Ok(date!(2024 - 03 - 15)));
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn parses_offset_and_naive_datetimes() {
        assert_eq!(
            parse_datetime("2024-03-15T10:30:00+03:00"),
            Ok(datetime!(2024-03-15 10:30:00 +03:00))
        );
        assert_eq!(
            parse_datetime("2024-03-15T10:30:00"),
            Ok(datetime!(2024-03-15 10:30:00 UTC))
        );
    }

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Dated {
        #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
        issue_date: Option<Date>,
    }

    #[test]
    fn optional_date_round_trips_and_skips_none() {
        let dated = Dated {
            issue_date: Some(date!(2024 - 01 - 31)),
        };
        let json = serde_json::to_string(&dated).expect("serialize");
        assert_eq!(json, r#"{"issue_date":"2024-01-31"}"#);
        assert_eq!(serde_json::from_str::<Dated>(&json).expect("deserialize"), dated);

        assert_eq!(serde_json::to_string(&Dated { issue_date: None }).expect("serialize"), "{}");
        let empty: Dated = serde_json::from_str(r#"{"issue_date":""}"#).expect("deserialize");
        assert_eq!(empty.issue_date, None);
    }
}
