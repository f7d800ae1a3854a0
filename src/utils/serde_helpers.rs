use serde::{Deserialize, Deserializer};

/// Deserializes a value, treating `null` as the type's default.
/// The API sends `null` for enum fields such as `currency` when they were never set.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Kind {
        #[default]
        Cash,
        Bank,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "null_as_default")]
        kind: Kind,
    }

    #[test]
    fn null_and_missing_read_as_default() {
        let from_null: Holder = serde_json::from_value(json!({"kind": null})).expect("null");
        assert_eq!(from_null.kind, Kind::Cash);

        let missing: Holder = serde_json::from_value(json!({})).expect("missing");
        assert_eq!(missing.kind, Kind::Cash);

        let present: Holder = serde_json::from_value(json!({"kind": "bank"})).expect("present");
        assert_eq!(present.kind, Kind::Bank);
    }

    #[test]
    fn unknown_values_still_fail() {
        assert!(serde_json::from_value::<Holder>(json!({"kind": "vault"})).is_err());
    }
}
