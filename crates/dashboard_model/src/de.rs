use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// Identifiers arrive as strings from some tables and integers from others.
pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value,
        StringOrNumber::Int(value) => value.to_string(),
        StringOrNumber::Float(value) => value.to_string(),
    })
}

/// Numeric columns may be serialized as JSON strings.
pub(crate) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value
            .trim()
            .parse::<f64>()
            .map_err(serde::de::Error::custom),
        StringOrNumber::Int(value) => Ok(value as f64),
        StringOrNumber::Float(value) => Ok(value),
    }
}

/// `null` becomes the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::id")]
        id: String,
        #[serde(deserialize_with = "super::number")]
        amount: f64,
        #[serde(default, deserialize_with = "super::null_default")]
        tags: Vec<String>,
    }

    #[test]
    fn lenient_fields() {
        let row: Row = serde_json::from_str(r#"{"id": 7, "amount": "1500.50", "tags": null}"#).unwrap();
        assert_eq!(row.id, "7");
        assert!((row.amount - 1500.5).abs() < f64::EPSILON);
        assert!(row.tags.is_empty());

        let row: Row = serde_json::from_str(r#"{"id": "b-1", "amount": 20}"#).unwrap();
        assert_eq!(row.id, "b-1");
        assert!((row.amount - 20.0).abs() < f64::EPSILON);
    }
}
