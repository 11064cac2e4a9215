use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Provider fields are untrusted: `null` or a value of the wrong JSON type
/// reads as absent so the normalizers can substitute their defaults.
pub(crate) fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Like [`value`], but keeps the well-formed entries of a list whose other
/// entries are malformed.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "value")]
        title: Option<String>,
        #[serde(default, deserialize_with = "list")]
        tags: Option<Vec<String>>,
    }

    #[test]
    fn wrong_types_and_nulls_read_as_absent() {
        let sample: Sample =
            serde_json::from_value(json!({ "title": 42, "tags": null })).expect("decodes");
        assert!(sample.title.is_none());
        assert!(sample.tags.is_none());
    }

    #[test]
    fn list_drops_only_malformed_entries() {
        let sample: Sample =
            serde_json::from_value(json!({ "tags": ["a", 1, "b"] })).expect("decodes");
        assert_eq!(sample.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(sample.title.is_none());
    }
}
