/// Deserializer for `Option<Option<T>>` patch fields on nullable columns
///
/// - missing field -> `None` (leave unchanged)
/// - explicit `null` -> `Some(None)` (clear the column)
/// - value -> `Some(Some(value))`
///
/// Must be paired with `#[serde(default)]` so a missing field falls back to `None`.
pub mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        // Only invoked when the field is present
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "super::double_option::deserialize")]
        value: Option<Option<String>>,
    }

    #[test]
    fn missing_field_is_none() {
        let wrapper: Wrapper = serde_json::from_str("{}").unwrap();
        assert_eq!(wrapper.value, None);
    }

    #[test]
    fn null_field_clears() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(wrapper.value, Some(None));
    }

    #[test]
    fn present_field_sets() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert_eq!(wrapper.value, Some(Some("x".to_string())));
    }
}
