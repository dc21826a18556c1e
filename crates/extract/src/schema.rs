use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What the model claims it found in one chunk.
///
/// Records are kept as loose JSON; nothing checks them against the typed
/// schemas here. A category the model leaves out or sends as `null` comes
/// back as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relations: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExtractionResult {
    /// The fallback returned when a call fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.events.len() + self.attributes.len() + self.relations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_serializes_three_lists() {
        let value = serde_json::to_value(ExtractionResult::empty()).unwrap();
        assert_eq!(
            value,
            json!({"events": [], "attributes": [], "relations": []})
        );
    }

    #[test]
    fn test_missing_categories_default_to_empty() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"events": [{"description": "sat"}]}"#).unwrap();

        assert_eq!(result.events.len(), 1);
        assert!(result.attributes.is_empty());
        assert!(result.relations.is_empty());
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_null_category_is_empty() {
        let result: ExtractionResult = serde_json::from_str(
            r#"{"events": null, "attributes": [{"attr_value": "Madrid"}], "relations": []}"#,
        )
        .unwrap();

        assert!(result.events.is_empty());
        assert_eq!(result.attributes.len(), 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_empty_lists_report_empty() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"events": [], "attributes": [], "relations": []}"#).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_non_list_category_is_rejected() {
        let parsed = serde_json::from_str::<ExtractionResult>(r#"{"events": "none"}"#);
        assert!(parsed.is_err());
    }
}
