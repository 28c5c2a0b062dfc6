use serde::{Deserialize, Deserializer, Serialize};

use crate::query::{join_tags, parse_tags};

/// Image shown for records that never had one, or had theirs cleared.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.png";

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

// `null` and a missing field are treated the same way.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(placeholder_image))
}

/// One catalog entry with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// The prompt body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(default = "placeholder_image", deserialize_with = "null_as_placeholder")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl PromptRecord {
    pub fn new(title: String, prompt: String, image: String, tags: Vec<String>) -> Self {
        Self {
            title,
            prompt,
            image,
            tags,
        }
    }

    /// Image reference to render, falling back to the placeholder when empty.
    pub fn display_image(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Raw values of an add/edit form, before validation.
///
/// `tags` is the comma separated text exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFields {
    pub title: String,
    pub prompt: String,
    pub image: String,
    pub tags: String,
}

impl PromptFields {
    pub fn new(
        title: impl Into<String>,
        prompt: impl Into<String>,
        image: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            image: image.into(),
            tags: tags.into(),
        }
    }

    /// Pre-fills an edit form from an existing record.
    pub fn from_record(record: &PromptRecord) -> Self {
        Self {
            title: record.title.clone(),
            prompt: record.prompt.clone(),
            image: record.image.clone(),
            tags: join_tags(&record.tags),
        }
    }

    /// Builds the record these fields describe. Values are trimmed; no
    /// required-field checks happen here.
    pub(crate) fn into_record(self) -> PromptRecord {
        PromptRecord {
            title: self.title.trim().to_string(),
            prompt: self.prompt.trim().to_string(),
            image: self.image.trim().to_string(),
            tags: parse_tags(&self.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_defaults() {
        let record: PromptRecord =
            serde_json::from_str(r#"{"title":"Sunset","prompt":"a red sky"}"#).unwrap();
        assert_eq!(record.image, PLACEHOLDER_IMAGE);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn null_fields_get_defaults() {
        let record: PromptRecord =
            serde_json::from_str(r#"{"title":null,"prompt":"p","image":null,"tags":null}"#).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.image, PLACEHOLDER_IMAGE);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let record = PromptRecord::new(
            "T".into(),
            "P".into(),
            "img.png".into(),
            vec!["a".into()],
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title":"T","prompt":"P","image":"img.png","tags":["a"]})
        );
    }

    #[test]
    fn cleared_image_displays_placeholder() {
        let record = PromptRecord::new("T".into(), "P".into(), String::new(), vec![]);
        assert_eq!(record.display_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn edit_form_prefill_joins_tags() {
        let record = PromptRecord::new(
            "T".into(),
            "P".into(),
            "i".into(),
            vec!["cat".into(), "space".into()],
        );
        let fields = PromptFields::from_record(&record);
        assert_eq!(fields.tags, "cat, space");
        assert_eq!(fields.into_record(), record);
    }
}
