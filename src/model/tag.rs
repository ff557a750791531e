use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A taxonomy tag, listed under `taxonomies/tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: String,
    pub tag_name: String,
    pub tag_color: String,
}

/// Payload for creating or updating a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagInput {
    pub tag_name: String,
    pub tag_color: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            tag_id: id.into(),
            tag_name: name.into(),
            tag_color: color.into(),
        }
    }
}

impl Entity for Tag {
    type Input = TagInput;

    const KIND: &'static str = "tag";

    fn entity_id(&self) -> &str {
        &self.tag_id
    }

    fn label(&self) -> &str {
        &self.tag_name
    }

    fn initial_values(&self) -> TagInput {
        TagInput {
            tag_name: self.tag_name.clone(),
            tag_color: self.tag_color.clone(),
        }
    }

    fn from_input(id: String, input: TagInput) -> Result<Self, String> {
        let mut tag = Self::new(id, String::new(), String::new());
        tag.apply(input)?;
        Ok(tag)
    }

    fn apply(&mut self, input: TagInput) -> Result<(), String> {
        if input.tag_name.trim().is_empty() {
            return Err("tag_name must not be empty".to_string());
        }
        if !input.tag_color.starts_with('#') {
            return Err(format!("tag_color must be a hex color, got {:?}", input.tag_color));
        }
        self.tag_name = input.tag_name;
        self.tag_color = input.tag_color;
        Ok(())
    }
}
