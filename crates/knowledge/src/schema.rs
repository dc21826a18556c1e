//! Typed records for narrative facts about a character.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a tag vocabulary with its lowercase wire names.
macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Case-insensitive, ignores surrounding whitespace.
        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self> {
                let tag = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|t| t.as_str() == tag)
                    .ok_or_else(|| anyhow!("Unknown {}: {:?}", $label, s))
            }
        }
    };
}

tag_enum!(
    /// What kind of occurrence an event is.
    EventType, "event type" {
        Action => "action",
        Dialogue => "dialogue",
        Thought => "thought",
        Memory => "memory",
        Dream => "dream",
    }
);

tag_enum!(
    AttrType, "attribute type" {
        Physical => "physical",
        Family => "family",
        Occupation => "occupation",
        Location => "location",
        Trait => "trait",
    }
);

tag_enum!(
    /// How directly the text supports an attribute.
    ConfidenceLevel, "confidence level" {
        Explicit => "explicit",
        Implied => "implied",
        Inferred => "inferred",
    }
);

tag_enum!(
    RelationType, "relation type" {
        Family => "family",
        Romantic => "romantic",
        Professional => "professional",
        Friend => "friend",
    }
);

/// A narrative event involving a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub story_id: String,
    pub event_id: String,
    pub character: String,
    /// What happened.
    pub description: String,
    pub chapter: u32,
    /// "childhood", "age 15", "during story", ...
    pub time_reference: String,
    pub event_type: EventType,
    pub is_flashback: bool,
    pub is_dream: bool,
    /// Chunk the event was extracted from.
    pub src_chunk: String,
}

/// A character attribute or property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub story_id: String,
    pub character: String,
    pub attr_type: AttrType,
    /// "eye_color", "has_siblings", "birthplace", ...
    pub attr_name: String,
    pub attr_value: String,
    pub first_mentioned_ch: u32,
    pub confidence: ConfidenceLevel,
    pub src_chunk: String,
}

/// A directed relationship from `character` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub story_id: String,
    pub character: String,
    pub relation_type: RelationType,
    /// "father_of", "married_to", "works_for", ...
    pub relation_name: String,
    pub target: String,
    pub first_mentioned_ch: u32,
    pub src_chunk: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_keeps_supplied_values() {
        let event = Event {
            story_id: "story_001".to_string(),
            event_id: "evt_001".to_string(),
            character: "Elena".to_string(),
            description: "Elena discovered the hidden letter in her grandmother's attic".to_string(),
            chapter: 3,
            time_reference: "during story".to_string(),
            event_type: EventType::Action,
            is_flashback: false,
            is_dream: false,
            src_chunk: "ch3_chunk_05".to_string(),
        };

        assert_eq!(event.story_id, "story_001");
        assert_eq!(event.event_id, "evt_001");
        assert_eq!(event.character, "Elena");
        assert_eq!(event.chapter, 3);
        assert_eq!(event.time_reference, "during story");
        assert_eq!(event.event_type, EventType::Action);
        assert!(!event.is_flashback);
        assert!(!event.is_dream);
        assert_eq!(event.src_chunk, "ch3_chunk_05");
        assert_eq!(event.clone(), event);
    }

    #[test]
    fn test_tags_serialize_lowercase() {
        let relation = Relation {
            story_id: "story_001".to_string(),
            character: "Elena".to_string(),
            relation_type: RelationType::Family,
            relation_name: "granddaughter_of".to_string(),
            target: "Maria".to_string(),
            first_mentioned_ch: 1,
            src_chunk: "ch1_chunk_01".to_string(),
        };

        let value = serde_json::to_value(&relation).unwrap();
        assert_eq!(value["relation_type"], json!("family"));

        let back: Relation = serde_json::from_value(value).unwrap();
        assert_eq!(back, relation);
    }

    #[test]
    fn test_tag_parsing_is_lenient_about_case() {
        assert_eq!(" Memory ".parse::<EventType>().unwrap(), EventType::Memory);
        assert_eq!("EXPLICIT".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::Explicit);
        assert_eq!("trait".parse::<AttrType>().unwrap(), AttrType::Trait);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "flashback".parse::<EventType>().unwrap_err();
        assert!(err.to_string().contains("event type"));
        assert!("enemy".parse::<RelationType>().is_err());
    }

    #[test]
    fn test_display_matches_wire_name() {
        for tag in AttrType::ALL {
            assert_eq!(tag.to_string(), tag.as_str());
            assert_eq!(tag.as_str().parse::<AttrType>().unwrap(), *tag);
        }
    }
}
