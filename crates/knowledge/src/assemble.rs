//! Turns the extractor's loose JSON records into typed [`Event`],
//! [`Attribute`] and [`Relation`] values.
//!
//! Each record is converted on its own. A record that cannot be converted is
//! logged and counted in [`ChunkRecords::rejected`]; the others still go
//! through.

use anyhow::{Context, Result, bail};
use extract::ExtractionResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::normalizer::KeyNormalizer;
use crate::schema::{AttrType, Attribute, ConfidenceLevel, Event, EventType, Relation, RelationType};

/// Time reference used when the model leaves it out.
pub const DEFAULT_TIME_REFERENCE: &str = "current";

/// Provenance the model does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkContext {
    pub story_id: String,
    pub chapter: u32,
    pub chunk_id: String,
}

impl ChunkContext {
    pub fn new(story_id: impl Into<String>, chapter: u32, chunk_id: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            chapter,
            chunk_id: chunk_id.into(),
        }
    }
}

/// Typed records for one chunk and one character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecords {
    pub events: Vec<Event>,
    pub attributes: Vec<Attribute>,
    pub relations: Vec<Relation>,
    /// Records dropped because they did not fit the schema.
    pub rejected: usize,
}

#[derive(Deserialize)]
struct RawEvent {
    description: Option<String>,
    event_type: Option<String>,
    time_reference: Option<String>,
    is_flashback: Option<Value>,
    is_dream: Option<Value>,
}

#[derive(Deserialize)]
struct RawAttribute {
    attr_type: Option<String>,
    attr_name: Option<String>,
    attr_value: Option<Value>,
    confidence: Option<String>,
}

#[derive(Deserialize)]
struct RawRelation {
    relation_type: Option<String>,
    relation_name: Option<String>,
    target: Option<String>,
}

pub struct Assembler {
    normalizer: KeyNormalizer,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            normalizer: KeyNormalizer::new(),
        }
    }

    pub fn assemble(
        &self,
        ctx: &ChunkContext,
        character: &str,
        extraction: &ExtractionResult,
    ) -> ChunkRecords {
        let mut records = ChunkRecords::default();

        for (index, raw) in extraction.events.iter().enumerate() {
            match self.event(ctx, character, index, raw) {
                Ok(event) => records.events.push(event),
                Err(e) => records.reject("event", index, &e),
            }
        }

        for (index, raw) in extraction.attributes.iter().enumerate() {
            match self.attribute(ctx, character, raw) {
                Ok(attribute) => records.attributes.push(attribute),
                Err(e) => records.reject("attribute", index, &e),
            }
        }

        for (index, raw) in extraction.relations.iter().enumerate() {
            match self.relation(ctx, character, raw) {
                Ok(relation) => records.relations.push(relation),
                Err(e) => records.reject("relation", index, &e),
            }
        }

        debug!(
            chunk = %ctx.chunk_id,
            events = records.events.len(),
            attributes = records.attributes.len(),
            relations = records.relations.len(),
            rejected = records.rejected,
            "Assembled chunk records"
        );

        records
    }

    fn event(&self, ctx: &ChunkContext, character: &str, index: usize, raw: &Value) -> Result<Event> {
        let raw = RawEvent::deserialize(raw).context("Event record has the wrong shape")?;

        let description = self.required_text(raw.description, "description")?;
        let event_type: EventType = required(raw.event_type, "event_type")?.parse()?;
        let time_reference = raw
            .time_reference
            .map(|t| self.normalizer.normalize_text(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TIME_REFERENCE.to_string());

        Ok(Event {
            story_id: ctx.story_id.clone(),
            event_id: event_id(ctx, index, &description),
            character: character.to_string(),
            description,
            chapter: ctx.chapter,
            time_reference,
            event_type,
            is_flashback: flag(raw.is_flashback, "is_flashback")?,
            is_dream: flag(raw.is_dream, "is_dream")?,
            src_chunk: ctx.chunk_id.clone(),
        })
    }

    fn attribute(&self, ctx: &ChunkContext, character: &str, raw: &Value) -> Result<Attribute> {
        let raw = RawAttribute::deserialize(raw).context("Attribute record has the wrong shape")?;

        let attr_type: AttrType = required(raw.attr_type, "attr_type")?.parse()?;
        let attr_name = self.required_key(raw.attr_name, "attr_name")?;
        let attr_value = match raw.attr_value {
            Some(Value::String(s)) => self.normalizer.normalize_text(&s),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        if attr_value.is_empty() {
            bail!("Missing attr_value");
        }
        // An attribute the model did not grade is treated as the weakest claim
        let confidence = match raw.confidence {
            Some(c) => c.parse()?,
            None => ConfidenceLevel::Inferred,
        };

        Ok(Attribute {
            story_id: ctx.story_id.clone(),
            character: character.to_string(),
            attr_type,
            attr_name,
            attr_value,
            first_mentioned_ch: ctx.chapter,
            confidence,
            src_chunk: ctx.chunk_id.clone(),
        })
    }

    fn relation(&self, ctx: &ChunkContext, character: &str, raw: &Value) -> Result<Relation> {
        let raw = RawRelation::deserialize(raw).context("Relation record has the wrong shape")?;

        let relation_type: RelationType = required(raw.relation_type, "relation_type")?.parse()?;
        let relation_name = self.required_key(raw.relation_name, "relation_name")?;
        let target = self.required_text(raw.target, "target")?;

        Ok(Relation {
            story_id: ctx.story_id.clone(),
            character: character.to_string(),
            relation_type,
            relation_name,
            target,
            first_mentioned_ch: ctx.chapter,
            src_chunk: ctx.chunk_id.clone(),
        })
    }

    fn required_text(&self, value: Option<String>, field: &str) -> Result<String> {
        let text = self.normalizer.normalize_text(&required(value, field)?);
        if text.is_empty() {
            bail!("Empty {}", field);
        }
        Ok(text)
    }

    fn required_key(&self, value: Option<String>, field: &str) -> Result<String> {
        let key = self.normalizer.normalize_key(&required(value, field)?);
        if key.is_empty() {
            bail!("Empty {}", field);
        }
        Ok(key)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkRecords {
    fn reject(&mut self, kind: &str, index: usize, error: &anyhow::Error) {
        warn!(kind, index, error = %error, "Dropping extracted record");
        self.rejected += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.attributes.is_empty() && self.relations.is_empty()
    }
}

/// Convert one extraction with a fresh [`Assembler`].
pub fn assemble(ctx: &ChunkContext, character: &str, extraction: &ExtractionResult) -> ChunkRecords {
    Assembler::new().assemble(ctx, character, extraction)
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.with_context(|| format!("Missing {}", field))
}

/// Missing or null flags are false; `"true"`/`"false"` strings are accepted.
fn flag(value: Option<Value>, field: &str) -> Result<bool> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            _ => bail!("Invalid {}: {:?}", field, s),
        },
        Some(other) => bail!("Invalid {}: {}", field, other),
    }
}

/// Stable id from where the event came from and what it says.
fn event_id(ctx: &ChunkContext, index: usize, description: &str) -> String {
    let position = index.to_string();
    let mut hasher = Sha256::new();
    // Length prefixes keep field boundaries apart
    for field in [
        ctx.story_id.as_bytes(),
        ctx.chunk_id.as_bytes(),
        position.as_bytes(),
        description.as_bytes(),
    ] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field);
    }
    let result = hasher.finalize();
    format!("evt_{}", hex::encode(&result[..8]))
}
