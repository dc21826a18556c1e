pub mod assemble;
pub mod normalizer;
pub mod schema;

pub use assemble::{assemble, Assembler, ChunkContext, ChunkRecords};
pub use normalizer::KeyNormalizer;
pub use schema::{AttrType, Attribute, ConfidenceLevel, Event, EventType, Relation, RelationType};
