use anyhow::Result;
use knowledge::{AttrType, Attribute, ConfidenceLevel, Event, EventType, Relation, RelationType};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let sample_event = Event {
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

    let sample_attribute = Attribute {
        story_id: "story_001".to_string(),
        character: "Elena".to_string(),
        attr_type: AttrType::Physical,
        attr_name: "eye_color".to_string(),
        attr_value: "green".to_string(),
        first_mentioned_ch: 1,
        confidence: ConfidenceLevel::Explicit,
        src_chunk: "ch1_chunk_02".to_string(),
    };

    let sample_relation = Relation {
        story_id: "story_001".to_string(),
        character: "Elena".to_string(),
        relation_type: RelationType::Family,
        relation_name: "granddaughter_of".to_string(),
        target: "Maria".to_string(),
        first_mentioned_ch: 1,
        src_chunk: "ch1_chunk_01".to_string(),
    };

    println!("=== Sample Event ===");
    println!("{:?}\n", sample_event);

    println!("=== Sample Attribute ===");
    println!("{:?}\n", sample_attribute);

    println!("=== Sample Relation ===");
    println!("{:?}\n", sample_relation);

    println!("=== As JSON ===");
    println!("{}", serde_json::to_string_pretty(&sample_event)?);

    println!("\n✅ All schemas constructed successfully!");

    Ok(())
}
