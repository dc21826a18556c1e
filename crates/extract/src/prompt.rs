/// Token in the system template replaced by the character name.
pub const CHARACTER_PLACEHOLDER: &str = "{character}";

/// Label put in front of the text handed to the model.
pub const TEXT_LABEL: &str = "Text to analyze:\n";

const SYSTEM_TEMPLATE: &str = r#"
You are an expert literary analyst. Analyze the text for character: "{character}".
Extract structured data strictly following these JSON schemas.

OUTPUT FORMAT:
{
  "events": [
    {
      "description": "What happened",
      "event_type": "action|dialogue|thought|memory|dream",
      "time_reference": "childhood|age 15|current|etc",
      "is_flashback": boolean,
      "is_dream": boolean
    }
  ],
  "attributes": [
    {
      "attr_type": "physical|family|occupation|location|trait",
      "attr_name": "Specific name (e.g., eye_color, birthplace)",
      "attr_value": "Extracted value",
      "confidence": "explicit|implied|inferred"
    }
  ],
  "relations": [
    {
      "relation_type": "family|romantic|professional|friend",
      "relation_name": "Specific relation (e.g., father_of, works_for)",
      "target": "Name of the other character"
    }
  ]
}

RULES:
1. "is_dream" and "is_flashback" default to false unless text indicates otherwise.
2. Only extract info relevant to "{character}".
3. If no data is found for a category, return an empty list [].
"#;

/// The raw instruction template, placeholder included.
pub fn system_template() -> &'static str {
    SYSTEM_TEMPLATE
}

/// Fill the template for one character. The name goes in verbatim.
pub fn build_system_prompt(character_name: &str) -> String {
    SYSTEM_TEMPLATE.replace(CHARACTER_PLACEHOLDER, character_name)
}

pub fn build_user_prompt(text: &str) -> String {
    format!("{}{}", TEXT_LABEL, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_placeholder_is_replaced() {
        let prompt = build_system_prompt("Elena");

        assert!(!prompt.contains(CHARACTER_PLACEHOLDER));
        assert!(prompt.contains(r#"Analyze the text for character: "Elena"."#));
        assert!(prompt.contains(r#"Only extract info relevant to "Elena"."#));
        assert_eq!(
            prompt.matches("Elena").count(),
            system_template().matches(CHARACTER_PLACEHOLDER).count()
        );
    }

    #[test]
    fn test_template_documents_all_record_shapes() {
        let template = system_template();

        for field in [
            "event_type",
            "time_reference",
            "is_flashback",
            "is_dream",
            "attr_type",
            "attr_name",
            "attr_value",
            "confidence",
            "relation_type",
            "relation_name",
            "target",
        ] {
            assert!(template.contains(field), "template is missing {}", field);
        }
    }

    #[test]
    fn test_name_is_not_escaped() {
        let prompt = build_system_prompt("Mr. \"Smith\" {Jr}");
        assert!(prompt.contains("Mr. \"Smith\" {Jr}"));
    }

    #[test]
    fn test_user_prompt_is_labelled() {
        assert_eq!(
            build_user_prompt("Elena sat by the window."),
            "Text to analyze:\nElena sat by the window."
        );
    }
}
