/// System instructions for the extraction call. Allowed type lists are only
/// mentioned when non-empty.
pub fn build_system_prompt(allowed_nodes: &[String], allowed_relationships: &[String]) -> String {
    let mut prompt = String::from(
        r#"You are a top-tier algorithm designed for extracting information in structured formats to build a knowledge graph.

INSTRUCTIONS:
1. Identify entities (nodes) mentioned in the text and the relationships between them
2. Node ids are human-readable names taken from the text, never integers or generated codes
3. Node types are basic, general labels such as "Person", "Organization", "Location", "Concept"
4. Relationship types are general and timeless, in UPPER_SNAKE_CASE, such as "BORN_IN" or "WORKED_AT"
5. Always use the most complete identifier for an entity and reuse it every time the entity is referenced
6. Output ONLY valid JSON, nothing else

SCHEMA:
{
  "nodes": [
    {"id": "Albert Einstein", "type": "Person"}
  ],
  "relationships": [
    {"source_node_id": "Albert Einstein", "source_node_type": "Person", "target_node_id": "Ulm", "target_node_type": "Location", "type": "BORN_IN"}
  ]
}
"#,
    );

    if !allowed_nodes.is_empty() {
        prompt.push_str(&format!(
            "\nALLOWED NODE TYPES: {}\n",
            allowed_nodes.join(", ")
        ));
    }
    if !allowed_relationships.is_empty() {
        prompt.push_str(&format!(
            "\nALLOWED RELATIONSHIP TYPES: {}\n",
            allowed_relationships.join(", ")
        ));
    }

    prompt
}

pub fn build_user_prompt(text: &str) -> String {
    format!(
        r#"Extract nodes and relationships from the following text.

TEXT:
{}

JSON OUTPUT:"#,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_types_listed_only_when_present() {
        let bare = build_system_prompt(&[], &[]);
        assert!(!bare.contains("ALLOWED"));

        let restricted = build_system_prompt(
            &["Person".to_string(), "Location".to_string()],
            &["BORN_IN".to_string()],
        );
        assert!(restricted.contains("ALLOWED NODE TYPES: Person, Location"));
        assert!(restricted.contains("ALLOWED RELATIONSHIP TYPES: BORN_IN"));
    }

    #[test]
    fn test_user_prompt_embeds_text() {
        let prompt = build_user_prompt("Einstein was born in Ulm.");
        assert!(prompt.contains("Einstein was born in Ulm."));
    }
}
