//! Loading a design, editing it through a session and writing it back

use mailframe_document::{Document, IdGenerator};
use mailframe_editor::{EditSession, Mutation};
use serde_json::json;

const DESIGN: &str = r##"{
    "blocks": [
        { "id": "b-1", "type": "header", "content": { "title": "Acme" } },
        { "id": "b-2", "type": "text", "content": { "text": "Welcome" }, "styles": {} }
    ],
    "globalStyles": { "primaryColor": "#7c3aed" }
}"##;

#[test]
fn test_edit_loaded_design() -> anyhow::Result<()> {
    let doc = Document::from_json(DESIGN)?;
    let mut session = EditSession::with_ids(doc, IdGenerator::from_seed("it"));

    let created = session
        .apply(Mutation::AddBlock {
            block_type: "button".parse()?,
            index: Some(1),
        })?
        .created
        .ok_or_else(|| anyhow::anyhow!("no block created"))?;

    session.apply(Mutation::UpdateContent {
        block_id: created.clone(),
        content: json!({ "label": "Shop now", "link": "https://acme.test" })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    })?;

    let saved = session.document().to_json()?;
    let reloaded = Document::from_json(&saved)?;

    assert_eq!(&reloaded, session.document());
    assert_eq!(reloaded.block_ids().collect::<Vec<_>>(), vec!["b-1", created.as_str(), "b-2"]);
    assert_eq!(reloaded.global_styles.primary_color, "#7c3aed");
    assert_eq!(reloaded.global_styles.content_width, 600);
    Ok(())
}

#[test]
fn test_loaded_blocks_are_filled_with_defaults() -> anyhow::Result<()> {
    let doc = Document::from_json(DESIGN)?;
    let header = doc.find_block("b-1").ok_or_else(|| anyhow::anyhow!("missing header"))?;

    assert_eq!(header.content["title"], "Acme");
    assert!(header.content.contains_key("logoUrl"));
    assert!(header.styles.contains_key("backgroundColor"));
    Ok(())
}

#[test]
fn test_new_ids_never_collide_with_loaded_ones() -> anyhow::Result<()> {
    let doc = Document::from_json(DESIGN)?;
    // A generator seeded like the loaded design would otherwise hand out "b-1"
    let mut session = EditSession::with_ids(doc, IdGenerator::from_seed("b"));

    let first = session.add_block_named("spacer", None)?.created;
    let second = session.add_block_named("divider", None)?.created;

    assert_ne!(first.as_deref(), Some("b-1"));
    assert_ne!(second.as_deref(), Some("b-2"));
    assert_eq!(session.document().len(), 4);
    Ok(())
}
