//! The preview and the compiled message agree on block content

use mailframe_compiler_html::{render_node, CompileOptions};
use mailframe_document::{BlockType, Document, GlobalStylesPatch, IdGenerator};
use mailframe_editor::{EditSession, Mutation};
use mailframe_layout::lower_document;
use mailframe_preview::{render_preview, Control};
use serde_json::json;

fn every_variant() -> EditSession {
    let mut session = EditSession::with_ids(Document::new(), IdGenerator::from_seed("eq"));
    for block_type in BlockType::ALL {
        session
            .apply(Mutation::AddBlock {
                block_type,
                index: None,
            })
            .unwrap();
    }
    session
}

#[test]
fn test_content_matches_compiler_fragments() {
    let session = every_variant();
    let doc = session.document();

    let preview = render_preview(doc, session.selected());
    let compiled: Vec<_> = lower_document(doc).visible().cloned().collect();

    assert_eq!(preview.content_fragments(), compiled);
}

#[test]
fn test_content_matches_after_edits() {
    let mut session = every_variant();
    let first = session.document().blocks[0].id.clone();
    let social = session.document().blocks[8].id.clone();

    session
        .apply(Mutation::UpdateContent {
            block_id: social,
            content: json!({ "links": [] }).as_object().cloned().unwrap(),
        })
        .unwrap();
    session
        .apply(Mutation::UpdateGlobalStyles {
            styles: GlobalStylesPatch {
                primary_color: Some("#0f766e".to_string()),
                ..Default::default()
            },
        })
        .unwrap();
    session.apply(Control::MoveDown.to_mutation(&first)).unwrap();

    let doc = session.document();
    let preview = render_preview(doc, Some(&first));
    let compiled: Vec<_> = lower_document(doc).visible().cloned().collect();

    assert_eq!(preview.content_fragments(), compiled);
    assert_eq!(preview.blocks.iter().filter(|b| b.empty).count(), 1);

    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };
    let printed: Vec<String> = preview.content_fragments().iter().map(|n| render_node(n, options.clone())).collect();
    let expected: Vec<String> = compiled.iter().map(|n| render_node(n, options.clone())).collect();
    assert_eq!(printed, expected);
}

#[test]
fn test_toolbar_actions_drive_the_session() {
    let mut session = every_variant();
    let view = render_preview(session.document(), None);
    let last = view.blocks.last().unwrap();

    let duplicate = last
        .controls
        .iter()
        .find(|state| state.control == Control::Duplicate)
        .unwrap();
    assert!(duplicate.enabled);

    let action: Control = "duplicate".parse().unwrap();
    let result = session.apply(action.to_mutation(&last.block_id)).unwrap();

    let view = render_preview(session.document(), session.selected());
    assert_eq!(view.blocks.len(), BlockType::ALL.len() + 1);
    assert_eq!(view.selected().map(|b| b.block_id.clone()), result.created);
}
