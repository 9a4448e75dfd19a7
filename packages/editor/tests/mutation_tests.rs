//! Mutations applied through an edit session

use mailframe_document::{BlockType, Document, GlobalStylesPatch, IdGenerator};
use mailframe_editor::{Direction, EditSession, EditorError, Mutation, MutationError};
use serde_json::json;

fn session_with(types: &[BlockType]) -> (EditSession, Vec<String>) {
    let mut session = EditSession::with_ids(Document::new(), IdGenerator::from_seed("mt"));
    let ids = types
        .iter()
        .map(|ty| {
            session
                .apply(Mutation::AddBlock {
                    block_type: *ty,
                    index: None,
                })
                .unwrap()
                .created
                .unwrap()
        })
        .collect();
    (session, ids)
}

fn order(session: &EditSession) -> Vec<String> {
    session.document().block_ids().map(String::from).collect()
}

#[test]
fn test_update_content_mutation() {
    let (mut session, ids) = session_with(&[BlockType::Text]);

    let result = session
        .apply(Mutation::UpdateContent {
            block_id: ids[0].clone(),
            content: json!({ "text": "Hello" }).as_object().cloned().unwrap(),
        })
        .unwrap();

    assert!(result.changed);
    assert_eq!(session.document().blocks[0].content["text"], "Hello");
}

#[test]
fn test_update_content_with_unknown_field_is_reported() {
    let (mut session, ids) = session_with(&[BlockType::Text]);
    let before = session.document().clone();

    let result = session.apply(Mutation::UpdateContent {
        block_id: ids[0].clone(),
        content: json!({ "text": "Hello", "subtitle": "x" }).as_object().cloned().unwrap(),
    });

    assert!(matches!(
        result,
        Err(EditorError::Mutation(MutationError::UnknownField { .. }))
    ));
    assert_eq!(session.document(), &before);
}

#[test]
fn test_update_styles_mutation() {
    let (mut session, ids) = session_with(&[BlockType::Button]);

    session
        .apply(Mutation::UpdateStyles {
            block_id: ids[0].clone(),
            styles: json!({ "borderRadius": 12 }).as_object().cloned().unwrap(),
        })
        .unwrap();

    assert_eq!(session.document().blocks[0].styles["borderRadius"], 12);
}

#[test]
fn test_move_mutation() {
    let (mut session, ids) = session_with(&[BlockType::Header, BlockType::Text]);

    session
        .apply(Mutation::MoveBlock {
            block_id: ids[1].clone(),
            direction: Direction::Up,
        })
        .unwrap();

    assert_eq!(order(&session), vec![ids[1].clone(), ids[0].clone()]);
}

#[test]
fn test_duplicate_mutation_selects_copy() {
    let (mut session, ids) = session_with(&[BlockType::Cta, BlockType::Footer]);
    session.select(Some(&ids[0])).unwrap();

    let result = session
        .apply(Mutation::DuplicateBlock {
            block_id: ids[0].clone(),
        })
        .unwrap();

    let copy = result.created.unwrap();
    assert_eq!(session.selected(), Some(copy.as_str()));
    assert_eq!(order(&session), vec![ids[0].clone(), copy, ids[1].clone()]);
}

#[test]
fn test_delete_mutation_clears_selection() {
    let (mut session, ids) = session_with(&[BlockType::Header, BlockType::Text]);
    session.select(Some(&ids[1])).unwrap();

    session
        .apply(Mutation::DeleteBlock {
            block_id: ids[1].clone(),
        })
        .unwrap();

    assert!(session.selected().is_none());
    assert_eq!(order(&session), vec![ids[0].clone()]);
}

#[test]
fn test_delete_other_block_keeps_selection() {
    let (mut session, ids) = session_with(&[BlockType::Header, BlockType::Text]);
    session.select(Some(&ids[0])).unwrap();

    session
        .apply(Mutation::DeleteBlock {
            block_id: ids[1].clone(),
        })
        .unwrap();

    assert_eq!(session.selected(), Some(ids[0].as_str()));
}

#[test]
fn test_global_styles_mutation() {
    let (mut session, _) = session_with(&[BlockType::Hero]);

    session
        .apply(Mutation::UpdateGlobalStyles {
            styles: GlobalStylesPatch {
                primary_color: Some("#dc2626".to_string()),
                ..Default::default()
            },
        })
        .unwrap();

    assert_eq!(session.document().global_styles.primary_color, "#dc2626");
    assert_eq!(session.document().global_styles.content_width, 600);
}

#[test]
fn test_bind_media_mutation() {
    let (mut session, ids) = session_with(&[BlockType::Testimonial]);

    session
        .apply(Mutation::BindMedia {
            block_id: ids[0].clone(),
            field: "avatarUrl".to_string(),
            url: "https://cdn.test/face.jpg".to_string(),
        })
        .unwrap();

    assert_eq!(session.document().blocks[0].content["avatarUrl"], "https://cdn.test/face.jpg");
}

#[test]
fn test_mutations_from_json() {
    let (mut session, ids) = session_with(&[BlockType::Text]);

    let raw = json!({
        "kind": "update_content",
        "block_id": ids[0],
        "content": { "text": "From the wire" }
    });
    let mutation: Mutation = serde_json::from_value(raw).unwrap();
    session.apply(mutation).unwrap();

    assert_eq!(session.document().blocks[0].content["text"], "From the wire");
}
