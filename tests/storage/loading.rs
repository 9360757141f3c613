//! Integration tests for story loading

use storyloom_foundation::{ErrorKind, NodeId};
use storyloom_storage::{StoryDefinition, load_story_file, load_story_str};

const LIGHTHOUSE: &str = include_str!("../../data/instance.json");

#[test]
fn bundled_story_loads() {
    let story = load_story_str(LIGHTHOUSE).unwrap();

    assert_eq!(story.title(), "The Lighthouse");
    assert_eq!(story.start_id(), &NodeId::from("shore"));
    assert_eq!(story.pre_hook(), Some("onEnter"));
    assert_eq!(story.len(), 6);
    assert!(story.dangling_targets().is_empty());

    let door = story.node("door").unwrap();
    assert_eq!(door.sound_cue.as_deref(), Some("wind"));
    assert_eq!(door.choices[0].required_items, vec!["brass key".to_string()]);
    assert!(door.choices[0].remove_items_on_choice);
    assert!(story.node("lamp").unwrap().terminal);
}

#[test]
fn bundled_story_loads_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/instance.json");
    let story = load_story_file(path).unwrap();
    assert_eq!(story.node("stairs").unwrap().post_hook.as_deref(), Some("findLamp"));
}

#[test]
fn schemas_may_be_mixed_within_one_story() {
    let story = load_story_str(
        r#"{
            "title": "Mixed",
            "nodes": [
                { "id": "a", "text": "A", "prescript": "old", "postHook": "new",
                  "options": [ { "text": "on", "transfer_id": "b", "requiredItems": ["x"] } ] },
                { "id": "b", "text": "B", "end": true }
            ]
        }"#,
    )
    .unwrap();

    let a = story.node("a").unwrap();
    assert_eq!(a.pre_hook.as_deref(), Some("old"));
    assert_eq!(a.post_hook.as_deref(), Some("new"));
    assert_eq!(a.choices[0].target, NodeId::from("b"));
}

#[test]
fn definitions_serialize_canonically() {
    let definition: StoryDefinition = serde_json::from_str(
        r#"{ "title": "T", "prescript": "p", "nodes": [ { "id": "a", "text": "A", "end": true } ] }"#,
    )
    .unwrap();
    let json = serde_json::to_string(&definition).unwrap();

    assert!(json.contains("\"preHook\":\"p\""));
    assert!(json.contains("\"terminal\":true"));
    assert!(!json.contains("prescript"));
}

#[test]
fn duplicate_ids_fail_to_load() {
    let err = load_story_str(
        r#"{ "title": "T", "nodes": [
            { "id": "a", "text": "A", "terminal": true },
            { "id": "a", "text": "again", "terminal": true }
        ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Load(_)));
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn nodes_without_ids_fail_to_load() {
    for node in [
        r#"{ "text": "B", "terminal": true }"#,
        r#"{ "id": " ", "text": "B", "terminal": true }"#,
    ] {
        let json = format!(
            r#"{{ "title": "T", "nodes": [ {{ "id": "a", "text": "A", "terminal": true }}, {node} ] }}"#
        );
        let err = load_story_str(&json).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Load(_)), "{err}");
        assert!(err.to_string().contains("node 2 has no id"), "{err}");
    }
}
