//! Integration tests for live graph edits

use proptest::prelude::*;
use storyloom_foundation::{ErrorKind, NodeId};
use storyloom_storage::{Choice, Node, Story};

fn hub(spokes: usize) -> Story {
    let mut hub = Node::new("hub", "The hub.");
    let mut nodes = Vec::new();
    for i in 0..spokes {
        hub = hub.with_choice(Choice::new(format!("Spoke {i}"), format!("spoke{i}")));
        nodes.push(
            Node::new(format!("spoke{i}"), format!("Spoke {i}."))
                .with_choice(Choice::new("Back", "hub")),
        );
    }
    nodes.insert(0, hub);
    Story::new("Hub", nodes).unwrap()
}

#[test]
fn edits_touch_only_the_named_node() {
    let mut story = hub(3);
    let before = story.node("spoke1").unwrap().clone();

    story.insert_choice("hub", 3, Choice::new("Secret", "spoke0")).unwrap();
    story.remove_choice("hub", 0).unwrap();

    let texts: Vec<_> = story
        .node("hub")
        .unwrap()
        .choices
        .iter()
        .map(|c| c.text.clone())
        .collect();
    assert_eq!(texts, vec!["Spoke 1", "Spoke 2", "Secret"]);
    assert_eq!(story.node("spoke1").unwrap(), &before);
    assert_eq!(story.start_id(), &NodeId::from("hub"));
}

#[test]
fn edits_can_create_and_repair_dangling_targets() {
    let mut story = hub(1);
    story.insert_choice("spoke0", 0, Choice::new("Down", "basement")).unwrap();
    assert_eq!(
        story.dangling_targets(),
        vec![(NodeId::from("spoke0"), 0, NodeId::from("basement"))]
    );

    story.remove_choice("spoke0", 0).unwrap();
    assert!(story.dangling_targets().is_empty());
}

#[test]
fn removing_every_choice_breaks_validation() {
    let mut story = hub(1);
    story.remove_choice("hub", 0).unwrap();
    let err = story.node("hub").unwrap().validate().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNode { .. }));

    let err = story.remove_choice("hub", 0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Script(_)));
}

proptest! {
    #[test]
    fn insert_then_remove_restores_the_node(spokes in 1usize..6, position in 0usize..8) {
        let mut story = hub(spokes);
        let original = story.node("hub").unwrap().clone();
        let position = position % (spokes + 1);

        story.insert_choice("hub", position, Choice::new("Temp", "hub")).unwrap();
        prop_assert_eq!(story.node("hub").unwrap().choices.len(), spokes + 1);
        let removed = story.remove_choice("hub", position).unwrap();

        prop_assert_eq!(removed.text, "Temp");
        prop_assert_eq!(story.node("hub").unwrap(), &original);
    }
}
