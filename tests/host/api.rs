//! Integration tests for the host API through native scripts

use storyloom_foundation::{Error, ErrorKind, NodeId};
use storyloom_host::{CueLog, Host, Messages, NativeScript, ScriptHost, Transcript, run_hook};
use storyloom_storage::{Choice, Inventory, Node, Story};

struct Stage {
    story: Story,
    inventory: Inventory,
    transcript: Transcript,
    cues: CueLog,
    messages: Messages,
}

impl Stage {
    fn new() -> Self {
        Self {
            story: Story::new(
                "Stage",
                [
                    Node::new("gate", "A gate.").with_choice(Choice::new("Pass", "yard")),
                    Node::new("yard", "A yard.").terminal(),
                ],
            )
            .unwrap(),
            inventory: Inventory::new(),
            transcript: Transcript::new(),
            cues: CueLog::new(),
            messages: Messages::default(),
        }
    }

    fn hook<S: ScriptHost>(
        &mut self,
        script: &mut S,
        name: &str,
    ) -> storyloom_foundation::Result<()> {
        let mut host = Host::new(
            &mut self.story,
            &mut self.inventory,
            &mut self.transcript,
            &mut self.cues,
            &self.messages,
        );
        run_hook(script, Some(name), &NodeId::from("gate"), &mut host)
    }
}

#[test]
fn hooks_see_their_own_edits() {
    let mut script = NativeScript::new().with_hook("tinker", |host, node| {
        host.insert_option(node.as_str(), 0, Choice::new("Climb", "yard"))?;
        let count = host
            .story()
            .node(node.as_str())
            .map_or(0, |n| n.choices.len());
        host.print(&format!("{count} ways on"), None)
    });
    let mut stage = Stage::new();
    stage.hook(&mut script, "tinker").unwrap();

    assert_eq!(stage.transcript.printed(), vec!["2 ways on"]);
}

#[test]
fn custom_messages_are_used() {
    let mut script = NativeScript::new().with_hook("swap", |host, _| {
        host.add_item("coin")?;
        host.remove_item("coin", true)?;
        Ok(())
    });
    let mut stage = Stage::new();
    stage.messages.item_gained = "+ {item}".into();
    stage.messages.item_lost = "- {item}".into();
    stage.hook(&mut script, "swap").unwrap();

    assert_eq!(stage.transcript.notices(), vec!["+ coin", "- coin"]);
    assert!(stage.inventory.is_empty());
}

#[test]
fn failing_hook_keeps_earlier_effects() {
    let mut script = NativeScript::new().with_hook("halfway", |host, _| {
        host.add_item("rope")?;
        Err(Error::script("the rope snaps"))
    });
    let mut stage = Stage::new();
    let err = stage.hook(&mut script, "halfway").unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Script(_)));
    assert!(err.to_string().contains("in hook 'halfway'"));
    assert!(stage.inventory.contains("rope"));
}

#[test]
fn host_reads_inventory() {
    let mut script = NativeScript::new().with_hook("check", |host, _| {
        let message = if host.inventory().contains("lamp") {
            "light"
        } else {
            "dark"
        };
        host.print(message, Some("Gray"))
    });
    let mut stage = Stage::new();
    stage.hook(&mut script, "check").unwrap();
    stage.inventory.add("lamp");
    stage.hook(&mut script, "check").unwrap();

    assert_eq!(stage.transcript.printed(), vec!["dark", "light"]);
}
