//! Scenario tests for the node cycle

use storyloom_engine::{Engine, EngineConfig, Outcome, QueuedInput, Session, SessionState};
use storyloom_foundation::{ErrorKind, NodeId};
use storyloom_host::{CueLog, NativeScript, NoScript, ScriptHost, Shown, Transcript};
use storyloom_storage::{Choice, Gate, Node, Story};

struct Run {
    outcome: storyloom_foundation::Result<Outcome>,
    transcript: Transcript,
    input: QueuedInput,
}

fn run<S: ScriptHost>(session: &mut Session<S>, lines: &[&str]) -> Run {
    let mut transcript = Transcript::new();
    let mut cues = CueLog::new();
    let mut input = QueuedInput::new(lines.iter().copied());
    let outcome = Engine::new(&mut transcript, &mut cues, &mut input).run(session);
    Run {
        outcome,
        transcript,
        input,
    }
}

fn start_north() -> Story {
    Story::new(
        "Compass",
        [
            Node::new("start", "Welcome").with_choice(Choice::new("Go north", "north")),
            Node::new("north", "Cold wind.").terminal(),
        ],
    )
    .unwrap()
}

fn key_door(pre_hook: Option<&str>) -> Story {
    let mut door = Node::new("door", "A locked door.")
        .with_choice(Choice::new("Open it", "room").requires(["key"]))
        .with_choice(Choice::new("Walk away", "street"));
    if let Some(hook) = pre_hook {
        door = door.with_pre_hook(hook);
    }
    Story::new(
        "Door",
        [
            door,
            Node::new("room", "Inside.").terminal(),
            Node::new("street", "Outside.").terminal(),
        ],
    )
    .unwrap()
}

// =============================================================================
// Basic Traversal
// =============================================================================

#[test]
fn choosing_moves_to_the_target() {
    let mut session = Session::new(start_north(), NoScript);
    let run = run(&mut session, &["1"]);

    assert_eq!(run.outcome.unwrap(), Outcome::Finished(NodeId::from("north")));
    assert_eq!(session.current(), &NodeId::from("north"));
    assert!(session.inventory().is_empty());
}

#[test]
fn explicit_start_is_honored() {
    let story = start_north().with_start("north").unwrap();
    let mut session = Session::new(story, NoScript);
    let run = run(&mut session, &[]);

    assert_eq!(run.outcome.unwrap(), Outcome::Finished(NodeId::from("north")));
    assert_eq!(run.transcript.narratives(), vec!["Cold wind."]);
}

#[test]
fn closing_input_abandons_without_error() {
    let mut session = Session::new(start_north(), NoScript);
    let run = run(&mut session, &[]);

    let outcome = run.outcome.unwrap();
    assert_eq!(outcome, Outcome::Abandoned(NodeId::from("start")));
    assert!(!outcome.is_finished());
    assert_eq!(session.state(), &SessionState::Abandoned);
}

// =============================================================================
// Gating
// =============================================================================

#[test]
fn locked_choice_is_listed_and_refused() {
    let mut session = Session::new(key_door(None), NoScript);
    let run = run(&mut session, &["1", "2"]);

    let listing = run.transcript.listings()[0];
    assert_eq!(listing[0].gate, Gate::Locked);
    assert_eq!(listing[1].gate, Gate::Open);
    assert_eq!(run.transcript.rejections().len(), 1);
    assert_eq!(run.input.prompts(), &[":> ", ":> "]);
    assert_eq!(run.outcome.unwrap(), Outcome::Finished(NodeId::from("street")));
}

#[test]
fn item_from_pre_hook_unlocks_the_first_listing() {
    let script = NativeScript::new()
        .with_hook("findKey", |host, _| host.add_item("key").map(|_| ()));
    let mut session = Session::new(key_door(Some("findKey")), script);
    let run = run(&mut session, &["1"]);

    assert_eq!(run.transcript.listings()[0][0].gate, Gate::Unlocked);
    assert_eq!(run.outcome.unwrap(), Outcome::Finished(NodeId::from("room")));
    assert!(session.inventory().contains("key"), "choice does not consume");
}

#[test]
fn items_are_only_consumed_when_asked() {
    let story = Story::new(
        "Toll",
        [
            Node::new("bridge", "A troll.").with_choice(
                Choice::new("Pay", "far side")
                    .requires(["coin", "ticket"])
                    .consuming(),
            ),
            Node::new("far side", "Made it.").terminal(),
        ],
    )
    .unwrap();
    let script = NativeScript::new().with_setup(|host| {
        for item in ["coin", "ticket", "hat"] {
            host.add_item(item)?;
        }
        Ok(())
    });
    let mut session = Session::new(story, script);
    run(&mut session, &["1"]).outcome.unwrap();

    assert_eq!(session.inventory().items().collect::<Vec<_>>(), vec!["hat"]);
}

// =============================================================================
// Input Rejection
// =============================================================================

#[test]
fn rejected_input_changes_nothing() {
    let mut session = Session::new(start_north(), NoScript);
    let run = run(&mut session, &["abc", "0", "2", "-3", "", "1x"]);

    assert_eq!(run.outcome.unwrap(), Outcome::Abandoned(NodeId::from("start")));
    assert_eq!(run.transcript.rejections().len(), 6);
    assert_eq!(run.transcript.narratives(), vec!["Welcome"]);
    assert_eq!(run.transcript.listings().len(), 1, "the listing is not repeated");
    assert!(session.inventory().is_empty());
}

#[test]
fn rejection_uses_configured_message() {
    let mut transcript = Transcript::new();
    let mut cues = CueLog::new();
    let mut input = QueuedInput::new(["nope", "1"]);
    let mut config = EngineConfig::new();
    config.messages.invalid_input = "Pick a number.".into();
    config.messages.prompt = "? ".into();
    let mut session = Session::new(start_north(), NoScript);

    Engine::new(&mut transcript, &mut cues, &mut input)
        .with_config(config)
        .run(&mut session)
        .unwrap();

    assert_eq!(transcript.rejections(), vec!["Pick a number."]);
    assert_eq!(input.prompts(), &["? ", "? "]);
}

// =============================================================================
// Fatal Errors
// =============================================================================

#[test]
fn broken_link_is_fatal() {
    let story = Story::new(
        "Gap",
        [Node::new("edge", "A cliff.").with_choice(Choice::new("Jump", "nowhere"))],
    )
    .unwrap();
    let mut session = Session::new(story, NoScript);
    let run = run(&mut session, &["1"]);

    let err = run.outcome.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BrokenGraph(_)));
    assert!(err.to_string().contains("nowhere"));
    assert_eq!(session.current(), &NodeId::from("edge"));
}

#[test]
fn invalid_node_is_fatal_on_entry() {
    let story = Story::new(
        "Blank",
        [
            Node::new("start", "Go.").with_choice(Choice::new("On", "blank")),
            Node::new("blank", "").terminal(),
        ],
    )
    .unwrap();
    let mut session = Session::new(story, NoScript);
    let run = run(&mut session, &["1"]);

    let err = run.outcome.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNode { ref node, .. } if node == "blank"));
    assert!(!run.transcript.shown().contains(&Shown::Narrative(String::new())));
}

#[test]
fn script_errors_are_fatal() {
    let story = start_north().with_hooks(Some("explode".into()), None);
    let script = NativeScript::new().with_hook("explode", |_, _| {
        Err(storyloom_foundation::Error::script("kaboom"))
    });
    let mut session = Session::new(story, script);
    let run = run(&mut session, &["1"]);

    let err = run.outcome.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Script(_)));
    assert!(run.transcript.narratives().is_empty());
}

// =============================================================================
// Presentation
// =============================================================================

#[test]
fn inventory_and_title_can_be_hidden() {
    let mut transcript = Transcript::new();
    let mut cues = CueLog::new();
    let mut input = QueuedInput::new(["1"]);
    let mut session = Session::new(start_north(), NoScript);

    Engine::new(&mut transcript, &mut cues, &mut input)
        .with_config(
            EngineConfig::new()
                .with_title(false)
                .with_inventory(false)
                .with_clear_on_transition(false),
        )
        .run(&mut session)
        .unwrap();

    assert!(transcript.shown().iter().all(|shown| !matches!(
        shown,
        Shown::Title(_) | Shown::Inventory(_) | Shown::Clear
    )));
}

#[test]
fn listing_is_inventory_then_choices_then_separator() {
    let mut session = Session::new(start_north(), NoScript);
    let run = run(&mut session, &["1"]);

    let shown = run.transcript.shown();
    let at = shown
        .iter()
        .position(|s| matches!(s, Shown::Inventory(_)))
        .unwrap();
    assert!(matches!(shown[at + 1], Shown::Choices(_)));
    assert_eq!(shown[at + 2], Shown::Separator);
    assert_eq!(shown[at + 3], Shown::Clear);
}
