//! Plain-terminal playthroughs through the runtime surfaces

use storyloom_engine::{Engine, Outcome, Session};
use storyloom_foundation::NodeId;
use storyloom_host::{Cue, NoScript};
use storyloom_runtime::{ConsolePresenter, LoggedAudio, RuntimeConfig, StdinEditor};
use storyloom_storage::load_story_str;

const TWO_ROOMS: &str = r#"{
    "title": "Two Rooms",
    "nodes": [
        {
            "id": "hall",
            "text": "A hall.",
            "ambientCue": "hum",
            "options": [
                { "text": "Open the chest", "targetNodeId": "end", "requiredItems": ["key"] },
                { "text": "Leave", "targetNodeId": "end" }
            ]
        },
        { "id": "end", "text": "Done.", "terminal": true }
    ]
}"#;

struct Screen {
    outcome: Outcome,
    output: String,
    prompts: String,
    audio: LoggedAudio,
}

fn play_plain(config: &RuntimeConfig, input: &[u8]) -> Screen {
    let story = load_story_str(TWO_ROOMS).unwrap();
    let mut session = Session::new(story, NoScript);
    let mut presenter = ConsolePresenter::new(Vec::new())
        .with_color(config.color)
        .with_divider(config.messages.separator.clone());
    let mut audio = LoggedAudio::new(&config.sound_dir, config.sound_extension.clone());
    let mut editor = StdinEditor::new(input, Vec::new());

    let outcome = Engine::new(&mut presenter, &mut audio, &mut editor)
        .with_config(config.engine_config())
        .run(&mut session)
        .unwrap();

    Screen {
        outcome,
        output: String::from_utf8(presenter.into_inner()).unwrap(),
        prompts: String::from_utf8(editor.into_output()).unwrap(),
        audio,
    }
}

#[test]
fn plain_output_from_configured_run() {
    let config = RuntimeConfig::from_toml_str(
        r#"
        color = false
        show_inventory = false

        [messages]
        prompt = "> "
        invalid_input = "Pick again."
        "#,
    )
    .unwrap();

    let screen = play_plain(&config, b"x\n1\n2\n");

    assert_eq!(screen.outcome, Outcome::Finished(NodeId::from("end")));
    assert_eq!(
        screen.output,
        "Two Rooms\n\
         \n\
         A hall.\n\
         1) Open the chest\n\
         2) Leave\n\
         ---------------------------\n\
         Pick again.\n\
         Pick again.\n\
         \n\
         Done.\n"
    );
    assert_eq!(screen.prompts, "> > > ");
}

#[test]
fn inventory_is_listed_by_default() {
    let config = RuntimeConfig {
        color: false,
        clear_screen: false,
        ..RuntimeConfig::default()
    };

    let screen = play_plain(&config, b"2\n");
    let lines: Vec<_> = screen.output.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Two Rooms",
            "",
            "A hall.",
            "---------------------------",
            "Inventory:",
            "---------------------------",
            "1) Open the chest",
            "2) Leave",
            "---------------------------",
            "Done.",
        ]
    );
}

#[test]
fn closed_input_abandons_quietly() {
    let config = RuntimeConfig {
        color: false,
        ..RuntimeConfig::default()
    };

    let screen = play_plain(&config, b"");

    assert_eq!(screen.outcome, Outcome::Abandoned(NodeId::from("hall")));
    assert!(!screen.output.contains("Invalid input!"));
    assert_eq!(screen.audio.playing(), &[Cue::looping("hum")]);
}

#[test]
fn colored_run_emits_escapes() {
    let screen = play_plain(&RuntimeConfig::default(), b"2\n");

    assert!(screen.output.starts_with("\x1b[1mTwo Rooms\x1b[0m\n"));
    assert!(screen.output.contains("\x1b[91m1) Open the chest\x1b[0m"));
    assert!(screen.output.contains("\x1b[2J\x1b[H"));
    assert!(screen.audio.playing().is_empty(), "audio stops on transition");
}

#[test]
fn undecodable_input_is_rejected_and_reprompted() {
    let config = RuntimeConfig {
        color: false,
        show_inventory: false,
        ..RuntimeConfig::default()
    };

    let screen = play_plain(&config, b"\xff\xfe\n2\n");

    assert_eq!(screen.outcome, Outcome::Finished(NodeId::from("end")));
    assert_eq!(screen.output.matches("Invalid input!").count(), 1);
    assert_eq!(screen.prompts, ":> :> ");
}
