//! Integration tests for presentation colors

use storyloom_foundation::{Color, ErrorKind};

#[test]
fn script_color_names_parse() {
    for (name, color) in [
        ("White", Color::White),
        ("DarkYellow", Color::DarkYellow),
        ("darkgray", Color::DarkGray),
        ("MAGENTA", Color::Magenta),
    ] {
        assert_eq!(name.parse::<Color>().unwrap(), color);
    }
}

#[test]
fn display_uses_canonical_name() {
    assert_eq!(Color::DarkCyan.to_string(), "DarkCyan");
    assert_eq!(format!("{}", Color::Gray), "Gray");
}

#[test]
fn palette_has_sixteen_distinct_names() {
    let mut names: Vec<_> = Color::ALL.iter().map(|c| c.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 16);
}

#[test]
fn unknown_or_empty_names_fail() {
    for name in ["", "Purple", "dark yellow"] {
        let err = name.parse::<Color>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Script(_)), "{name:?}");
    }
}
