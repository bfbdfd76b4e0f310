//! Integration tests for ruxtab library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use ruxtab::{
    convert_lines, detect_tuning, merge_parts, parse_part, render_sections, Limits, Part, Pitch,
    Role, RuxError, Tuning, UNPLAYABLE_MARKER,
};

fn as_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // This test verifies that the public API types compile and are usable.
    // If any re-export is missing, this test will fail to compile.

    fn _assert_types() {
        let _: fn(&[String]) -> Option<Vec<String>> = detect_tuning;
        let _: fn(&[String], &Tuning, &Tuning) -> Result<Vec<String>, RuxError> = convert_lines;
        let _: char = UNPLAYABLE_MARKER;
        let _: Limits = Limits::default();
    }
}

/// Test merging a bass part and a melody part end to end.
#[test]
fn test_two_part_merge() {
    let bass_lines = as_lines(
        "Bass intro\n\
         \n\
         E1|--0---3--\n\
         A1|----2----\n\
         \n\
         E1|0--------\n\
         A1|---------\n",
    );
    let melody_lines = as_lines(
        "Lead\n\
         \n\
         E4|--0---3--\n\
         B3|----0----\n",
    );

    let limits = Limits::default();
    let bass_labels = detect_tuning(&bass_lines).expect("bass tuning should be detected");
    assert_eq!(bass_labels, vec!["E1", "A1"]);
    let bass = parse_part("bass.txt", &bass_lines, &bass_labels, limits.max_fret)
        .expect("bass part should parse");
    assert_eq!(bass.role, Role::Bass);
    assert_eq!(bass.sections.len(), 2);

    let melody_labels = detect_tuning(&melody_lines).expect("melody tuning should be detected");
    let melody = parse_part("melody.txt", &melody_lines, &melody_labels, limits.max_fret)
        .expect("melody part should parse");
    assert_eq!(melody.role, Role::Melody);

    let target = Tuning::parse(&["E2", "A2", "D3", "G3", "B3", "E4"]).unwrap();
    let outcome = merge_parts(&[bass, melody], &target, &limits);
    assert_eq!(outcome.sections.len(), 2, "positional section alignment");
    assert!(
        outcome.diagnostics.is_empty(),
        "everything is playable: {:?}",
        outcome.diagnostics
    );

    let lines = render_sections(&outcome.sections, &target);
    // 6 strings per section, one blank separator
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[6], "");
    assert!(lines[0].starts_with("E4|"), "highest string on top");
    assert!(lines[5].starts_with("E2|"), "lowest string at the bottom");

    // all string lines of a section stay column aligned
    for section_lines in [&lines[0..6], &lines[7..13]] {
        let width = section_lines[0].len();
        for line in section_lines {
            assert_eq!(line.len(), width, "ragged line: {line}");
        }
    }

    // the output is itself a tab, with the target tuning detectable
    assert_eq!(
        detect_tuning(&lines).expect("merged output carries tuning labels"),
        vec!["E4", "B3", "G3", "D3", "A2", "E2"]
    );
}

/// Test that a note out of reach renders as the unplayable marker.
#[test]
fn test_unreachable_note_renders_as_x() {
    let melody_lines = as_lines("E4|24-------\n");
    let labels = detect_tuning(&melody_lines).unwrap();
    let melody = parse_part("melody.txt", &melody_lines, &labels, 24).unwrap();

    let target = Tuning::parse(&["E1"]).unwrap();
    let outcome = merge_parts(&[melody], &target, &Limits::default());
    assert_eq!(outcome.diagnostics.len(), 1);

    let lines = render_sections(&outcome.sections, &target);
    assert!(
        lines[0].contains(UNPLAYABLE_MARKER),
        "expected an X in {lines:?}"
    );
}

/// Test error handling for invalid note labels.
#[test]
fn test_invalid_note_label() {
    let result = Tuning::parse(&["E2", "Q9"]);
    assert!(result.is_err(), "Should return error for invalid label");
    let err = result.unwrap_err();
    assert!(
        matches!(err, RuxError::InvalidNoteFormat(_)),
        "Should be an InvalidNoteFormat"
    );
}

/// Test that parts keep their identity through the public API.
#[test]
fn test_part_fields_are_public() {
    let lines = as_lines("E1|--0--\n");
    let part: Part = parse_part("bass.txt", &lines, &["E1".to_string()], 24).unwrap();
    assert_eq!(part.tuning.open(0), Pitch(16));
    assert_eq!(part.sections[0].events.get(&(2, 0)), Some(&0));
}
