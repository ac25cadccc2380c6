// Tests for the batch report - public API only

use std::collections::BTreeMap;
use tap13::report::{Report, render_outcome};
use tap13::state::{BailOut, Directive, MetaValue, Metadata, Outcome};

fn outcomes(count: usize) -> Vec<Outcome> {
    (0..count)
        .map(|i| {
            if i % 3 == 0 {
                Outcome::failure().with_description(format!("case {}", i))
            } else {
                Outcome::success()
            }
        })
        .collect()
}

#[test]
fn test_zero_tests() {
    // Arrange
    let report = Report::new(Vec::new());

    // Act
    let text = report.render().expect("render");

    // Assert
    assert_eq!(text, "TAP version 13\n1..0");
}

#[test]
fn test_single_passing_test() {
    // Arrange
    let report = Report::new(vec![Outcome::success().with_description("basic math")]);

    // Act
    let text = report.to_string();

    // Assert
    assert_eq!(text, "TAP version 13\n1..1\nok 1 basic math");
}

#[test]
fn test_plan_line_matches_outcome_count() {
    for count in [0, 1, 2, 9, 10, 57] {
        // Arrange
        let report = Report::new(outcomes(count));

        // Act
        let text = report.render().expect("render");

        // Assert
        let plan = text.lines().nth(1).expect("plan line");
        assert_eq!(plan, format!("1..{}", count));
    }
}

#[test]
fn test_numbers_strictly_increase_from_one() {
    // Arrange
    let mut metadata = Metadata::new();
    metadata.insert("reason".to_string(), "mismatch".into());
    let report = Report::new(vec![
        Outcome::failure().with_metadata(metadata),
        Outcome::success().with_directive(Directive::skip("slow")),
        Outcome::failure().with_directive(Directive::todo("unimplemented")),
        Outcome::success().with_description("last"),
    ]);

    // Act
    let text = report.render().expect("render");

    // Assert
    let numbers: Vec<usize> = text
        .lines()
        .filter(|line| line.starts_with("ok ") || line.starts_with("not ok "))
        .map(|line| {
            let rest = line.trim_start_matches("not ").trim_start_matches("ok ");
            rest.split(' ').next().unwrap().parse().unwrap()
        })
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_skip_always_ok_and_todo_keeps_flag() {
    // Arrange
    let report = Report::new(vec![
        Outcome::failure().with_directive(Directive::skip("unneeded")),
        Outcome::success().with_directive(Directive::skip("unneeded")),
        Outcome::failure().with_directive(Directive::Todo(None)),
        Outcome::success().with_directive(Directive::Todo(None)),
    ]);

    // Act
    let text = report.render().expect("render");

    // Assert
    let lines: Vec<&str> = text.lines().skip(2).collect();
    assert_eq!(
        lines,
        vec![
            "ok 1 # SKIP unneeded",
            "ok 2 # SKIP unneeded",
            "not ok 3 # TODO",
            "ok 4 # TODO",
        ]
    );
}

#[test]
fn test_render_is_idempotent() {
    // Arrange
    let mut metadata = Metadata::new();
    metadata.insert("zeta".to_string(), MetaValue::Integer(1));
    metadata.insert("alpha".to_string(), vec!["a", "b"].into());
    let report = Report::new(vec![Outcome::failure().with_metadata(metadata)])
        .with_explanation("explained");

    // Act
    let first = report.render().expect("render");
    let second = report.render().expect("render");

    // Assert
    assert_eq!(first, second);
}

#[test]
fn test_consolidation_concatenates_in_order() {
    // Arrange
    let a = Report::new(outcomes(4));
    let b = Report::new(vec![Outcome::success().with_description("from b")]);
    let expected: Vec<Outcome> = a.outcomes().iter().chain(b.outcomes()).cloned().collect();

    // Act
    let report = Report::consolidation(vec![a, b]);

    // Assert
    assert_eq!(report.outcomes(), expected.as_slice());
    assert_eq!(report.outcomes().len(), 5);
    assert!(report.render().unwrap().ends_with("ok 5 from b"));
}

#[test]
fn test_no_outcome_after_bail_out() {
    // Arrange
    let a = Report::new(vec![Outcome::success(), Outcome::failure()])
        .with_plan(3)
        .with_bail_out(BailOut::new("disk full"));
    let b = Report::new(vec![Outcome::success().with_description("never shown")]);

    // Act
    let text = Report::consolidation(vec![a, b]).render().expect("render");

    // Assert
    assert_eq!(
        text,
        "TAP version 13\n1..3\nok 1\nnot ok 2\nBail out! disk full"
    );
}

#[test]
fn test_plan_line_never_below_outcome_count() {
    // Arrange
    let report = Report::new(vec![Outcome::success(); 3]).with_plan(1);

    // Act
    let text = report.render().expect("render");

    // Assert
    assert_eq!(text, "TAP version 13\n1..3\nok 1\nok 2\nok 3");
}

#[test]
fn test_metadata_block_indented_with_sorted_keys() {
    // Arrange
    let mut expected = BTreeMap::new();
    expected.insert("hostname".to_string(), MetaValue::from("peebles"));
    expected.insert("address".to_string(), MetaValue::from("unresolved"));
    let mut metadata = Metadata::new();
    metadata.insert("severity".to_string(), "fail".into());
    metadata.insert("expected".to_string(), MetaValue::Mapping(expected));

    let outcome = Outcome::failure()
        .with_description("Resolve address")
        .with_metadata(metadata);

    // Act
    let lines = render_outcome(&outcome, 3).expect("render");

    // Assert
    assert_eq!(
        lines,
        vec![
            "not ok 3 Resolve address",
            "  ---",
            "  expected:",
            "    address: unresolved",
            "    hostname: peebles",
            "  severity: fail",
            "  ...",
            "  ",
        ]
    );
}
