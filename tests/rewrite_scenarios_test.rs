use indoc::indoc;
use mptime::{rewrite, RewriteStats};
use pretty_assertions::assert_eq;

const LEGACY_FIXTURE: &str = include_str!("fixtures/exercises/legacy.ts");
const EXPECTED_FIXTURE: &str = include_str!("fixtures/exercises/expected.ts");

#[test]
fn test_fixture_file_is_migrated() {
    let result = rewrite(LEGACY_FIXTURE).unwrap();
    assert_eq!(result.text, EXPECTED_FIXTURE);
    assert_eq!(
        result.stats,
        RewriteStats {
            blocks_matched: 2,
            entries_converted: 6,
        }
    );
}

#[test]
fn test_migrated_fixture_is_stable() {
    let result = rewrite(EXPECTED_FIXTURE).unwrap();
    assert_eq!(result.text, EXPECTED_FIXTURE);
    assert!(!result.changed());
    assert_eq!(result.stats.entries_converted, 0);
}

#[test]
fn test_end_to_end_mixed_units() {
    let input = indoc! {r#"
        export const exercises = {
          run: {
            unit: "perc:mp",
            data: [{ value: 19.1, points: 1 }, { value: 19.05, points: 2 }],
          },
          swim: {
            unit: "perc:other",
            data: [{ value: 5.3, points: 1 }],
          },
        };
    "#};
    let expected = indoc! {r#"
        export const exercises = {
          run: {
            unit: "perc:mp",
            data: [{ value: { minutes: 19, seconds: 10 }, points: 1 }, { value: { minutes: 19, seconds: 5 }, points: 2 }],
          },
          swim: {
            unit: "perc:other",
            data: [{ value: 5.3, points: 1 }],
          },
        };
    "#};

    assert_eq!(rewrite(input).unwrap().text, expected);
}

#[test]
fn test_order_and_points_preserved() {
    let input = r#"run: { unit: "perc:mp", data: [{value: 19.1, points: 1}, {value: 16.57, points: 27}] }"#;
    let expected = r#"run: { unit: "perc:mp", data: [{ value: { minutes: 19, seconds: 10 }, points: 1 }, { value: { minutes: 16, seconds: 57 }, points: 27 }] }"#;

    assert_eq!(rewrite(input).unwrap().text, expected);
}

#[test]
fn test_points_token_kept_verbatim() {
    let input = r#"run: { unit: "perc:mp", data: [{ value: 1.5, points: 007 }] }"#;
    let result = rewrite(input).unwrap();
    assert!(result.text.contains("points: 007 }"));
}

#[test]
fn test_surrounding_content_untouched() {
    let prefix = "/* value: 1.1 */\nconst unrelated = { value: 2.2, points: 3 };\n";
    let block = r#"run: { unit: "perc:mp", data: [{ value: 3.3, points: 4 }] },"#;
    let suffix = "\n// trailing comment with perc:mp in it\n";
    let input = format!("{}{}{}", prefix, block, suffix);

    let result = rewrite(&input).unwrap();

    assert!(result.text.starts_with(prefix));
    assert!(result.text.ends_with(suffix));
    assert!(result.text.contains("{ value: { minutes: 3, seconds: 30 }, points: 4 }"));
}

#[test]
fn test_text_without_blocks_is_identical() {
    let input = "export const nothing = 1;\n";
    let result = rewrite(input).unwrap();
    assert_eq!(result.text, input);
    assert_eq!(result.stats, RewriteStats::default());
}

#[test]
fn test_block_with_closing_brace_before_data_is_skipped() {
    // a nested object between unit and data ends the bounded scan
    let input = indoc! {r#"
        run: {
          unit: "perc:mp",
          meta: { id: 1 },
          data: [{ value: 19.1, points: 1 }],
        },
    "#};
    assert_eq!(rewrite(input).unwrap().text, input);
}

#[test]
fn test_malformed_value_aborts_whole_rewrite() {
    let input = indoc! {r#"
        a: { unit: "perc:mp", data: [{ value: 19.1, points: 1 }] },
        b: { unit: "perc:mp", data: [{ value: 1..2, points: 1 }] },
    "#};
    let err = rewrite(input).unwrap_err();
    assert_eq!(err.to_string(), "malformed numeral '1..2' at line 2");
}
