use mptime::{run_migration, FileStatus, MigrateError, MigrationConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LEGACY_FIXTURE: &str = include_str!("fixtures/exercises/legacy.ts");
const EXPECTED_FIXTURE: &str = include_str!("fixtures/exercises/expected.ts");

/// Helper function to lay out the two generated data files
fn create_data_dir() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("src/data");
    fs::create_dir_all(&data).unwrap();

    let female = data.join("exercises-female.ts");
    let male = data.join("exercises-male.ts");
    fs::write(&female, LEGACY_FIXTURE).unwrap();
    fs::write(&male, LEGACY_FIXTURE).unwrap();

    (temp_dir, female, male)
}

#[test]
fn test_migrates_every_listed_file() {
    let (_temp, female, male) = create_data_dir();

    let report = run_migration(&MigrationConfig {
        files: vec![female.clone(), male.clone()],
        dry_run: false,
    });

    assert!(!report.has_failures());
    assert_eq!(report.total_entries(), 12);
    assert_eq!(fs::read_to_string(&female).unwrap(), EXPECTED_FIXTURE);
    assert_eq!(fs::read_to_string(&male).unwrap(), EXPECTED_FIXTURE);
}

#[test]
fn test_second_run_reports_unchanged() {
    let (_temp, female, _male) = create_data_dir();
    let config = MigrationConfig {
        files: vec![female.clone()],
        dry_run: false,
    };

    run_migration(&config);
    let report = run_migration(&config);

    assert!(matches!(report.outcomes[0].status, FileStatus::Unchanged));
    assert_eq!(fs::read_to_string(&female).unwrap(), EXPECTED_FIXTURE);
}

#[test]
fn test_malformed_file_is_left_intact_and_others_proceed() {
    let (_temp, female, male) = create_data_dir();
    let broken = r#"run: { unit: "perc:mp", data: [{ value: 19.1, points: 1 }, { value: 1.2.3, points: 2 }] },
"#;
    fs::write(&female, broken).unwrap();

    let report = run_migration(&MigrationConfig {
        files: vec![female.clone(), male.clone()],
        dry_run: false,
    });

    match &report.outcomes[0].status {
        FileStatus::Failed {
            error: MigrateError::Conversion { path, .. },
        } => assert_eq!(path, &female),
        other => panic!("expected conversion failure, got {:?}", other),
    }
    // nothing half-written
    assert_eq!(fs::read_to_string(&female).unwrap(), broken);
    assert!(matches!(
        report.outcomes[1].status,
        FileStatus::Converted { .. }
    ));
    assert_eq!(report.failures().count(), 1);
}

#[test]
fn test_missing_file_does_not_stop_batch() {
    let (temp, female, _male) = create_data_dir();
    let missing = temp.path().join("src/data/exercises-other.ts");

    let report = run_migration(&MigrationConfig {
        files: vec![missing.clone(), female.clone()],
        dry_run: false,
    });

    assert!(matches!(
        &report.outcomes[0].status,
        FileStatus::Failed { error: MigrateError::FileNotFound { path } } if path == &missing
    ));
    assert!(!missing.exists());
    assert_eq!(fs::read_to_string(&female).unwrap(), EXPECTED_FIXTURE);
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_temp, female, male) = create_data_dir();

    let report = run_migration(&MigrationConfig {
        files: vec![female.clone(), male.clone()],
        dry_run: true,
    });

    assert!(report.dry_run);
    assert_eq!(report.total_entries(), 12);
    assert!(report
        .outcomes
        .iter()
        .all(|o| matches!(o.status, FileStatus::WouldConvert { .. })));
    assert_eq!(fs::read_to_string(&female).unwrap(), LEGACY_FIXTURE);
    assert_eq!(fs::read_to_string(&male).unwrap(), LEGACY_FIXTURE);
}
