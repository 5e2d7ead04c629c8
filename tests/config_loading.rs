// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use trackdag::cache::UpdatePolicy;
use trackdag::config::{load_and_validate, load_or_default, load_plan};
use trackdag::dag::{Computation, Locality};
use trackdag::errors::TrackdagError;
use trackdag::inspect;
use trackdag_test_utils::builders::gp;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_loaded() {
    let file = write_temp(
        r#"
[cache]
update_policy = "keep_terminal"

[runtime]
event_buffer = 8
exit_when_settled = true

[limits]
max_items = 50
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.cache.update_policy, UpdatePolicy::KeepTerminal);
    assert_eq!(cfg.runtime.event_buffer, 8);
    assert!(cfg.runtime.exit_when_settled);
    assert_eq!(cfg.limits.max_items, 50);
}

#[test]
fn empty_config_uses_defaults() {
    let file = write_temp("");

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.cache.update_policy, UpdatePolicy::Overwrite);
    assert_eq!(cfg.runtime.event_buffer, 64);
    assert!(!cfg.runtime.exit_when_settled);
    assert_eq!(cfg.limits.max_items, 100_000);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_or_default(dir.path().join("Trackdag.toml")).unwrap();
    assert_eq!(cfg.cache.update_policy, UpdatePolicy::Overwrite);
}

#[test]
fn zero_event_buffer_returns_config_error() {
    let file = write_temp("[runtime]\nevent_buffer = 0\n");

    match load_and_validate(file.path()) {
        Err(TrackdagError::ConfigError(msg)) => assert!(msg.contains("event_buffer")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_policy_is_a_toml_error() {
    let file = write_temp("[cache]\nupdate_policy = \"sometimes\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(TrackdagError::TomlError(_))
    ));
}

#[test]
fn plan_file_lifts_local_paths() {
    let file = write_temp(
        r#"
session = "s1"
computation = "c1"

[[item]]
path = "A"
locality = "local"

[[item]]
path = "B"
locality = "distributed"
deps = ["A"]

[[item]]
path = "C"
locality = "local"
deps = ["B"]
logical_deps = ["A"]
"#,
    );

    let plan = load_plan(file.path()).unwrap();
    assert_eq!(plan.session.as_str(), "s1");
    assert_eq!(plan.items.len(), 3);
    assert_eq!(plan.items[1].locality, Locality::Distributed);
    assert_eq!(plan.items[2].deps, vec![gp("B")]);
    assert_eq!(plan.items[2].logical_deps, vec![gp("A")]);

    let comp = Computation::create(plan.computation.clone(), plan.items.clone()).unwrap();
    assert_eq!(comp.tracked_dependencies()[&gp("C")], vec![gp("A")]);

    let report = inspect(&plan, &Default::default()).unwrap();
    assert!(report.contains("output      = //s1/c1/C"));
    assert!(report.contains("event_buffer = 64"));
    assert!(report.contains("exit_when_settled = false"));
    assert!(report.contains("//s1/c1/C <- [//s1/c1/A]"));
    assert!(report.contains("1. //s1/c1/A"));
    assert!(report.contains("2. //s1/c1/C"));
}

#[test]
fn plan_with_bad_path_is_rejected() {
    let file = write_temp(
        r#"
session = "s1"
computation = "c1"

[[item]]
path = "a//b"
locality = "local"
"#,
    );

    assert!(matches!(load_plan(file.path()), Err(TrackdagError::InvalidPath(_))));
}

#[test]
fn inspect_reports_out_of_order_plan() {
    let file = write_temp(
        r#"
session = "s1"
computation = "c1"

[[item]]
path = "C"
locality = "local"
deps = ["A"]

[[item]]
path = "A"
locality = "local"
"#,
    );

    let plan = load_plan(file.path()).unwrap();
    match inspect(&plan, &Default::default()) {
        Err(TrackdagError::OutOfTopologicalOrder { item, missing }) => {
            assert_eq!(item, gp("C"));
            assert_eq!(missing, gp("A"));
        }
        other => panic!("expected OutOfTopologicalOrder, got {other:?}"),
    }
}
