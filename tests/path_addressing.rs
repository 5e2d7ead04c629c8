// tests/path_addressing.rs

use std::collections::HashMap;

use trackdag::errors::TrackdagError;
use trackdag::path::{ComputationId, GlobalPath, Path, SessionId};
use trackdag_test_utils::builders::{gp, gp_in};

#[test]
fn path_splits_on_slash() {
    let path = Path::parse("load/users/part-0").unwrap();
    assert_eq!(path.segments(), ["load", "users", "part-0"]);
    assert_eq!(path.to_string(), "load/users/part-0");
}

#[test]
fn empty_string_is_empty_path() {
    let path = Path::parse("").unwrap();
    assert!(path.is_empty());
    assert_eq!(path, Path::default());
}

#[test]
fn empty_segments_are_rejected() {
    for bad in ["a//b", "/a", "a/"] {
        match Path::parse(bad) {
            Err(TrackdagError::InvalidPath(msg)) => assert!(msg.contains("empty"), "{msg}"),
            other => panic!("expected InvalidPath for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn ids_must_not_contain_separator() {
    assert!(SessionId::new("a/b").is_err());
    assert!(ComputationId::new("").is_err());
    assert!(SessionId::new("session-1").is_ok());
}

#[test]
fn global_path_renders_canonical_form() {
    assert_eq!(gp_in("s", "c", "x/y").to_string(), "//s/c/x/y");
    assert_eq!(gp_in("s", "c", "").to_string(), "//s/c");
}

#[test]
fn global_path_parses_back_to_same_triple() {
    let built = gp_in("sess", "comp", "stage/one/out");
    let parsed: GlobalPath = built.to_string().parse().unwrap();

    assert_eq!(parsed, built);
    assert_eq!(parsed.session().as_str(), "sess");
    assert_eq!(parsed.computation().as_str(), "comp");
    assert_eq!(parsed.path().segments(), ["stage", "one", "out"]);

    let root = gp_in("sess", "comp", "");
    assert_eq!(GlobalPath::parse(&root.to_string()).unwrap(), root);
}

#[test]
fn malformed_global_paths_are_rejected() {
    for bad in ["s/c/x", "/s/c/x", "//s", "//s//x", "//s/c/", "//s/c/a//b", ""] {
        assert!(GlobalPath::parse(bad).is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn global_path_is_a_structural_map_key() {
    let mut map = HashMap::new();
    map.insert(gp("a/b"), 1);

    let rebuilt = GlobalPath::new(
        SessionId::new("s1").unwrap(),
        ComputationId::new("c1").unwrap(),
        Path::new(["a", "b"]).unwrap(),
    );
    assert_eq!(map.get(&rebuilt), Some(&1));
    assert_eq!(map.get(&gp("a")), None);
}

#[test]
fn child_appends_segment() {
    let parent = Path::parse("a").unwrap();
    let child = parent.child("b").unwrap();
    assert_eq!(child.to_string(), "a/b");
    assert_eq!(parent.to_string(), "a");
    assert!(parent.child("x/y").is_err());
}
