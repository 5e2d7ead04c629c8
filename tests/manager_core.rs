// tests/manager_core.rs

use trackdag::cache::{ComputationResult, UpdatePolicy};
use trackdag::config::TrackerConfig;
use trackdag::engine::{
    CheckpointRequest, ComputationKey, ComputationManager, CoreCommand, ManagerCore,
    RuntimeOptions, TrackerEvent,
};
use trackdag::errors::TrackdagError;
use trackdag::path::{ComputationId, SessionId};
use trackdag_test_utils::builders::{
    ItemBuilder, collapse_chain, computation_id, gp, gp_in, session,
};
use trackdag_test_utils::init_tracing;

type Manager = ComputationManager<String>;

fn manager() -> Manager {
    ComputationManager::new(&TrackerConfig::default())
}

fn key() -> ComputationKey {
    ComputationKey::new(session(), computation_id())
}

fn done(path: &str) -> (trackdag::path::GlobalPath, ComputationResult<String>) {
    (gp(path), ComputationResult::Done(format!("value of {path}")))
}

fn paths(requests: &[CheckpointRequest]) -> Vec<String> {
    requests.iter().map(|r| r.path.to_string()).collect()
}

#[test]
fn submit_seeds_tracked_items_as_scheduled() {
    init_tracing();

    let mut mgr = manager();
    let tracked = mgr.submit(session(), computation_id(), collapse_chain()).unwrap();

    assert_eq!(tracked.output(), &gp("C"));
    assert_eq!(mgr.status(&gp("A")), Some(&ComputationResult::Scheduled));
    assert_eq!(mgr.status(&gp("C")), Some(&ComputationResult::Scheduled));
    assert_eq!(mgr.status(&gp("B")), None);
    assert_eq!(mgr.reader().status(&gp("A")), Some(ComputationResult::Scheduled));
}

#[test]
fn take_ready_follows_collapsed_dependencies() {
    let mut mgr = manager();
    mgr.submit(session(), computation_id(), collapse_chain()).unwrap();

    let first = mgr.take_ready();
    assert_eq!(paths(&first), vec!["//s1/c1/A"]);
    assert_eq!(mgr.status(&gp("A")), Some(&ComputationResult::Running));

    // Nothing new until A is done.
    assert!(mgr.take_ready().is_empty());

    mgr.report(vec![done("A")]);
    let second = mgr.take_ready();
    assert_eq!(
        second,
        vec![CheckpointRequest {
            path: gp("C"),
            after: vec![gp("A")],
        }]
    );

    mgr.report(vec![done("C")]);
    assert!(mgr.is_settled());
    assert_eq!(mgr.final_result(&gp("C")), Some(&"value of C".to_string()));
}

#[test]
fn invalid_submission_is_rejected_whole() {
    let mut mgr = manager();
    let items = vec![
        ItemBuilder::local("A").build(),
        ItemBuilder::local("C").after("missing").build(),
    ];

    let err = mgr.submit(session(), computation_id(), items).unwrap_err();
    assert!(matches!(err, TrackdagError::OutOfTopologicalOrder { .. }));
    assert_eq!(mgr.status(&gp("A")), None);
    assert!(mgr.computation(&key()).is_none());
    assert_eq!(mgr.snapshot().version(), 0);
}

#[test]
fn duplicate_and_foreign_submissions_are_rejected() {
    let mut mgr = manager();
    mgr.submit(session(), computation_id(), collapse_chain()).unwrap();

    let err = mgr.submit(session(), computation_id(), collapse_chain()).unwrap_err();
    assert!(matches!(err, TrackdagError::DuplicateComputation(ref k) if k == "//s1/c1"));

    let other = ComputationId::new("c2").unwrap();
    let err = mgr.submit(session(), other, collapse_chain()).unwrap_err();
    match err {
        TrackdagError::ForeignItem { item, computation } => {
            assert_eq!(item, gp("A"));
            assert_eq!(computation, "//s1/c2");
        }
        other => panic!("expected ForeignItem, got {other:?}"),
    }
}

#[test]
fn submissions_over_the_limit_are_rejected() {
    let mut cfg = TrackerConfig::default();
    cfg.limits.max_items = 2;
    let mut mgr: Manager = ComputationManager::new(&cfg);

    match mgr.submit(session(), computation_id(), collapse_chain()) {
        Err(TrackdagError::TooManyItems { count: 3, limit: 2 }) => {}
        other => panic!("expected TooManyItems, got {other:?}"),
    }
}

#[test]
fn reports_for_untracked_or_unknown_paths_are_dropped() {
    let mut mgr = manager();
    mgr.submit(session(), computation_id(), collapse_chain()).unwrap();
    let before = mgr.snapshot().version();

    let version = mgr.report(vec![
        (gp("B"), ComputationResult::Running),
        (gp_in("s9", "c9", "A"), ComputationResult::Running),
    ]);

    assert_eq!(version, before);
    assert_eq!(mgr.status(&gp("B")), None);
}

#[test]
fn failure_blocks_downstream_checkpoints() {
    let mut mgr = manager();
    mgr.submit(
        session(),
        computation_id(),
        vec![
            ItemBuilder::local("A").build(),
            ItemBuilder::local("B").after("A").build(),
            ItemBuilder::local("C").after("B").build(),
        ],
    )
    .unwrap();

    mgr.take_ready();
    mgr.report(vec![(gp("A"), ComputationResult::Failed("boom".into()))]);

    assert!(mgr.take_ready().is_empty());
    assert!(mgr.is_settled());
    assert_eq!(mgr.output_result(&key()).unwrap(), Some(&ComputationResult::Scheduled));

    let status = mgr.computation_status(&key()).unwrap();
    let summary: Vec<_> = status
        .iter()
        .map(|s| (s.path.to_string(), s.state.as_ref().map(|r| r.state_name()), s.blocked))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("//s1/c1/A".to_string(), Some("failed"), false),
            ("//s1/c1/B".to_string(), Some("scheduled"), true),
            ("//s1/c1/C".to_string(), Some("scheduled"), true),
        ]
    );
}

#[test]
fn unknown_computation_status_is_an_error() {
    let mgr = manager();
    let missing = ComputationKey::new(SessionId::new("nope").unwrap(), computation_id());
    assert!(matches!(
        mgr.computation_status(&missing),
        Err(TrackdagError::UnknownComputation(_))
    ));
}

#[test]
fn keep_terminal_manager_ignores_stale_running_report() {
    let mut cfg = TrackerConfig::default();
    cfg.cache.update_policy = UpdatePolicy::KeepTerminal;
    let mut mgr: Manager = ComputationManager::new(&cfg);
    mgr.submit(session(), computation_id(), collapse_chain()).unwrap();

    mgr.report(vec![done("A")]);
    mgr.report(vec![(gp("A"), ComputationResult::Running)]);

    assert_eq!(mgr.final_result(&gp("A")), Some(&"value of A".to_string()));
}

#[test]
fn readers_see_published_snapshots() {
    let mut mgr = manager();
    let reader = mgr.reader();
    assert_eq!(reader.snapshot().version(), 0);

    mgr.submit(session(), computation_id(), collapse_chain()).unwrap();
    mgr.report(vec![done("A")]);

    assert_eq!(reader.final_result(&gp("A")), Some("value of A".to_string()));
    assert_eq!(reader.snapshot().version(), mgr.snapshot().version());
}

#[test]
fn core_steps_through_submission_and_reports() {
    init_tracing();

    let options = RuntimeOptions {
        exit_when_settled: true,
    };
    let mut core = ManagerCore::new(manager(), options);

    let step = core.step(TrackerEvent::Submitted {
        session: session(),
        computation: computation_id(),
        items: collapse_chain(),
    });
    assert!(step.keep_running);
    assert_eq!(
        step.commands,
        vec![CoreCommand::RequestCheckpoints(vec![CheckpointRequest {
            path: gp("A"),
            after: vec![],
        }])]
    );

    let step = core.step(TrackerEvent::Reported {
        updates: vec![done("A")],
    });
    assert!(step.keep_running);
    assert!(matches!(
        step.commands.as_slice(),
        [CoreCommand::RequestCheckpoints(reqs)] if reqs.len() == 1 && reqs[0].path == gp("C")
    ));

    let step = core.step(TrackerEvent::Reported {
        updates: vec![done("C")],
    });
    assert!(!step.keep_running);
    assert_eq!(step.commands, vec![CoreCommand::RequestExit]);
}

#[test]
fn core_keeps_running_after_rejected_submission() {
    let mut core = ManagerCore::new(manager(), RuntimeOptions::default());

    let step = core.step(TrackerEvent::Submitted {
        session: session(),
        computation: computation_id(),
        items: vec![ItemBuilder::distributed("only").build()],
    });

    assert!(step.keep_running);
    assert!(step.commands.is_empty());
    assert!(core.manager().computations().next().is_none());

    let step = core.step(TrackerEvent::ShutdownRequested);
    assert!(!step.keep_running);
}

#[test]
fn exit_when_settled_is_read_from_config() {
    let mut cfg = TrackerConfig::default();
    cfg.runtime.exit_when_settled = true;

    let options = RuntimeOptions::from(&cfg);
    assert!(options.exit_when_settled);
    assert!(!RuntimeOptions::from(&TrackerConfig::default()).exit_when_settled);

    let mut core: ManagerCore<String> = ManagerCore::from_config(&cfg);
    core.step(TrackerEvent::Submitted {
        session: session(),
        computation: computation_id(),
        items: vec![ItemBuilder::local("A").build()],
    });

    let step = core.step(TrackerEvent::Reported {
        updates: vec![done("A")],
    });
    assert!(!step.keep_running);
    assert_eq!(step.commands, vec![CoreCommand::RequestExit]);
}

#[test]
fn default_config_keeps_core_running_when_settled() {
    let mut core: ManagerCore<String> = ManagerCore::from_config(&TrackerConfig::default());
    core.step(TrackerEvent::Submitted {
        session: session(),
        computation: computation_id(),
        items: vec![ItemBuilder::local("A").build()],
    });

    let step = core.step(TrackerEvent::Reported {
        updates: vec![done("A")],
    });
    assert!(step.keep_running);
    assert!(core.manager().is_settled());
}
