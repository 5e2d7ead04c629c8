#![allow(dead_code)]

use trackdag::dag::{Computation, ExecutionItem, Locality};
use trackdag::path::{ComputationId, GlobalPath, Path, SessionId};

pub const SESSION: &str = "s1";
pub const COMPUTATION: &str = "c1";

pub fn session() -> SessionId {
    SessionId::new(SESSION).expect("valid session id")
}

pub fn computation_id() -> ComputationId {
    ComputationId::new(COMPUTATION).expect("valid computation id")
}

/// Global path for `local` in the default session/computation.
pub fn gp(local: &str) -> GlobalPath {
    gp_in(SESSION, COMPUTATION, local)
}

pub fn gp_in(session: &str, computation: &str, local: &str) -> GlobalPath {
    GlobalPath::new(
        SessionId::new(session).expect("valid session id"),
        ComputationId::new(computation).expect("valid computation id"),
        Path::parse(local).expect("valid local path"),
    )
}

/// Builder for `ExecutionItem` in the default session/computation.
pub struct ItemBuilder {
    item: ExecutionItem,
    session: String,
    computation: String,
}

impl ItemBuilder {
    pub fn local(path: &str) -> Self {
        Self::new(path, Locality::Local)
    }

    pub fn distributed(path: &str) -> Self {
        Self::new(path, Locality::Distributed)
    }

    pub fn new(path: &str, locality: Locality) -> Self {
        Self {
            item: ExecutionItem::new(gp(path), locality),
            session: SESSION.to_string(),
            computation: COMPUTATION.to_string(),
        }
    }

    /// Move the item (and later deps) into another session/computation.
    pub fn in_computation(mut self, session: &str, computation: &str) -> Self {
        self.session = session.to_string();
        self.computation = computation.to_string();
        let local = self.item.path.path().to_string();
        self.item.path = gp_in(session, computation, &local);
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.item.deps.push(gp_in(&self.session, &self.computation, dep));
        self
    }

    pub fn logical(mut self, dep: &str) -> Self {
        self.item
            .logical_deps
            .push(gp_in(&self.session, &self.computation, dep));
        self
    }

    pub fn build(self) -> ExecutionItem {
        self.item
    }
}

/// Build a computation that is expected to be valid.
pub fn computation(items: Vec<ExecutionItem>) -> Computation {
    Computation::create(computation_id(), items).expect("Failed to build valid computation")
}

/// `A(Local) <- B(Distributed) <- C(Local)`.
pub fn collapse_chain() -> Vec<ExecutionItem> {
    vec![
        ItemBuilder::local("A").build(),
        ItemBuilder::distributed("B").after("A").build(),
        ItemBuilder::local("C").after("B").build(),
    ]
}
