// src/config/plan.rs

//! Plan files: a single computation described in TOML.
//!
//! ```toml
//! session = "s1"
//! computation = "c1"
//!
//! [[item]]
//! path = "load/users"
//! locality = "local"
//!
//! [[item]]
//! path = "join"
//! locality = "distributed"
//! deps = ["load/users"]
//! ```
//!
//! Item paths and dependencies are computation-local and get lifted to
//! global paths under the plan's session and computation.

use serde::Deserialize;

use crate::dag::{ExecutionItem, Locality};
use crate::errors::{Result, TrackdagError};
use crate::path::{ComputationId, GlobalPath, Path, SessionId};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    pub session: String,
    pub computation: String,
    #[serde(default)]
    pub item: Vec<PlanItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanItem {
    pub path: String,
    pub locality: Locality,
    #[serde(default)]
    pub deps: Vec<String>,
    #[serde(default)]
    pub logical_deps: Vec<String>,
}

/// A plan with ids parsed and items lifted to global paths.
#[derive(Debug, Clone)]
pub struct Plan {
    pub session: SessionId,
    pub computation: ComputationId,
    pub items: Vec<ExecutionItem>,
}

impl TryFrom<PlanFile> for Plan {
    type Error = TrackdagError;

    fn try_from(file: PlanFile) -> std::result::Result<Self, Self::Error> {
        let session = SessionId::new(&file.session)?;
        let computation = ComputationId::new(&file.computation)?;

        let lift = |local: &str| -> Result<GlobalPath> {
            Ok(GlobalPath::new(
                session.clone(),
                computation.clone(),
                Path::parse(local)?,
            ))
        };

        let mut items = Vec::with_capacity(file.item.len());
        for item in &file.item {
            let deps = item.deps.iter().map(|d| lift(d.as_str())).collect::<Result<Vec<_>>>()?;
            let logical = item
                .logical_deps
                .iter()
                .map(|d| lift(d.as_str()))
                .collect::<Result<Vec<_>>>()?;
            items.push(
                ExecutionItem::new(lift(item.path.as_str())?, item.locality)
                    .with_deps(deps)
                    .with_logical_deps(logical),
            );
        }

        Ok(Self {
            session,
            computation,
            items,
        })
    }
}
