// src/path/global.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackdagError};
use crate::path::{ComputationId, Path, SEPARATOR, SessionId};

const PREFIX: &str = "//";

/// System-wide address of a node: `(session, computation, local path)`.
///
/// Rendered as `//{session}/{computation}/{seg1}/{seg2}/...`; an empty local
/// path renders as `//{session}/{computation}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobalPath {
    session: SessionId,
    computation: ComputationId,
    path: Path,
}

impl GlobalPath {
    pub fn new(session: SessionId, computation: ComputationId, path: Path) -> Self {
        Self {
            session,
            computation,
            path,
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn computation(&self) -> &ComputationId {
        &self.computation
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this address lives inside the given session/computation.
    pub fn belongs_to(&self, session: &SessionId, computation: &ComputationId) -> bool {
        &self.session == session && &self.computation == computation
    }

    /// Parse the canonical `//session/computation/...` form.
    pub fn parse(s: &str) -> Result<Self> {
        let rest = s.strip_prefix(PREFIX).ok_or_else(|| {
            TrackdagError::InvalidPath(format!("global path '{s}' must start with '{PREFIX}'"))
        })?;

        let mut parts = rest.splitn(3, SEPARATOR);
        let session = SessionId::new(parts.next().unwrap_or_default())?;
        let computation = match parts.next() {
            Some(c) => ComputationId::new(c)?,
            None => {
                return Err(TrackdagError::InvalidPath(format!(
                    "global path '{s}' has no computation id"
                )));
            }
        };
        let path = match parts.next() {
            // A trailing separator with nothing after it is an empty segment.
            Some(local) => Path::new(local.split(SEPARATOR))?,
            None => Path::default(),
        };

        Ok(Self::new(session, computation, path))
    }
}

impl fmt::Display for GlobalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}/{}", self.session, self.computation)?;
        for segment in self.path.segments() {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for GlobalPath {
    type Err = TrackdagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GlobalPath {
    type Error = TrackdagError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<GlobalPath> for String {
    fn from(path: GlobalPath) -> Self {
        path.to_string()
    }
}
