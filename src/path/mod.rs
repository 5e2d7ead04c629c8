// src/path/mod.rs

//! Addressing of nodes inside submitted computations.
//!
//! - [`SessionId`] / [`ComputationId`] are opaque identifiers handed out by
//!   the surrounding service.
//! - [`Path`] is the computation-local address of an item.
//! - [`GlobalPath`] combines all three into the external address
//!   `//{session}/{computation}/{seg1}/{seg2}/...`.
//!
//! Identifiers and segments are non-empty and never contain `/`, which is
//! what makes the canonical form parse back to exactly the same value.

pub mod global;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackdagError};

pub use global::GlobalPath;

/// Separator between segments (and between the parts of a global path).
pub const SEPARATOR: char = '/';

fn check_component(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TrackdagError::InvalidPath(format!("{kind} must not be empty")));
    }
    if value.contains(SEPARATOR) {
        return Err(TrackdagError::InvalidPath(format!(
            "{kind} '{value}' must not contain '{SEPARATOR}'"
        )));
    }
    Ok(())
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(value: impl AsRef<str>) -> Result<Self> {
                let value = value.as_ref();
                check_component($kind, value)?;
                Ok(Self(Arc::from(value)))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = TrackdagError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TrackdagError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

opaque_id!(
    /// Identifies a client session.
    SessionId,
    "session id"
);

opaque_id!(
    /// Identifies a computation submitted within a session.
    ComputationId,
    "computation id"
);

/// Computation-local address of an item: an ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
    segments: Arc<[String]>,
}

impl Path {
    /// Build a path from explicit segments.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        for segment in &segments {
            check_component("path segment", segment)?;
        }
        Ok(Self {
            segments: segments.into(),
        })
    }

    /// Split a slash-delimited string into segments.
    ///
    /// The empty string is the empty path.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::new(s.split(SEPARATOR))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        check_component("path segment", &segment)?;
        let mut segments = self.segments.to_vec();
        segments.push(segment);
        Ok(Self {
            segments: segments.into(),
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for Path {
    type Err = TrackdagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Path {
    type Error = TrackdagError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}
