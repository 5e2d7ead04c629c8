use std::str::FromStr;
use serde::Deserialize;

/// What to do when an update would move a path out of a terminal state.
///
/// - `Overwrite`: apply every update as given; ordering across asynchronous
///   reports is the caller's problem (default).
/// - `KeepTerminal`: once a path is `Done` or `Failed`, ignore updates that
///   would replace it with `Scheduled` or `Running`. Terminal-to-terminal
///   updates are still applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    #[default]
    Overwrite,
    KeepTerminal,
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(UpdatePolicy::Overwrite),
            "keep_terminal" | "keep-terminal" => Ok(UpdatePolicy::KeepTerminal),
            other => Err(format!(
                "invalid update_policy: {other} (expected \"overwrite\" or \"keep_terminal\")"
            )),
        }
    }
}
