//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use combat_core::OpponentRef;
use directories::ProjectDirs;

/// Configuration required to run an encounter headlessly.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub content_dir: PathBuf,
    pub opponents: Vec<OpponentRef>,
    /// Names the log directory and, when set, the persistent save directory.
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            opponents: vec![OpponentRef::from("goblin")],
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DIR` - Directory with the RON/TOML content (default: bundled data)
    /// - `COMBAT_OPPONENTS` - Comma-separated roster keys (default: `goblin`)
    /// - `COMBAT_SESSION_ID` - Session identifier for logs and saves (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(list) = env::var("COMBAT_OPPONENTS") {
            let opponents = parse_opponents(&list);
            if !opponents.is_empty() {
                config.opponents = opponents;
            }
        }
        config.session_id = env::var("COMBAT_SESSION_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        config
    }

    /// Directory the knowledge store persists to, if this run has a session.
    pub fn save_dir(&self) -> Option<PathBuf> {
        let session_id = self.session_id.as_ref()?;
        let dirs = ProjectDirs::from("", "", "combat-sim")?;
        Some(dirs.data_dir().join(session_id))
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../combat/content/data")
}

/// Split a comma-separated opponent list, dropping blanks.
pub fn parse_opponents(list: &str) -> Vec<OpponentRef> {
    list.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(OpponentRef::from)
        .collect()
}
