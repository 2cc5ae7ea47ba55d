//! Session payload store
//!
//! Listening-session payloads are written verbatim as pretty-printed JSON,
//! one file per submission, named after the submission time and user.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Characters of the user id kept in the file name
const USER_ID_PREFIX_LEN: usize = 8;

/// Writes session payloads into a results directory
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `payload` and return the file name it was written to
    pub fn save(&self, payload: &Value) -> Result<String> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let filename = session_filename(&timestamp, payload);

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create results directory: {:?}", self.dir))?;

        let json = serde_json::to_string_pretty(payload)
            .context("Failed to serialize session payload")?;
        let path = self.dir.join(&filename);
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write session file: {:?}", path))?;

        log::info!("SessionStore::save: Saved session to {:?}", path);
        Ok(filename)
    }
}

/// `session_<timestamp>_<first 8 chars of userId>.json`
fn session_filename(timestamp: &str, payload: &Value) -> String {
    let user: String = match payload.get("userId") {
        Some(Value::String(s)) => s.chars().take(USER_ID_PREFIX_LEN).collect(),
        Some(Value::Number(n)) => n.to_string().chars().take(USER_ID_PREFIX_LEN).collect(),
        _ => String::from("unknown"),
    };
    let user: String = user
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let user = if user.is_empty() { String::from("unknown") } else { user };

    format!("session_{}_{}.json", timestamp, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filename_uses_user_prefix() {
        let payload = json!({"userId": "abcdef123456", "ratings": []});
        assert_eq!(
            session_filename("20240101_120000", &payload),
            "session_20240101_120000_abcdef12.json"
        );
    }

    #[test]
    fn test_filename_without_user() {
        assert_eq!(
            session_filename("20240101_120000", &json!({})),
            "session_20240101_120000_unknown.json"
        );
        assert_eq!(
            session_filename("20240101_120000", &json!({"userId": ""})),
            "session_20240101_120000_unknown.json"
        );
    }

    #[test]
    fn test_filename_sanitizes_path_characters() {
        let payload = json!({"userId": "../etc/x"});
        assert_eq!(
            session_filename("20240101_120000", &payload),
            "session_20240101_120000____etc_x.json"
        );
    }

    #[test]
    fn test_save_writes_payload_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("results"));
        let payload = json!({"userId": "u1", "answers": {"A": "暗い", "score": 4}});

        let filename = store.save(&payload).unwrap();
        assert!(filename.starts_with("session_"));
        assert!(filename.ends_with("_u1.json"));

        let written = std::fs::read_to_string(store.dir().join(&filename)).unwrap();
        assert!(written.contains("暗い"));
        assert!(written.contains('\n'));
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, payload);
    }
}
