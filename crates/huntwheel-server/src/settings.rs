use std::path::Path;

use serde::{Deserialize, Serialize};

use huntwheel_core::session::{Mode, Session};

/// Bumped whenever the persisted shape changes; mismatched files are
/// discarded rather than migrated.
const SETTINGS_VERSION: u32 = 1;

/// Preferences persisted across restarts. Assignment results are
/// deliberately not persisted, only selections and toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    /// None means "all catalog weapons active".
    pub active_weapon_names: Option<Vec<String>>,
    pub last_mode: Mode,
    pub allow_duplicate: bool,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            active_weapon_names: None,
            last_mode: Mode::Single,
            allow_duplicate: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    version: u32,
    data: PersistedSettings,
}

impl PersistedSettings {
    /// Capture the persistable slice of a session.
    pub fn capture(session: &Session) -> Self {
        let all_active = session.active_weapon_names().len() == session.weapons().len();
        Self {
            active_weapon_names: if all_active {
                None
            } else {
                Some(session.active_weapon_names().to_vec())
            },
            last_mode: session.mode(),
            allow_duplicate: session.allow_duplicate(),
        }
    }

    /// Apply loaded preferences onto a fresh session.
    pub fn apply(&self, session: &mut Session) {
        if let Some(names) = &self.active_weapon_names {
            session.set_active_weapons(names);
        }
        session.set_mode(self.last_mode);
        session.set_allow_duplicate(self.allow_duplicate);
    }
}

/// Load settings from `path`. Missing file, unreadable JSON, or a version
/// mismatch all fall back to None; preferences are never worth failing
/// startup over.
pub fn load(path: &Path) -> Option<PersistedSettings> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SettingsFile>(&content) {
        Ok(file) if file.version == SETTINGS_VERSION => Some(file.data),
        Ok(file) => {
            tracing::info!(
                found = file.version,
                expected = SETTINGS_VERSION,
                "settings version mismatch, using defaults"
            );
            None
        },
        Err(e) => {
            tracing::warn!("failed to parse settings file: {e}");
            None
        },
    }
}

/// Persist settings atomically (write to a sibling temp file, then rename).
pub fn save(path: &Path, settings: &PersistedSettings) -> std::io::Result<()> {
    let file = SettingsFile {
        version: SETTINGS_VERSION,
        data: settings.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huntwheel-{}-{name}", std::process::id()))
    }

    #[test]
    fn save_load_roundtrip() {
        let path = temp_path("roundtrip.json");
        let settings = PersistedSettings {
            active_weapon_names: Some(vec!["大剑".to_string(), "弓".to_string()]),
            last_mode: Mode::Multiplayer,
            allow_duplicate: false,
        };
        save(&path, &settings).unwrap();
        assert_eq!(load(&path), Some(settings));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_yields_none() {
        assert_eq!(load(&temp_path("does-not-exist.json")), None);
    }

    #[test]
    fn version_mismatch_yields_none() {
        let path = temp_path("stale.json");
        std::fs::write(
            &path,
            r#"{"version": 0, "data": {"allow_duplicate": false}}"#,
        )
        .unwrap();
        assert_eq!(load(&path), None);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn garbage_yields_none() {
        let path = temp_path("garbage.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert_eq!(load(&path), None);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn capture_and_apply_roundtrip() {
        let mut session = Session::new();
        session.set_allow_duplicate(false);
        session.set_mode(Mode::Multiplayer);
        session.set_active_weapons(&["太刀".to_string(), "大锤".to_string()]);

        let captured = PersistedSettings::capture(&session);
        let mut fresh = Session::new();
        captured.apply(&mut fresh);

        assert!(!fresh.allow_duplicate());
        assert_eq!(fresh.mode(), Mode::Multiplayer);
        assert_eq!(fresh.active_weapon_names().len(), 2);
    }

    #[test]
    fn full_pool_captures_as_none() {
        let session = Session::new();
        let captured = PersistedSettings::capture(&session);
        assert_eq!(captured.active_weapon_names, None);
    }
}
