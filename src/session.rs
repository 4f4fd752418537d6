/*
Skytread
*/
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cross-level run state: which level the player is on and the score they
/// carried into it. Read once at spawn, written back when a victory point is
/// crossed, so a quit-and-relaunch resumes the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Resource, PartialEq, Eq)]
pub struct SessionData {
    pub current_level: u32,
    pub current_score: i32,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            current_level: 0,
            current_score: 0,
        }
    }
}

impl SessionData {
    fn config_path() -> Option<PathBuf> {
        #[cfg(debug_assertions)]
        {
            // Debug builds: save in project directory
            let mut p = std::env::current_dir().ok()?;
            p.push("session.ron");
            Some(p)
        }
        #[cfg(not(debug_assertions))]
        {
            // Release builds: save in the platform config dir
            dirs::config_dir().and_then(|mut p| {
                p.push("Skytread");
                std::fs::create_dir_all(&p).ok()?;
                p.push("session.ron");
                Some(p)
            })
        }
    }

    /// Missing or unreadable file just means a fresh run.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|contents| ron::from_str(&contents).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Ok(contents) = ron::ser::to_string_pretty(self, Default::default()) {
                if std::fs::write(path, contents).is_err() {
                    warn!("Session: could not write session file");
                }
            }
        }
    }

    /// Called when a victory point is crossed: bank the score the player is
    /// carrying and move on to the next level.
    pub fn advance(&mut self, score: i32) {
        self.current_level += 1;
        self.current_score = score;
    }

    /// Start the whole run over (new game from the main menu).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Writes the session back to disk whenever something mutates it. The
/// startup insertion of the loaded value does not count as a change.
pub fn save_session(session: Res<SessionData>) {
    if session.is_changed() && !session.is_added() {
        session.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_banks_score_and_bumps_level() {
        let mut s = SessionData::default();
        s.advance(250);
        assert_eq!(s.current_level, 1);
        assert_eq!(s.current_score, 250);

        s.advance(410);
        assert_eq!(s.current_level, 2);
        assert_eq!(s.current_score, 410);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut s = SessionData {
            current_level: 3,
            current_score: 990,
        };
        s.reset();
        assert_eq!(s, SessionData::default());
    }

    #[test]
    fn session_round_trips_through_ron() {
        let s = SessionData {
            current_level: 2,
            current_score: 130,
        };
        let text = ron::ser::to_string_pretty(&s, Default::default()).unwrap();
        let back: SessionData = ron::from_str(&text).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn corrupt_file_contents_fall_back_to_defaults() {
        let parsed: SessionData = ron::from_str("not actually ron {").unwrap_or_default();
        assert_eq!(parsed, SessionData::default());
    }
}
