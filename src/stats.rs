use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Persistent usage statistics. Session history stays in memory; only
/// these running totals survive a restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_summaries: u64,
    #[serde(default)]
    pub total_words: u64,
}

impl Stats {
    /// Directory: ~/.local/share/transcript-insight/
    fn dir() -> PathBuf {
        let mut p = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("transcript-insight");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("stats.json")
    }

    /// Load from disk, returning defaults if missing.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = Self::dir();
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(), data)?;
        Ok(())
    }

    /// Record one completed summary and the words it covered.
    pub fn record_summary(&mut self, words: u64) {
        self.total_summaries += 1;
        self.total_words += words;
    }
}
