use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::history::types::History;

const USED_FILE: &str = "used.json";
const RECENT_FILE: &str = "recent.json";
const TOPICS_FILE: &str = "recent-topics.json";
const ITEMS_FILE: &str = "recent-items.json";
const OPENERS_FILE: &str = "recent-openers.json";
const OPENER_TYPES_FILE: &str = "recent-opener-types.json";
const LENGTH_BANDS_FILE: &str = "recent-length-bands.json";
const CONNECTORS_FILE: &str = "recent-connectors.json";
const FAMILIES_FILE: &str = "recent-template-families.json";
const SYNONYM_FILE: &str = "last-synonym-key.json";
const TONE_FILE: &str = "last-tone.json";

/// Every file a `FileHistoryStore` owns.
pub const HISTORY_FILES: [&str; 11] = [
    USED_FILE,
    RECENT_FILE,
    TOPICS_FILE,
    ITEMS_FILE,
    OPENERS_FILE,
    OPENER_TYPES_FILE,
    LENGTH_BANDS_FILE,
    CONNECTORS_FILE,
    FAMILIES_FILE,
    SYNONYM_FILE,
    TONE_FILE,
];

/// Durable home of the picker's history.
pub trait HistoryStore {
    fn load(&self) -> Result<History, StoreError>;
    fn save(&mut self, history: &History) -> Result<(), StoreError>;

    /// Loads what can be read. Stores that fail as a whole return the default
    /// history along with the one error.
    fn load_lenient(&self) -> (History, Vec<StoreError>) {
        match self.load() {
            Ok(history) => (history, Vec::new()),
            Err(e) => (History::default(), vec![e]),
        }
    }
}

/// Holds history in memory only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHistoryStore {
    history: History,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: History) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Result<History, StoreError> {
        Ok(self.history.clone())
    }

    fn save(&mut self, history: &History) -> Result<(), StoreError> {
        self.history = history.clone();
        Ok(())
    }
}

/// One pretty-printed JSON document per store inside `dir`.
///
/// A missing file loads as empty. `load_lenient` treats each unreadable file
/// as empty on its own, leaving the others intact. Each save replaces every file through a
/// temp file and rename. There is no locking: two processes sharing a
/// directory need an external lock.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    dir: PathBuf,
}

impl FileHistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Serialization {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, file: &str, failures: &mut Vec<StoreError>) -> T {
        self.read(file).unwrap_or_else(|e| {
            failures.push(e);
            T::default()
        })
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialization {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let temp = self.dir.join(format!(".{file}.{}.tmp", Uuid::new_v4()));
        let io_error = |source: std::io::Error| StoreError::Io { path: path.display().to_string(), source };
        fs::write(&temp, json).map_err(io_error)?;
        if let Err(source) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(io_error(source));
        }
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<History, StoreError> {
        let used: Vec<String> = self.read(USED_FILE)?;
        Ok(History {
            used: used.into_iter().collect(),
            recent: self.read(RECENT_FILE)?,
            recent_topics: self.read(TOPICS_FILE)?,
            recent_items: self.read(ITEMS_FILE)?,
            recent_openers: self.read(OPENERS_FILE)?,
            recent_opener_types: self.read(OPENER_TYPES_FILE)?,
            recent_length_bands: self.read(LENGTH_BANDS_FILE)?,
            recent_connectors: self.read(CONNECTORS_FILE)?,
            recent_template_families: self.read(FAMILIES_FILE)?,
            last_synonym_key: self.read(SYNONYM_FILE)?,
            last_tone: self.read(TONE_FILE)?,
        })
    }

    fn load_lenient(&self) -> (History, Vec<StoreError>) {
        let mut failures = Vec::new();
        let used: Vec<String> = self.read_or_default(USED_FILE, &mut failures);
        let history = History {
            used: used.into_iter().collect(),
            recent: self.read_or_default(RECENT_FILE, &mut failures),
            recent_topics: self.read_or_default(TOPICS_FILE, &mut failures),
            recent_items: self.read_or_default(ITEMS_FILE, &mut failures),
            recent_openers: self.read_or_default(OPENERS_FILE, &mut failures),
            recent_opener_types: self.read_or_default(OPENER_TYPES_FILE, &mut failures),
            recent_length_bands: self.read_or_default(LENGTH_BANDS_FILE, &mut failures),
            recent_connectors: self.read_or_default(CONNECTORS_FILE, &mut failures),
            recent_template_families: self.read_or_default(FAMILIES_FILE, &mut failures),
            last_synonym_key: self.read_or_default(SYNONYM_FILE, &mut failures),
            last_tone: self.read_or_default(TONE_FILE, &mut failures),
        };
        (history, failures)
    }

    fn save(&mut self, history: &History) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        let used: Vec<&String> = history.used.iter().collect();
        self.write(USED_FILE, &used)?;
        self.write(RECENT_FILE, &history.recent)?;
        self.write(TOPICS_FILE, &history.recent_topics)?;
        self.write(ITEMS_FILE, &history.recent_items)?;
        self.write(OPENERS_FILE, &history.recent_openers)?;
        self.write(OPENER_TYPES_FILE, &history.recent_opener_types)?;
        self.write(LENGTH_BANDS_FILE, &history.recent_length_bands)?;
        self.write(CONNECTORS_FILE, &history.recent_connectors)?;
        self.write(FAMILIES_FILE, &history.recent_template_families)?;
        self.write(SYNONYM_FILE, &history.last_synonym_key)?;
        self.write(TONE_FILE, &history.last_tone)?;
        Ok(())
    }
}

