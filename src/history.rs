//! Bounded, persisted history of saved calculations.
//!
//! The log is kept newest-first and never holds more than
//! [`HISTORY_CAPACITY`] entries. Every mutation rewrites the whole log to the
//! backing [`Storage`] before returning.

use chrono::{DateTime, Local};
use dirs_next as dirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::input::{CalculationInput, ValidationError};

pub const HISTORY_CAPACITY: usize = 10;

/// Label of the filter choice that passes every entry.
pub const FILTER_ALL: &str = "All";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("calculation rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("failed to write history: {0}")]
    Persist(#[from] io::Error),

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single durable slot holding the serialized history.
pub trait Storage {
    /// Current slot contents, `None` when nothing was stored yet.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the slot contents.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

/// JSON file slot, by default `rpe_history.json` in the user config directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    const FILE: &'static str = "rpe_history.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The config-directory slot, or the working directory when the platform
    /// has no config directory.
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .map(|p| p.join(Self::FILE))
            .unwrap_or_else(|| PathBuf::from(Self::FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write a sibling file first so a crash never leaves a truncated log.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)
    }
}

/// A saved calculation. Entries are never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: String,
    weight: f64,
    reps: u32,
    rpe: f64,
    one_rep_max: f64,
    date: String,
    /// Missing in logs written before lift categories existed.
    #[serde(default)]
    lift_type: String,
}

impl HistoryEntry {
    pub fn new(
        id: impl Into<String>,
        input: CalculationInput,
        one_rep_max: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            weight: input.weight,
            reps: input.reps,
            rpe: input.rpe,
            one_rep_max,
            date: date.into(),
            lift_type: input.lift_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn rpe(&self) -> f64 {
        self.rpe
    }

    pub fn one_rep_max(&self) -> f64 {
        self.one_rep_max
    }

    /// Raw stored timestamp, RFC 3339 for entries created by this version.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn lift_type(&self) -> &str {
        &self.lift_type
    }

    pub fn input(&self) -> CalculationInput {
        CalculationInput::new(self.weight, self.reps, self.rpe, self.lift_type.clone())
    }
}

/// Which lift categories a history view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LiftFilter {
    #[default]
    All,
    Lift(String),
}

impl LiftFilter {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        match self {
            LiftFilter::All => true,
            LiftFilter::Lift(lift) => entry.lift_type == *lift,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LiftFilter::All => FILTER_ALL,
            LiftFilter::Lift(lift) => lift,
        }
    }
}

impl From<&str> for LiftFilter {
    fn from(value: &str) -> Self {
        if value == FILTER_ALL {
            LiftFilter::All
        } else {
            LiftFilter::Lift(value.to_string())
        }
    }
}

impl From<String> for LiftFilter {
    fn from(value: String) -> Self {
        LiftFilter::from(value.as_str())
    }
}

impl From<LiftFilter> for String {
    fn from(value: LiftFilter) -> Self {
        value.as_str().to_string()
    }
}

/// Entries matching `filter`, in their original order.
pub fn filter_entries<'a>(
    entries: &'a [HistoryEntry],
    filter: &LiftFilter,
) -> Vec<&'a HistoryEntry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

pub fn serialize_history(entries: &[HistoryEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

pub fn parse_history(data: &str) -> Result<Vec<HistoryEntry>, serde_json::Error> {
    serde_json::from_str(data)
}

/// Strictly increasing millisecond ids.
///
/// Two saves inside the same millisecond get consecutive values instead of
/// the same timestamp.
#[derive(Debug, Clone, Default)]
pub struct EntryIdGenerator {
    last: i64,
}

impl EntryIdGenerator {
    /// Start above every numeric id in `ids`. Non-numeric ids are ignored.
    pub fn seeded<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let last = ids
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self, now: DateTime<Local>) -> String {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id.to_string()
    }
}

/// The history log bound to its durable slot.
#[derive(Debug)]
pub struct HistoryStore<S: Storage> {
    entries: Vec<HistoryEntry>,
    storage: S,
    ids: EntryIdGenerator,
}

impl<S: Storage> HistoryStore<S> {
    /// Read the log from `storage`.
    ///
    /// A missing slot, an I/O error or unparsable contents all yield an empty
    /// history. Logs longer than the capacity keep their newest entries.
    pub fn load(storage: S) -> Self {
        let mut entries = match storage.read() {
            Ok(Some(data)) => match parse_history(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring unreadable history: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read history: {e}");
                Vec::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);
        log::info!("Loaded {} history entries", entries.len());
        let ids = EntryIdGenerator::seeded(entries.iter().map(|e| e.id.as_str()));
        Self {
            entries,
            storage,
            ids,
        }
    }

    /// Entries newest-first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Build an entry with a fresh id. The entry is not stored yet.
    pub fn create_entry(
        &mut self,
        input: CalculationInput,
        one_rep_max: f64,
        saved_at: DateTime<Local>,
    ) -> HistoryEntry {
        let id = self.ids.next_id(saved_at);
        HistoryEntry::new(id, input, one_rep_max, saved_at.to_rfc3339())
    }

    /// Insert `entry` at the head, evicting the oldest entry past capacity.
    ///
    /// Invalid inputs and non-finite estimates are rejected without touching
    /// the log.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        entry.input().validate()?;
        if !entry.one_rep_max.is_finite() {
            log::warn!("Refusing to save non-finite estimate {}", entry.one_rep_max);
            return Err(ValidationError::NonFiniteEstimate(entry.one_rep_max).into());
        }
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Remove the entry with `id`. Returns whether an entry was removed.
    pub fn remove_by_id(&mut self, id: &str) -> Result<bool, HistoryError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        self.persist()?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.persist()
    }

    pub fn filter(&self, filter: &LiftFilter) -> Vec<&HistoryEntry> {
        filter_entries(&self.entries, filter)
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        let data = serialize_history(&self.entries)?;
        self.storage.write(&data).map_err(|e| {
            log::error!("Failed to persist history: {e}");
            HistoryError::Persist(e)
        })
    }
}
