//! Game metadata side table (`games.json`)

use serde_json::Value;
use std::collections::HashMap;

/// Descriptive fields for one game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetadata {
    pub name: String,
    pub year: Option<u32>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
}

impl GameMetadata {
    /// Build from one `games.json` record
    ///
    /// Missing or mistyped fields fall back to empty, a year of 0 means unknown.
    fn from_record(record: &serde_json::Map<String, Value>) -> Self {
        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let year = record
            .get("Year")
            .and_then(lenient_int)
            .and_then(|y| u32::try_from(y).ok())
            .filter(|&y| y != 0);

        Self {
            name: text("Game").unwrap_or_default(),
            year,
            developer: text("Dev"),
            publisher: text("Publisher"),
        }
    }
}

/// Integer from a number or numeric string; fractions are truncated
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Metadata records keyed by lower-cased game name
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    games: HashMap<String, GameMetadata>,
}

impl MetadataTable {
    /// Parse a JSON array of `{Game, Year, Dev, Publisher}` records
    ///
    /// Enrichment is best effort: empty or malformed documents give an empty
    /// table and non-object entries are skipped. Later duplicates win.
    pub fn parse(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Metadata document is empty");
            return Self::default();
        }

        let records: Vec<Value> = match serde_json::from_slice(bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Ignoring malformed metadata document: {}", e);
                return Self::default();
            }
        };

        let mut games = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let Some(object) = record.as_object() else {
                tracing::debug!("Skipping metadata entry {}: not an object", idx);
                continue;
            };

            let metadata = GameMetadata::from_record(object);
            games.insert(metadata.name.to_lowercase(), metadata);
        }

        tracing::debug!("Loaded {} metadata records", games.len());
        Self { games }
    }

    /// Look up a record by display name, ignoring case
    pub fn get(&self, name: &str) -> Option<&GameMetadata> {
        self.games.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
