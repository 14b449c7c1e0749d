use crate::core::utils::geometry::Direction;
use nalgebra::Vector3;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Result of looking up the target direction for one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetLookup {
    /// The fragment has its own entry.
    Explicit(Direction),
    /// No entry, but a uniform direction applies to every unlisted fragment.
    Uniform(Direction),
    /// Nothing applies; the caller substitutes its default.
    Missing,
}

/// Maps fragment identifiers to the direction each fragment should point along.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetTable {
    entries: HashMap<isize, Direction>,
    uniform: Option<Direction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetFile {
    uniform: Option<[f64; 3]>,
    #[serde(default, rename = "target")]
    targets: Vec<TargetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetEntry {
    fragment: isize,
    direction: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct CsvTargetRecord {
    fragment: isize,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Error)]
pub enum TargetLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unsupported target file '{path}'. Expected a .toml or .csv extension")]
    UnsupportedFormat { path: String },
    #[error("Fragment {fragment_id} has more than one target direction in '{path}'")]
    Duplicate { path: String, fragment_id: isize },
}

impl TargetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table whose only rule is a single direction for every fragment.
    pub fn uniform(direction: Direction) -> Self {
        Self {
            entries: HashMap::new(),
            uniform: Some(direction),
        }
    }

    pub fn with_uniform(mut self, direction: Direction) -> Self {
        self.uniform = Some(direction);
        self
    }

    /// Sets the direction of one fragment, returning the previous entry if any.
    pub fn insert(&mut self, fragment_id: isize, direction: Direction) -> Option<Direction> {
        self.entries.insert(fragment_id, direction)
    }

    /// Adds every entry of `other`, overwriting existing ones. A uniform direction
    /// in `other` replaces this table's uniform direction.
    pub fn merge(&mut self, other: TargetTable) {
        self.entries.extend(other.entries);
        if other.uniform.is_some() {
            self.uniform = other.uniform;
        }
    }

    pub fn lookup(&self, fragment_id: isize) -> TargetLookup {
        match (self.entries.get(&fragment_id), self.uniform) {
            (Some(direction), _) => TargetLookup::Explicit(*direction),
            (None, Some(direction)) => TargetLookup::Uniform(direction),
            (None, None) => TargetLookup::Missing,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.uniform.is_none()
    }

    /// Loads a table from a `.toml` or `.csv` file.
    ///
    /// TOML files list `[[target]]` tables with `fragment` and `direction` keys and may
    /// carry a top-level `uniform` direction. CSV files need a `fragment,x,y,z` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, has an unknown
    /// extension, or lists a fragment twice.
    pub fn load(path: &Path) -> Result<Self, TargetLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::load_toml(path),
            Some("csv") => Self::load_csv(path),
            _ => Err(TargetLoadError::UnsupportedFormat {
                path: path.to_string_lossy().to_string(),
            }),
        }
    }

    fn load_toml(path: &Path) -> Result<Self, TargetLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TargetLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: TargetFile = toml::from_str(&content).map_err(|e| TargetLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut table = Self::from_entries(
            path,
            file.targets
                .into_iter()
                .map(|t| (t.fragment, Vector3::from(t.direction))),
        )?;
        table.uniform = file.uniform.map(Vector3::from);
        Ok(table)
    }

    fn load_csv(path: &Path) -> Result<Self, TargetLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| TargetLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut records = Vec::new();
        for result in reader.deserialize::<CsvTargetRecord>() {
            let record = result.map_err(|e| TargetLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            records.push((record.fragment, Vector3::new(record.x, record.y, record.z)));
        }
        Self::from_entries(path, records)
    }

    fn from_entries(
        path: &Path,
        entries: impl IntoIterator<Item = (isize, Direction)>,
    ) -> Result<Self, TargetLoadError> {
        let mut table = Self::new();
        for (fragment_id, direction) in entries {
            if table.insert(fragment_id, direction).is_some() {
                return Err(TargetLoadError::Duplicate {
                    path: path.to_string_lossy().to_string(),
                    fragment_id,
                });
            }
        }
        Ok(table)
    }
}

impl FromIterator<(isize, Direction)> for TargetTable {
    fn from_iter<I: IntoIterator<Item = (isize, Direction)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            uniform: None,
        }
    }
}
