use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// Named strategies for choosing the root atom of a lipid fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RootPreset {
    /// First atom whose name contains "P" (phosphate head group).
    #[default]
    Phosphorus,
    /// First atom containing "N"; if none, the first containing "P".
    NitrogenFirst,
    /// First atom whose name contains "N" (choline/amine head group).
    Nitrogen,
    /// Always the first atom of the fragment.
    FirstAtom,
}

static ROOT_PRESETS: Map<&'static str, RootPreset> = phf_map! {
    "phosphorus" => RootPreset::Phosphorus,
    "p" => RootPreset::Phosphorus,
    "nitrogen-first" => RootPreset::NitrogenFirst,
    "nitrogen" => RootPreset::Nitrogen,
    "n" => RootPreset::Nitrogen,
    "first-atom" => RootPreset::FirstAtom,
    "first" => RootPreset::FirstAtom,
};

impl RootPreset {
    /// Marker substrings tried in priority order. An empty list means the first
    /// atom of the fragment is used.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            RootPreset::Phosphorus => &["P"],
            RootPreset::NitrogenFirst => &["N", "P"],
            RootPreset::Nitrogen => &["N"],
            RootPreset::FirstAtom => &[],
        }
    }

    pub fn marker_list(&self) -> Vec<String> {
        self.markers().iter().map(|m| m.to_string()).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            RootPreset::Phosphorus => "phosphorus",
            RootPreset::NitrogenFirst => "nitrogen-first",
            RootPreset::Nitrogen => "nitrogen",
            RootPreset::FirstAtom => "first-atom",
        }
    }
}

impl fmt::Display for RootPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RootPreset {
    type Err = ();

    /// Parses a preset name case-insensitively, accepting `_` in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        ROOT_PRESETS.get(key.as_str()).copied().ok_or(())
    }
}
