//! Named level presets and arena defaults.
//! Loaded from TOML at runtime for the CLI and the arena binary.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::games::hex_flip::types::GameSettings;

pub const CUSTOM_RADIUS_RANGE: (u32, u32) = (2, 8);
pub const CUSTOM_PIECES_RANGE: (usize, usize) = (3, 15);

/// A named board size / piece count pair.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LevelPreset {
    pub description: Option<String>,
    pub radius: u32,
    pub pieces: usize,
}

impl LevelPreset {
    pub fn settings(&self) -> GameSettings {
        GameSettings::new(self.radius, self.pieces)
    }
}

/// Defaults for the arena binary; every field can be overridden on the CLI.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ArenaDefaults {
    #[serde(default = "default_games")]
    pub games: usize,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_games() -> usize {
    100
}

fn default_max_steps() -> usize {
    500
}

fn default_strategy() -> String {
    "hint".into()
}

impl Default for ArenaDefaults {
    fn default() -> Self {
        Self {
            games: default_games(),
            max_steps: default_max_steps(),
            strategy: default_strategy(),
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone)]
pub struct PresetsFile {
    #[serde(default = "builtin_presets")]
    pub presets: HashMap<String, LevelPreset>,
    #[serde(default)]
    pub arena: ArenaDefaults,
}

impl Default for PresetsFile {
    fn default() -> Self {
        Self {
            presets: builtin_presets(),
            arena: ArenaDefaults::default(),
        }
    }
}

impl PresetsFile {
    /// Case-insensitive preset lookup.
    pub fn get(&self, name: &str) -> Option<&LevelPreset> {
        self.presets
            .get(name)
            .or_else(|| self.presets.get(&name.to_lowercase()))
    }

    /// Preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// The five standard difficulties.
pub fn builtin_presets() -> HashMap<String, LevelPreset> {
    [
        ("easy", 3, 4, "A small board with a handful of pieces"),
        ("medium", 3, 6, "More pieces on the same board"),
        ("hard", 3, 8, "A crowded small board"),
        ("extreme", 4, 10, "A larger board with ten pieces"),
        ("impossible", 4, 14, "Deep stacks on a larger board"),
    ]
    .into_iter()
    .map(|(name, radius, pieces, description)| {
        (
            name.to_string(),
            LevelPreset {
                description: Some(description.to_string()),
                radius,
                pieces,
            },
        )
    })
    .collect()
}

/// Check a custom radius / piece count the way the difficulty menu does.
pub fn validate_custom(radius: i64, pieces: i64) -> Result<GameSettings, String> {
    let mut errors = Vec::new();

    let (min_r, max_r) = CUSTOM_RADIUS_RANGE;
    if radius < min_r as i64 {
        errors.push(format!("Radius must be at least {min_r}"));
    } else if radius > max_r as i64 {
        errors.push(format!("Radius must be at most {max_r}"));
    }

    let (min_p, max_p) = CUSTOM_PIECES_RANGE;
    if pieces < min_p as i64 {
        errors.push(format!("Pieces must be at least {min_p}"));
    } else if pieces > max_p as i64 {
        errors.push(format!("Pieces must be at most {max_p}"));
    }

    if errors.is_empty() {
        Ok(GameSettings::new(radius as u32, pieces as usize))
    } else {
        Err(errors.join(". "))
    }
}

/// Load presets from a TOML file at the given path.
pub fn load_presets(path: &Path) -> Result<PresetsFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load presets from well-known paths, returning the built-ins if none found.
pub fn load_default_presets() -> PresetsFile {
    let candidates = [
        "hex_flip.toml",
        "../hex_flip.toml",
        "/etc/hex-flip/hex_flip.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_presets(p) {
                Ok(presets) => {
                    tracing::info!(path = %p.display(), count = presets.presets.len(), "loaded level presets");
                    return presets;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load level presets");
                }
            }
        }
    }
    tracing::info!("no hex_flip.toml found, using built-in presets");
    PresetsFile::default()
}
