//! Palette, difficulty, and cube preferences.
//!
//! Preferences are stored as YAML. The built-in defaults are always loaded
//! first and a user file is layered on top, so a user file only needs to list
//! the values it changes.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use eyre::{Context, OptionExt, bail, ensure};
use indexmap::IndexMap;
use matchcube_core::{Cube, GameParams, NamedColor, Palette, Rgb};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

mod schema;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Built-in preferences.
    pub static ref DEFAULT_PREFS: Preferences = serde_norway::from_str::<schema::AnyVersion>(
        DEFAULT_PREFS_STR
    )
    .expect("error loading default preferences")
    .into_current();
}

/// How many palette colors are in play.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Fewest colors; matches are common.
    Easy,
    /// Default difficulty.
    #[default]
    Normal,
    /// More colors.
    Hard,
    /// Every color in the palette.
    Expert,
}

/// Number of palette colors in play at each difficulty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct DifficultyColors {
    pub easy: usize,
    pub normal: usize,
    pub hard: usize,
    pub expert: usize,
}
impl DifficultyColors {
    /// Returns the number of colors for a difficulty.
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }
}

/// User preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Side length of the cube.
    pub cube_size: usize,
    /// Spacing between neighboring blocks in world space.
    pub gap: f64,
    /// Points awarded per matched line.
    pub match_reward: u64,
    /// How long a renderer should highlight a match before resolving it.
    pub resolve_delay_ms: u64,

    /// Active difficulty.
    pub difficulty: Difficulty,
    /// Number of colors in play at each difficulty.
    pub difficulties: DifficultyColors,

    /// Name of the active palette.
    pub palette: String,
    /// Available palettes, by name.
    pub palettes: IndexMap<String, Vec<NamedColor>>,
    /// Display color for unpainted faces.
    pub unset_color: Rgb,

    /// RNG seed. If `None`, each game is different.
    pub seed: Option<u64>,
}
impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}
impl Preferences {
    /// Loads preferences from a YAML file, layered over the defaults. If no
    /// path is given or loading fails, the default preferences are returned.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            Self::default()
        })
    }

    /// Loads preferences from a YAML file, layered over the defaults.
    pub fn try_load(path: &Path) -> eyre::Result<Self> {
        let user_yaml = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("error reading {}", path.display()))?;
        Self::from_user_yaml(&user_yaml)
            .wrap_err_with(|| format!("error loading {}", path.display()))
    }

    /// Parses preferences from a YAML string, layered over the defaults.
    pub fn from_user_yaml(user_yaml: &str) -> eyre::Result<Self> {
        let prefs = config::Config::builder()
            .set_default("version", schema::CURRENT_VERSION)?
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT))
            .add_source(config::File::from_str(user_yaml, PREFS_FILE_FORMAT))
            .build()?
            .try_deserialize::<schema::AnyVersion>()?
            .into_current();
        prefs.validate()?;
        Ok(prefs)
    }

    /// Returns an error if the preferences cannot produce a playable game.
    pub fn validate(&self) -> eyre::Result<()> {
        let size = self.cube_size;
        ensure!(
            (Cube::MIN_SIZE..=Cube::MAX_SIZE).contains(&size),
            "cube size {size} is out of range (must be between {} and {})",
            Cube::MIN_SIZE,
            Cube::MAX_SIZE,
        );
        ensure!(
            self.gap.is_finite() && self.gap >= 0.0,
            "gap {} must be a nonnegative number",
            self.gap,
        );
        let palette = self.palette()?;
        for difficulty in Difficulty::iter() {
            if self.difficulties.get(difficulty) == 0 {
                bail!("difficulty {difficulty} has no colors");
            }
        }
        if palette.is_empty() {
            bail!("palette {:?} has no colors", palette.name);
        }
        Ok(())
    }

    /// Returns the active palette.
    pub fn palette(&self) -> eyre::Result<Palette> {
        let colors = self
            .palettes
            .get(&self.palette)
            .ok_or_eyre(format!("no palette named {:?}", self.palette))?;
        Ok(Palette {
            name: self.palette.clone(),
            colors: colors.clone(),
            unset: self.unset_color,
        })
    }

    /// Returns the number of colors in play, clamped to the size of the
    /// active palette.
    pub fn color_count(&self) -> eyre::Result<usize> {
        let palette = self.palette()?;
        let requested = self.difficulties.get(self.difficulty);
        if requested > palette.len() {
            log::warn!(
                "difficulty {} wants {requested} colors but palette {:?} only has {}",
                self.difficulty,
                palette.name,
                palette.len(),
            );
        }
        let count = requested.min(palette.len());
        ensure!(count > 0, "no colors in play");
        Ok(count)
    }

    /// Returns parameters for a new game.
    pub fn game_params(&self) -> eyre::Result<GameParams> {
        let active_colors = self.palette()?.active_colors(self.color_count()?);
        Ok(GameParams {
            size: self.cube_size,
            gap: self.gap,
            match_reward: self.match_reward,
            active_colors,
            seed: self.seed,
        })
    }

    /// Serializes the preferences as YAML.
    pub fn to_yaml(&self) -> eyre::Result<String> {
        Ok(serde_norway::to_string(&schema::AnyVersion::from(
            self.clone(),
        ))?)
    }

    /// Writes the preferences to a YAML file.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        let file = std::fs::File::create(path)
            .wrap_err_with(|| format!("error creating {}", path.display()))?;
        serde_norway::to_writer(file, &schema::AnyVersion::from(self.clone()))?;
        log::debug!("saved preferences to {}", path.display());
        Ok(())
    }
}
