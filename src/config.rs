//! Game configuration: board size, shapes and scoring mode.

use derive_getters::Getters;
use derive_more::{Display, Error};
use fillshape_core::{Board, GameEngine, ShapeTemplate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// A shape as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Top-left to bottom-right diagonal.
    Diagonal {
        /// Cells in the line.
        length: usize,
    },
    /// Bottom-left to top-right diagonal.
    AntiDiagonal {
        /// Cells in the line.
        length: usize,
    },
    /// Horizontal line.
    Horizontal {
        /// Cells in the line.
        length: usize,
    },
    /// Vertical line.
    Vertical {
        /// Cells in the line.
        length: usize,
    },
    /// Filled square block.
    Square {
        /// Side length.
        length: usize,
    },
    /// Explicit mask, one string per row: `#` (or `x`) active, `.` inactive.
    Custom {
        /// Mask rows.
        mask: Vec<String>,
    },
}

impl ShapeSpec {
    /// Converts this shape into a template.
    #[instrument]
    pub fn to_template(&self) -> Result<ShapeTemplate, ConfigError> {
        let template = match self {
            ShapeSpec::Diagonal { length } => ShapeTemplate::diagonal(*length),
            ShapeSpec::AntiDiagonal { length } => ShapeTemplate::anti_diagonal(*length),
            ShapeSpec::Horizontal { length } => ShapeTemplate::horizontal(*length),
            ShapeSpec::Vertical { length } => ShapeTemplate::vertical(*length),
            ShapeSpec::Square { length } => ShapeTemplate::square(*length),
            ShapeSpec::Custom { mask } => {
                let rows = mask
                    .iter()
                    .map(|row| parse_mask_row(row))
                    .collect::<Result<Vec<_>, _>>()?;
                if rows.windows(2).any(|w| w[0].len() != w[1].len()) {
                    return Err(ConfigError::new(format!(
                        "Custom mask rows differ in length: {:?}",
                        mask
                    )));
                }
                ShapeTemplate::from_rows(&rows)
            }
        };

        if template.is_degenerate() {
            return Err(ConfigError::new(format!("Shape {:?} has no active cells", self)));
        }
        Ok(template)
    }
}

fn parse_mask_row(row: &str) -> Result<Vec<bool>, ConfigError> {
    row.chars()
        .map(|ch| match ch {
            '#' | 'x' | 'X' => Ok(true),
            '.' => Ok(false),
            other => Err(ConfigError::new(format!(
                "Invalid mask character {:?} in {:?}",
                other, row
            ))),
        })
        .collect()
}

/// Complete description of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct GameConfig {
    /// Board rows.
    rows: usize,

    /// Board columns.
    columns: usize,

    /// Completing a pattern loses instead of wins.
    #[serde(default)]
    misere: bool,

    /// Winning patterns, in end-condition creation order.
    shapes: Vec<ShapeSpec>,
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading game config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            rows = config.rows,
            columns = config.columns,
            shapes = config.shapes.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Returns a copy with the scoring mode replaced.
    pub fn with_misere(mut self, misere: bool) -> Self {
        self.misere = misere;
        self
    }

    /// Checks dimensions and shapes.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::new(format!(
                "Board dimensions must be positive, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::new("At least one shape is required".to_string()));
        }
        self.templates().map(|_| ())
    }

    /// Converts every configured shape into a template.
    pub fn templates(&self) -> Result<Vec<ShapeTemplate>, ConfigError> {
        self.shapes.iter().map(ShapeSpec::to_template).collect()
    }

    /// Builds a fresh engine for this configuration.
    #[instrument(
        skip(self),
        fields(rows = self.rows, columns = self.columns, misere = self.misere)
    )]
    pub fn build_engine(&self) -> Result<GameEngine, ConfigError> {
        self.validate()?;
        let board = Board::try_new(self.rows, self.columns)
            .map_err(|e| ConfigError::new(e.to_string()))?;
        Ok(GameEngine::new(board, self.templates()?, self.misere))
    }
}

/// Built-in game variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Variant {
    /// 3×3 board, three in a row.
    #[strum(serialize = "ttt")]
    TicTacToe,
    /// 4×4 board, four in a row or any 2×2 block.
    #[strum(serialize = "ttt_4")]
    TicTacToe4,
}

impl Variant {
    /// Configuration for this variant, with normal scoring.
    #[instrument]
    pub fn config(self) -> GameConfig {
        match self {
            Variant::TicTacToe => GameConfig::new(3, 3, false, lines(3)),
            Variant::TicTacToe4 => {
                let mut shapes = lines(4);
                shapes.push(ShapeSpec::Square { length: 2 });
                GameConfig::new(4, 4, false, shapes)
            }
        }
    }
}

fn lines(length: usize) -> Vec<ShapeSpec> {
    vec![
        ShapeSpec::Diagonal { length },
        ShapeSpec::AntiDiagonal { length },
        ShapeSpec::Horizontal { length },
        ShapeSpec::Vertical { length },
    ]
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
