use crate::visualize::Weight;
use serde::Deserialize;
use std::fmt;

/// Spectral, from most saturated (heaviest weight) to least.
const DEFAULT_COLORS: [&str; 11] = [
    "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4",
    "#66c2a5", "#3288bd", "#5e4fa2",
];

pub const DEFAULT_LOGGING_PREFIX: &str = "headorder: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteError {
    pub len: usize,
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "palette needs at least {} colors, got {}",
            Palette::MIN_COLORS,
            self.len
        )
    }
}

impl std::error::Error for PaletteError {}

/// Colors indexed by weight. Heavier weights read from the front of the list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub const MIN_COLORS: usize = 10;

    pub fn new(colors: Vec<String>) -> Result<Self, PaletteError> {
        if colors.len() < Self::MIN_COLORS {
            return Err(PaletteError { len: colors.len() });
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Largest weight with a color of its own.
    pub fn max_weight(&self) -> Weight {
        Weight::try_from(self.colors.len() - 1).unwrap_or(Weight::MAX)
    }

    /// Color for `weight`: index `len - 1 - weight`, with the weight clamped to the palette.
    pub fn color_for(&self, weight: Weight) -> &str {
        let last = self.colors.len() - 1;
        let weight = usize::from(weight).min(last);
        &self.colors[last - weight]
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Caller-facing options. Loading them is up to the host; `Deserialize` is provided so any
/// serde format works, with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    logging_prefix: String,
    palette: Palette,
    prefers_dynamic_assessment: bool,
    validation_enabled: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            logging_prefix: DEFAULT_LOGGING_PREFIX.to_string(),
            palette: Palette::default(),
            prefers_dynamic_assessment: false,
            validation_enabled: true,
        }
    }
}

impl InspectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logging_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.logging_prefix = prefix.into();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_dynamic_assessment(mut self, prefers_dynamic: bool) -> Self {
        self.prefers_dynamic_assessment = prefers_dynamic;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validation_enabled = enabled;
        self
    }

    pub fn logging_prefix(&self) -> &str {
        &self.logging_prefix
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Assess the live head as-is instead of fetching the server-rendered one.
    pub fn prefers_dynamic_assessment(&self) -> bool {
        self.prefers_dynamic_assessment
    }

    pub fn is_validation_enabled(&self) -> bool {
        self.validation_enabled
    }
}
