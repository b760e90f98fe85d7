use crate::config::Palette;

/// Caller-assigned importance of an element. Drives bar length and color.
pub type Weight = u8;

pub const GLYPH: char = '\u{2588}';

/// A `%c`-template plus the style it consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementVisualization {
    pub visual: String,
    pub style: String,
}

/// One `%c ` column per element, each with its own background style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadVisualization {
    pub visual: String,
    pub styles: Vec<String>,
}

/// A bar of `weight + 1` glyphs colored by weight.
pub fn element_glyph(palette: &Palette, weight: Weight) -> ElementVisualization {
    let mut visual = String::from("%c");
    visual.extend(std::iter::repeat_n(GLYPH, usize::from(weight) + 1));
    ElementVisualization {
        visual,
        style: format!("color: {}", palette.color_for(weight)),
    }
}

pub fn head_glyphs(palette: &Palette, weights: &[Weight]) -> HeadVisualization {
    HeadVisualization {
        visual: "%c ".repeat(weights.len()),
        styles: weights
            .iter()
            .map(|w| {
                format!(
                    "background-color: {}; padding: 5px; margin: 0 -1px;",
                    palette.color_for(*w)
                )
            })
            .collect(),
    }
}
