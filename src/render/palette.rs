use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Ten-color categorical palette.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// Eight-color pastel palette.
pub const ACCENT: [Color; 8] = [
    Color::from_rgb8(0x7f, 0xc9, 0x7f),
    Color::from_rgb8(0xbe, 0xae, 0xd4),
    Color::from_rgb8(0xfd, 0xc0, 0x86),
    Color::from_rgb8(0xff, 0xff, 0x99),
    Color::from_rgb8(0x38, 0x6c, 0xb0),
    Color::from_rgb8(0xf0, 0x02, 0x7f),
    Color::from_rgb8(0xbf, 0x5b, 0x17),
    Color::from_rgb8(0x66, 0x66, 0x66),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    #[default]
    Category10,
    Accent,
}

impl Palette {
    #[must_use]
    pub fn colors(self) -> &'static [Color] {
        match self {
            Self::Category10 => &CATEGORY10,
            Self::Accent => &ACCENT,
        }
    }

    /// Color at `index`, cycling through the palette.
    #[must_use]
    pub fn cyclic(self, index: usize) -> Color {
        let colors = self.colors();
        colors[index % colors.len()]
    }
}

/// Assigns palette colors to keys in first-seen order.
///
/// The same key always maps to the same color; the palette wraps once
/// more distinct keys than colors have been seen.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColorScale {
    palette: Palette,
    domain: IndexSet<String>,
}

impl OrdinalColorScale {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            domain: IndexSet::new(),
        }
    }

    pub fn color_for(&mut self, key: &str) -> Color {
        let index = match self.domain.get_index_of(key) {
            Some(index) => index,
            None => self.domain.insert_full(key.to_owned()).0,
        };
        self.palette.cyclic(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}
