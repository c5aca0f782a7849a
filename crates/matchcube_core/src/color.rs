//! Face colors and palettes.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color of a block face, as a slot in the active [`Palette`].
///
/// [`Color::UNSET`] is a sentinel that is distinct from every palette color.
/// Faces that have never been painted hold it, and it never counts toward a
/// match.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Color(u8);
impl Color {
    /// Sentinel for a face that has not been painted.
    pub const UNSET: Color = Color(0);

    /// Returns the color for the `i`th entry of a palette, or `None` if `i` is
    /// too large to represent.
    pub fn from_palette_index(i: usize) -> Option<Color> {
        u8::try_from(i + 1).ok().map(Color)
    }

    /// Returns the palette entry index, or `None` for [`Color::UNSET`].
    pub fn palette_index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// Returns whether this is [`Color::UNSET`].
    pub fn is_unset(self) -> bool {
        self == Color::UNSET
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.palette_index() {
            Some(i) => write!(f, "color #{i}"),
            None => write!(f, "unset"),
        }
    }
}

/// 8-bit RGB color, written as `#rrggbb`.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}
impl Rgb {
    /// Constructs an RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the components scaled to the range `0.0..=1.0`, as expected by
    /// most renderers.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| c as f32 / 255.0)
    }
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}
impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ParseRgbError::MissingHash)?;
        match hex::decode(digits)?.as_slice() {
            &[r, g, b] => Ok(Rgb { r, g, b }),
            _ => Err(ParseRgbError::WrongLength),
        }
    }
}
impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Error produced when parsing an [`Rgb`] hex code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRgbError {
    /// Missing `#` prefix
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid hex digits
    #[error("{0}")]
    Hex(#[from] hex::FromHexError),
    /// Wrong number of hex digits
    #[error("color must have exactly 6 hex digits")]
    WrongLength,
}

/// Color in a palette.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    /// Human-friendly name, such as `"purple"`.
    pub name: String,
    /// Display color.
    pub rgb: Rgb,
}
impl NamedColor {
    /// Constructs a named color.
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        let name = name.into();
        Self { name, rgb }
    }
}

/// Named, ordered set of colors. Only a prefix of the palette is in play at a
/// time; its length is selected by the difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Palette name.
    pub name: String,
    /// Colors, in order.
    pub colors: Vec<NamedColor>,
    /// Display color for [`Color::UNSET`].
    pub unset: Rgb,
}
impl Default for Palette {
    fn default() -> Self {
        Self::neon()
    }
}
impl Palette {
    /// Display color for unpainted faces.
    pub const DEFAULT_UNSET_RGB: Rgb = Rgb::new(30, 39, 46);

    /// Name used for [`Color::UNSET`].
    pub const UNSET_NAME: &'static str = "unset";

    /// Built-in palette of bright colors.
    pub fn neon() -> Self {
        Self {
            name: "neon".to_owned(),
            colors: vec![
                NamedColor::new("purple", Rgb::new(113, 34, 250)),
                NamedColor::new("cyan", Rgb::new(71, 242, 255)),
                NamedColor::new("magenta", Rgb::new(254, 160, 254)),
                NamedColor::new("white", Rgb::new(250, 250, 255)),
                NamedColor::new("yellow", Rgb::new(253, 242, 0)),
                NamedColor::new("orange", Rgb::new(255, 139, 139)),
            ],
            unset: Self::DEFAULT_UNSET_RGB,
        }
    }

    /// Built-in palette of the classic cube colors.
    pub fn classic() -> Self {
        Self {
            name: "classic".to_owned(),
            colors: vec![
                NamedColor::new("red", Rgb::new(232, 65, 24)),
                NamedColor::new("orange", Rgb::new(253, 150, 68)),
                NamedColor::new("yellow", Rgb::new(251, 197, 49)),
                NamedColor::new("green", Rgb::new(76, 209, 55)),
                NamedColor::new("blue", Rgb::new(0, 168, 255)),
                NamedColor::new("white", Rgb::new(245, 246, 250)),
            ],
            unset: Self::DEFAULT_UNSET_RGB,
        }
    }

    /// Returns the number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }
    /// Returns whether the palette has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the first `count` colors of the palette (or all of them, if
    /// there are fewer).
    pub fn active_colors(&self, count: usize) -> Vec<Color> {
        (0..count.min(self.len()))
            .map_while(Color::from_palette_index)
            .collect()
    }

    /// Returns the color with the given name.
    pub fn color_by_name(&self, name: &str) -> Option<Color> {
        let i = self.colors.iter().position(|c| c.name == name)?;
        Color::from_palette_index(i)
    }

    /// Returns the name of a color. Colors outside the palette are reported as
    /// [`Palette::UNSET_NAME`].
    pub fn color_name(&self, color: Color) -> &str {
        self.entry(color)
            .map_or(Self::UNSET_NAME, |c| c.name.as_str())
    }

    /// Returns the display color of a color.
    pub fn rgb(&self, color: Color) -> Rgb {
        self.entry(color).map_or(self.unset, |c| c.rgb)
    }

    /// Returns a comma-separated list of color names.
    pub fn describe(&self, colors: &[Color]) -> String {
        colors.iter().map(|&c| self.color_name(c)).join(", ")
    }

    fn entry(&self, color: Color) -> Option<&NamedColor> {
        self.colors.get(color.palette_index()?)
    }
}
