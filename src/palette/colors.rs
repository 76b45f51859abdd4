//! The fixed 13-colour hardware palette and web-safe colour arithmetic

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::io::configuration::WEB_SAFE_STEP;

/// Half-width of the red-minus-blue band treated as neutral
pub const NEUTRAL_BAND: i16 = 30;

/// 8-bit RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance `0.2126 R + 0.7152 G + 0.0722 B`, scaled to 0-100
    pub fn luminance(self) -> f64 {
        let weighted = 0.2126 * f64::from(self.r)
            + 0.7152 * f64::from(self.g)
            + 0.0722 * f64::from(self.b);
        weighted / 255.0 * 100.0
    }

    /// Luminance on a 0-1 scale
    pub fn unit_luminance(self) -> f64 {
        self.luminance() / 100.0
    }

    /// Warm, cool or neutral by the red-minus-blue heuristic
    pub fn temperature(self) -> Temperature {
        let difference = i16::from(self.r) - i16::from(self.b);
        if difference > NEUTRAL_BAND {
            Temperature::Warm
        } else if difference < -NEUTRAL_BAND {
            Temperature::Cool
        } else {
            Temperature::Neutral
        }
    }

    /// Snap every channel to the nearest web-safe level
    pub fn quantized(self) -> Self {
        Self::new(
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
        )
    }

    /// Move every channel `steps` web-safe levels towards white or black
    ///
    /// Channels are quantized first and clamped to the 0-255 range.
    pub fn shifted(self, steps: u8, lighter: bool) -> Self {
        let delta = i32::from(steps) * i32::from(WEB_SAFE_STEP);
        let shift = |channel: u8| {
            let base = i32::from(quantize_channel(channel));
            let moved = if lighter { base + delta } else { base - delta };
            u8::try_from(moved.clamp(0, 255)).unwrap_or(u8::MAX)
        };
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Whether every channel is one of {0, 51, 102, 153, 204, 255}
    pub const fn is_web_safe(self) -> bool {
        self.r % WEB_SAFE_STEP == 0 && self.g % WEB_SAFE_STEP == 0 && self.b % WEB_SAFE_STEP == 0
    }

    /// Channels as an array
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear blend towards `other` by `t` in [0, 1]
    pub fn blend(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn quantize_channel(channel: u8) -> u8 {
    let step = u16::from(WEB_SAFE_STEP);
    let level = (u16::from(channel) + step / 2) / step;
    u8::try_from(level * step).unwrap_or(u8::MAX)
}

/// Temperature family of a colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    /// Red dominates blue
    Warm,
    /// Blue dominates red
    Cool,
    /// Red and blue within the neutral band
    Neutral,
}

/// Value commitment of a palette entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueClass {
    /// Dark ground
    Dark,
    /// Light ground
    Light,
    /// Mid-value mark, never a ground
    Mid,
}

/// Entries of the 13-colour palette
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CgaColor {
    /// `#000000`
    Black,
    /// `#0000aa`
    Blue,
    /// `#aa0000`
    Red,
    /// `#aa00aa`
    Magenta,
    /// `#ffffff`
    White,
    /// `#ffff55`
    Yellow,
    /// `#55ffff`
    LightCyan,
    /// `#55ff55`
    LightGreen,
    /// `#00aaaa`
    Cyan,
    /// `#00aa00`
    Green,
    /// `#5555ff`
    LightBlue,
    /// `#ff5555`
    LightRed,
    /// `#ff55ff`
    LightMagenta,
}

impl CgaColor {
    /// Every entry in table order
    pub const ALL: [Self; 13] = [
        Self::Black,
        Self::Blue,
        Self::Red,
        Self::Magenta,
        Self::White,
        Self::Yellow,
        Self::LightCyan,
        Self::LightGreen,
        Self::Cyan,
        Self::Green,
        Self::LightBlue,
        Self::LightRed,
        Self::LightMagenta,
    ];

    /// Hues preferred for accents
    pub const HOT: [Self; 4] = [
        Self::Yellow,
        Self::LightCyan,
        Self::LightMagenta,
        Self::LightGreen,
    ];

    /// Channel values
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0, 0, 0),
            Self::Blue => Rgb::new(0, 0, 170),
            Self::Red => Rgb::new(170, 0, 0),
            Self::Magenta => Rgb::new(170, 0, 170),
            Self::White => Rgb::new(255, 255, 255),
            Self::Yellow => Rgb::new(255, 255, 85),
            Self::LightCyan => Rgb::new(85, 255, 255),
            Self::LightGreen => Rgb::new(85, 255, 85),
            Self::Cyan => Rgb::new(0, 170, 170),
            Self::Green => Rgb::new(0, 170, 0),
            Self::LightBlue => Rgb::new(85, 85, 255),
            Self::LightRed => Rgb::new(255, 85, 85),
            Self::LightMagenta => Rgb::new(255, 85, 255),
        }
    }

    /// Lower-case hyphenated name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Magenta => "magenta",
            Self::White => "white",
            Self::Yellow => "yellow",
            Self::LightCyan => "light-cyan",
            Self::LightGreen => "light-green",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::LightBlue => "light-blue",
            Self::LightRed => "light-red",
            Self::LightMagenta => "light-magenta",
        }
    }

    /// Dark and light entries may serve as grounds; mid entries only as marks
    pub const fn value_class(self) -> ValueClass {
        match self {
            Self::Black | Self::Blue | Self::Red | Self::Magenta => ValueClass::Dark,
            Self::White | Self::Yellow | Self::LightCyan | Self::LightGreen => ValueClass::Light,
            Self::Cyan | Self::Green | Self::LightBlue | Self::LightRed | Self::LightMagenta => {
                ValueClass::Mid
            }
        }
    }

    /// Relative luminance, 0-100
    pub fn luminance(self) -> f64 {
        self.rgb().luminance()
    }

    /// Temperature family
    pub fn temperature(self) -> Temperature {
        self.rgb().temperature()
    }

    /// Absolute luminance difference to another entry
    pub fn luminance_distance(self, other: Self) -> f64 {
        (self.luminance() - other.luminance()).abs()
    }

    /// Whether the entry is one of the preferred accent hues
    pub fn is_hot(self) -> bool {
        Self::HOT.contains(&self)
    }
}

impl fmt::Display for CgaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
