use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGB triple with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An HSB (hue, saturation, brightness) triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    /// Hue in degrees (0.0 to 360.0)
    pub h: f32,
    /// Saturation in percent (0.0 to 100.0)
    pub s: f32,
    /// Brightness in percent (0.0 to 100.0)
    pub b: f32,
}

/// One editable numeric component of a color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Brightness,
}

impl Channel {
    /// Upper bound of the channel in display units.
    pub fn max(&self) -> f32 {
        match self {
            Channel::Red | Channel::Green | Channel::Blue => 255.0,
            Channel::Hue => 360.0,
            Channel::Saturation | Channel::Brightness => 100.0,
        }
    }

    /// Suffix glyph appended to the channel's formatted text.
    ///
    /// Saturation and brightness are percentages. RGB channels are byte
    /// values and hue is in degrees, so they render bare. This is a fixed
    /// table per channel, not a general numeric-vs-percentage rule.
    pub fn suffix(&self) -> &'static str {
        match self {
            Channel::Saturation | Channel::Brightness => "%",
            _ => "",
        }
    }
}

/// A color as held by the picker inputs.
///
/// RGB and HSB are kept mutually consistent: the representation a
/// constructor received is stored exactly and the other is derived from
/// it. Values are immutable; edits go through [`ColorValue::with_channel`]
/// and [`ColorValue::with_alpha`], which return a new value, so a value
/// handed to a change callback can be retained freely.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorValue {
    hsb: Hsb,
    rgb: Rgb,
    /// Alpha as an integer percentage (0 to 100).
    alpha: u8,
    /// Cached lowercase `rrggbb` encoding of `rgb`, without alpha.
    hex: String,
}

impl ColorValue {
    /// Create a color from 8-bit RGB channels and an alpha percentage.
    ///
    /// Alpha clamps to 100; the RGB channels are stored exactly and HSB is
    /// derived.
    pub fn from_rgb(r: u8, g: u8, b: u8, alpha: u8) -> Self {
        let rgb = Rgb { r, g, b };
        Self {
            hsb: hsb_from_rgb(rgb),
            rgb,
            alpha: alpha.min(100),
            hex: hex_encode(rgb),
        }
    }

    /// Create a color from hue (degrees), saturation and brightness
    /// (percent) and an alpha percentage.
    ///
    /// Hue wraps modulo 360; saturation, brightness and alpha clamp. The
    /// HSB components are stored exactly and RGB is derived.
    pub fn from_hsb(h: f32, s: f32, b: f32, alpha: u8) -> Self {
        let hsb = Hsb {
            h: if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 },
            s: if s.is_finite() { s.clamp(0.0, 100.0) } else { 0.0 },
            b: if b.is_finite() { b.clamp(0.0, 100.0) } else { 0.0 },
        };
        let rgb = rgb_from_hsb(hsb);
        Self {
            hsb,
            rgb,
            alpha: alpha.min(100),
            hex: hex_encode(rgb),
        }
    }

    /// Parse a hex color, falling back to the default color on malformed
    /// input.
    ///
    /// Accepts 3, 6 or 8 hex digits with an optional leading `#`; an
    /// 8-digit string carries alpha, otherwise alpha is 100%. Use the
    /// [`TryFrom<&str>`] impl when the failure matters to the caller.
    pub fn from_hex(text: &str) -> Self {
        match Self::try_from(text) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!("invalid hex color {:?}: {}", text, err);
                Self::default()
            }
        }
    }

    /// The 6 lowercase hex digits encoding the RGB channels, without `#`
    /// and independent of alpha.
    pub fn to_hex_string(&self) -> String {
        self.hex.clone()
    }

    /// The HSB representation.
    pub fn to_hsb(&self) -> Hsb {
        self.hsb
    }

    /// The RGB representation.
    pub fn to_rgb(&self) -> Rgb {
        self.rgb
    }

    /// Alpha as an integer percentage (0 to 100).
    pub fn alpha_percent(&self) -> u8 {
        self.alpha
    }

    /// Return a new color with exactly one RGB or HSB channel replaced.
    ///
    /// `value` is in display units: bytes for RGB channels, degrees for
    /// hue, percent for saturation and brightness. Out-of-range values
    /// clamp to the channel's domain. The sibling channels of the edited
    /// color space are carried over untouched, so editing one field at a
    /// time never disturbs the others.
    pub fn with_channel(&self, channel: Channel, value: f32) -> Self {
        if !value.is_finite() {
            return self.clone();
        }
        let value = value.clamp(0.0, channel.max());
        let Rgb { r, g, b } = self.rgb;
        let Hsb { h, s, b: brightness } = self.hsb;
        match channel {
            Channel::Red => Self::from_rgb(value.round() as u8, g, b, self.alpha),
            Channel::Green => Self::from_rgb(r, value.round() as u8, b, self.alpha),
            Channel::Blue => Self::from_rgb(r, g, value.round() as u8, self.alpha),
            Channel::Hue => Self::from_hsb(value, s, brightness, self.alpha),
            Channel::Saturation => Self::from_hsb(h, value, brightness, self.alpha),
            Channel::Brightness => Self::from_hsb(h, s, value, self.alpha),
        }
    }

    /// Return a new color with the alpha percentage replaced; RGB and HSB
    /// are untouched.
    pub fn with_alpha(&self, percent: u8) -> Self {
        let mut next = self.clone();
        next.alpha = percent.min(100);
        next
    }

    /// CSS-style `rgb(r, g, b)` form, or `rgba(r, g, b, a%)` when not
    /// fully opaque.
    pub fn to_rgb_string(&self) -> String {
        let Rgb { r, g, b } = self.rgb;
        if self.alpha < 100 {
            format!("rgba({}, {}, {}, {}%)", r, g, b, self.alpha)
        } else {
            format!("rgb({}, {}, {})", r, g, b)
        }
    }

    /// `hsb(h, s%, b%)` form with components rounded to integers.
    pub fn to_hsb_string(&self) -> String {
        let Hsb { h, s, b } = self.hsb;
        format!(
            "hsb({}, {}%, {}%)",
            h.round() as i64,
            s.round() as i64,
            b.round() as i64
        )
    }
}

impl Default for ColorValue {
    /// Opaque red, the documented fallback for uncontrolled inputs and
    /// malformed hex strings.
    fn default() -> Self {
        Self::from_rgb(0xff, 0x00, 0x00, 100)
    }
}

impl std::fmt::Display for ColorValue {
    /// `#rrggbb`, extended to `#rrggbbaa` when not fully opaque.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.alpha < 100 {
            write!(f, "#{}{:02x}", self.hex, alpha_byte(self.alpha))
        } else {
            write!(f, "#{}", self.hex)
        }
    }
}

impl TryFrom<&str> for ColorValue {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let (rgb, alpha) = parse_hex(value)?;
        Ok(Self::from_rgb(rgb.r, rgb.g, rgb.b, alpha.unwrap_or(100)))
    }
}

impl Serialize for ColorValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::try_from(text.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Parse 3, 6 or 8 hex digits (optional leading `#`) into RGB plus the
/// alpha percentage encoded by an 8-digit string.
pub(crate) fn parse_hex(text: &str) -> anyhow::Result<(Rgb, Option<u8>)> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(anyhow!("empty hex color"));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("invalid hex digit in {:?}", text));
    }

    let channel = |range: std::ops::Range<usize>| -> anyhow::Result<u8> {
        u8::from_str_radix(&digits[range], 16).map_err(|_| anyhow!("invalid hex channel"))
    };
    match digits.len() {
        3 => {
            // Shorthand: each nibble doubles, `f50` == `ff5500`.
            let nibble = |ix: usize| -> anyhow::Result<u8> {
                Ok(u8::from_str_radix(&digits[ix..ix + 1], 16)
                    .map_err(|_| anyhow!("invalid hex channel"))?
                    * 17)
            };
            let rgb = Rgb {
                r: nibble(0)?,
                g: nibble(1)?,
                b: nibble(2)?,
            };
            Ok((rgb, None))
        }
        6 => {
            let rgb = Rgb {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
            };
            Ok((rgb, None))
        }
        8 => {
            let rgb = Rgb {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
            };
            let alpha = alpha_percent_from_byte(channel(6..8)?);
            Ok((rgb, Some(alpha)))
        }
        len => Err(anyhow!("expected 3, 6 or 8 hex digits, got {}", len)),
    }
}

fn hex_encode(rgb: Rgb) -> String {
    format!("{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

fn alpha_byte(percent: u8) -> u8 {
    (percent as f32 * 255.0 / 100.0).round() as u8
}

fn alpha_percent_from_byte(byte: u8) -> u8 {
    (byte as f32 * 100.0 / 255.0).round() as u8
}

/// Derive HSB (degrees/percent) from 8-bit RGB.
fn hsb_from_rgb(rgb: Rgb) -> Hsb {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };
    let v = max;

    let mut h = 0.0;
    if max != min {
        if max == r {
            h = (g - b) / d + (if g < b { 6.0 } else { 0.0 });
        } else if max == g {
            h = (b - r) / d + 2.0;
        } else {
            h = (r - g) / d + 4.0;
        }
        h *= 60.0;
    }

    Hsb {
        h,
        s: s * 100.0,
        b: v * 100.0,
    }
}

/// Derive 8-bit RGB from HSB (degrees/percent).
fn rgb_from_hsb(hsb: Hsb) -> Rgb {
    let h = hsb.h.rem_euclid(360.0) / 360.0;
    let s = hsb.s / 100.0;
    let v = hsb.b / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 / 6.0 {
        (c, x, 0.0)
    } else if h < 2.0 / 6.0 {
        (x, c, 0.0)
    } else if h < 3.0 / 6.0 {
        (0.0, c, x)
    } else if h < 4.0 / 6.0 {
        (0.0, x, c)
    } else if h < 5.0 / 6.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb {
        r: ((r + m) * 255.0).round() as u8,
        g: ((g + m) * 255.0).round() as u8,
        b: ((b + m) * 255.0).round() as u8,
    }
}
