//! Per-field reconciliation between user keystrokes and external values.

use crate::color::{Channel, Rgb, parse_hex};

/// Whether a field's visible text is reconciled with the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    /// The display reflects the last committed or external value.
    #[default]
    Synced,
    /// The user has typed since the last accepted value. The buffer may be
    /// invalid, and external updates must not replace it.
    Editing,
}

/// What a field parses and how it formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 3, 6 or 8 hex digits with an optional leading `#`.
    Hex,
    /// One RGB or HSB channel, in display units.
    Channel(Channel),
    /// Alpha percentage, rendered with a trailing `%`.
    Alpha,
    /// Bare stepper number in 0..=100.
    Number,
}

impl FieldKind {
    /// Suffix glyph that is part of the display text but not the value.
    pub fn suffix(&self) -> &'static str {
        match self {
            FieldKind::Channel(channel) => channel.suffix(),
            FieldKind::Alpha => "%",
            FieldKind::Hex | FieldKind::Number => "",
        }
    }

    fn parse(&self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldKind::Hex => {
                let (rgb, alpha) = parse_hex(raw).ok()?;
                Some(FieldValue::Hex { rgb, alpha })
            }
            FieldKind::Channel(channel) => parse_number(raw, channel.max()),
            FieldKind::Alpha | FieldKind::Number => parse_number(raw, 100.0),
        }
    }

    /// Canonical display text for a committed value.
    pub fn format(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Hex { rgb, .. } => {
                format!("{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
            }
            FieldValue::Number(number) => {
                format!("{}{}", number.round() as i64, self.suffix())
            }
        }
    }
}

/// A successfully parsed field edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// A parsed hex color; `alpha` is present only for 8-digit input.
    Hex { rgb: Rgb, alpha: Option<u8> },
    /// A rounded, clamped number in the field's display units.
    Number(f32),
}

fn parse_number(raw: &str, max: f32) -> Option<FieldValue> {
    let digits = raw.trim();
    let digits = digits.strip_suffix('%').unwrap_or(digits).trim_end();
    let number: f32 = digits.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    Some(FieldValue::Number(number.round().clamp(0.0, max)))
}

/// Reconciles one field's visible text with user keystrokes and external
/// value updates.
///
/// The buffer always echoes exactly what the user typed, valid or not. A
/// parseable edit is the single commit point: the value is clamped into
/// the field's domain and the buffer re-formatted canonically. External
/// values arriving mid-edit are buffered, never applied to the visible
/// text, so the display cannot change under the user's cursor.
#[derive(Debug)]
pub struct FieldState {
    kind: FieldKind,
    text: String,
    pending: Option<String>,
    phase: EditPhase,
}

impl FieldState {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            text: String::new(),
            pending: None,
            phase: EditPhase::Synced,
        }
    }

    /// The field kind this state was created with.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The text currently shown to the user.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.phase == EditPhase::Editing
    }

    /// Accept a formatted external value.
    ///
    /// Applied to the visible text immediately when synced; buffered while
    /// the user is editing so local keystrokes win until the field commits
    /// or blurs.
    pub fn set_external(&mut self, formatted: impl Into<String>) {
        let formatted = formatted.into();
        if self.is_editing() {
            self.pending = Some(formatted);
        } else {
            self.text = formatted;
        }
    }

    /// Record a keystroke's worth of raw text and try to commit it.
    ///
    /// The buffer takes `raw` verbatim regardless of validity. Returns the
    /// committed value when `raw` parses, after clamping and canonical
    /// re-formatting; otherwise returns `None` and stays in `Editing`.
    pub fn input(&mut self, raw: &str) -> Option<FieldValue> {
        self.text = raw.to_string();
        self.phase = EditPhase::Editing;

        let value = self.kind.parse(raw)?;
        self.text = self.kind.format(&value);
        self.phase = EditPhase::Synced;
        self.pending = None;
        Some(value)
    }

    /// Leave `Editing` without a commit.
    ///
    /// The display falls back to the external value buffered during the
    /// edit, or to `fallback` (the formatted form of the current committed
    /// value) when none arrived.
    pub fn blur(&mut self, fallback: impl Into<String>) {
        if !self.is_editing() {
            return;
        }
        self.phase = EditPhase::Synced;
        self.text = self.pending.take().unwrap_or_else(|| fallback.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_text_withholds_commit() {
        let mut field = FieldState::new(FieldKind::Hex);
        assert!(field.input("xyz").is_none());
        assert_eq!(field.text(), "xyz");
        assert!(field.is_editing());

        assert!(field.input("").is_none());
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_commit_reformats_canonically() {
        let mut field = FieldState::new(FieldKind::Alpha);
        let value = field.input("1");
        assert_eq!(value, Some(FieldValue::Number(1.0)));
        assert_eq!(field.text(), "1%");
        assert!(!field.is_editing());

        // A typed `%` is tolerated and normalized.
        assert!(field.input("78%").is_some());
        assert_eq!(field.text(), "78%");
    }

    #[test]
    fn test_suffix_table() {
        assert_eq!(FieldKind::Alpha.suffix(), "%");
        assert_eq!(FieldKind::Channel(Channel::Saturation).suffix(), "%");
        assert_eq!(FieldKind::Channel(Channel::Brightness).suffix(), "%");
        assert_eq!(FieldKind::Channel(Channel::Hue).suffix(), "");
        assert_eq!(FieldKind::Channel(Channel::Red).suffix(), "");
        assert_eq!(FieldKind::Hex.suffix(), "");
        assert_eq!(FieldKind::Number.suffix(), "");
    }

    #[test]
    fn test_out_of_range_clamps_at_commit() {
        let mut field = FieldState::new(FieldKind::Channel(Channel::Red));
        assert_eq!(field.input("300"), Some(FieldValue::Number(255.0)));
        assert_eq!(field.text(), "255");

        assert_eq!(field.input("-5"), Some(FieldValue::Number(0.0)));
        assert_eq!(field.text(), "0");

        let mut hue = FieldState::new(FieldKind::Channel(Channel::Hue));
        assert_eq!(hue.input("400"), Some(FieldValue::Number(360.0)));
        assert_eq!(hue.text(), "360");
    }

    #[test]
    fn test_hex_commit_normalizes() {
        let mut field = FieldState::new(FieldKind::Hex);
        let value = field.input("#FF5500");
        assert!(matches!(
            value,
            Some(FieldValue::Hex {
                rgb: Rgb {
                    r: 0xff,
                    g: 0x55,
                    b: 0x00
                },
                alpha: None
            })
        ));
        assert_eq!(field.text(), "ff5500");

        // Shorthand expands to the fixed digit count.
        field.input("abc");
        assert_eq!(field.text(), "aabbcc");

        // 8 digits carry alpha but echo the 6-digit form.
        let value = field.input("ff550080");
        assert!(matches!(
            value,
            Some(FieldValue::Hex {
                alpha: Some(50),
                ..
            })
        ));
        assert_eq!(field.text(), "ff5500");
    }

    #[test]
    fn test_external_value_applies_when_synced() {
        let mut field = FieldState::new(FieldKind::Hex);
        field.set_external("ff0000");
        assert_eq!(field.text(), "ff0000");
        field.set_external("00ff00");
        assert_eq!(field.text(), "00ff00");
    }

    #[test]
    fn test_editing_precedence_buffers_external() {
        let mut field = FieldState::new(FieldKind::Hex);
        field.set_external("ff0000");
        assert!(field.input("xy").is_none());

        field.set_external("00ff00");
        assert_eq!(field.text(), "xy");
        assert!(field.is_editing());

        // Blur resolves to the buffered external value.
        field.blur("ff0000");
        assert_eq!(field.text(), "00ff00");
        assert!(!field.is_editing());
    }

    #[test]
    fn test_blur_falls_back_to_committed_value() {
        let mut field = FieldState::new(FieldKind::Channel(Channel::Green));
        field.set_external("40");
        assert!(field.input("4x").is_none());

        field.blur("40");
        assert_eq!(field.text(), "40");
        assert!(!field.is_editing());

        // Blurring a synced field changes nothing.
        field.blur("99");
        assert_eq!(field.text(), "40");
    }

    #[test]
    fn test_commit_clears_buffered_external() {
        let mut field = FieldState::new(FieldKind::Channel(Channel::Blue));
        assert!(field.input("1x").is_none());
        field.set_external("7");

        // The commit wins over the stale external value.
        assert_eq!(field.input("12"), Some(FieldValue::Number(12.0)));
        assert_eq!(field.text(), "12");
        field.blur("12");
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn test_decimal_input_rounds() {
        let mut field = FieldState::new(FieldKind::Channel(Channel::Hue));
        assert_eq!(field.input("139.6"), Some(FieldValue::Number(140.0)));
        assert_eq!(field.text(), "140");
    }
}
