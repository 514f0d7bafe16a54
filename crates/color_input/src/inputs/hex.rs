use crate::color::ColorValue;
use crate::field::{FieldKind, FieldState, FieldValue};

/// A single-field hex color input.
///
/// Holds its own authoritative [`ColorValue`]; an external value, when
/// supplied through [`HexInput::set_value`], overrides it on each update,
/// so the input works controlled or uncontrolled.
pub struct HexInput {
    value: ColorValue,
    field: FieldState,
    on_change: Option<Box<dyn FnMut(&ColorValue)>>,
}

impl HexInput {
    /// Create an uncontrolled input starting from the default opaque red.
    pub fn new() -> Self {
        Self::with_value(ColorValue::default())
    }

    /// Create an input displaying `value`.
    pub fn with_value(value: ColorValue) -> Self {
        let mut field = FieldState::new(FieldKind::Hex);
        field.set_external(value.to_hex_string());
        Self {
            value,
            field,
            on_change: None,
        }
    }

    /// Register the change callback fired once per committed edit.
    pub fn on_change(mut self, on_change: impl FnMut(&ColorValue) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// The authoritative color.
    pub fn value(&self) -> &ColorValue {
        &self.value
    }

    /// The text the field currently displays.
    pub fn text(&self) -> &str {
        self.field.text()
    }

    /// Accept a new external value, subject to editing precedence.
    pub fn set_value(&mut self, value: ColorValue) {
        self.field.set_external(value.to_hex_string());
        self.value = value;
    }

    /// Record typed text; commits and emits when it parses as hex.
    ///
    /// A hex commit replaces the whole RGB; alpha comes from an 8-digit
    /// string, or else resets to fully opaque.
    pub fn input(&mut self, raw: &str) -> Option<ColorValue> {
        let FieldValue::Hex { rgb, alpha } = self.field.input(raw)? else {
            return None;
        };
        let next = ColorValue::from_rgb(rgb.r, rgb.g, rgb.b, alpha.unwrap_or(100));
        self.value = next.clone();
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.value);
        }
        Some(next)
    }

    /// Resolve a dangling edit when the field loses focus.
    pub fn blur(&mut self) {
        let fallback = self.value.to_hex_string();
        self.field.blur(fallback);
    }
}

impl Default for HexInput {
    fn default() -> Self {
        Self::new()
    }
}
