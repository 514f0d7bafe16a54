//! Numeric stepper adapter shared by typed and clicked edits.

use crate::field::{FieldKind, FieldState, FieldValue};

/// Direction of a stepper button interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Increment,
    Decrement,
}

/// A numeric spinner over a single reconciled field.
///
/// Typed digits and increment/decrement clicks are routed through the same
/// field commit path, so both share validation, clamping and formatting.
/// The default range is 0 to 100 with a step of 1, starting at 100.
pub struct ColorSteppers {
    field: FieldState,
    value: f32,
    min: f32,
    max: f32,
    step: f32,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl ColorSteppers {
    /// Create a stepper with a bare numeric display.
    pub fn new() -> Self {
        Self::with_kind(FieldKind::Number)
    }

    /// Create a stepper whose display carries a trailing `%`, used for the
    /// alpha field.
    pub fn percent() -> Self {
        Self::with_kind(FieldKind::Alpha)
    }

    fn with_kind(kind: FieldKind) -> Self {
        let mut steppers = Self {
            field: FieldState::new(kind),
            value: 100.0,
            min: 0.0,
            max: 100.0,
            step: 1.0,
            on_change: None,
        };
        let formatted = steppers.formatted(100.0);
        steppers.field.set_external(formatted);
        steppers
    }

    /// Set the inclusive range, clamping the current value into it.
    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self.set_value(self.value);
        self
    }

    /// Set the increment applied per stepper click.
    pub fn step_size(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set the starting value.
    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    /// Register the change callback fired once per committed edit.
    pub fn on_change(mut self, on_change: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Current committed value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The text the field currently displays.
    #[inline]
    pub fn text(&self) -> &str {
        self.field.text()
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.field.is_editing()
    }

    /// Accept a new external value, subject to editing precedence.
    pub fn set_value(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.value = value.clamp(self.min, self.max);
        let formatted = self.formatted(self.value);
        self.field.set_external(formatted);
    }

    /// Route typed text through the field; commits and emits when it
    /// parses.
    pub fn input(&mut self, raw: &str) -> Option<f32> {
        let value = match self.field.input(raw)? {
            FieldValue::Number(number) => number.clamp(self.min, self.max),
            FieldValue::Hex { .. } => return None,
        };
        // A range narrower than the field's own domain can tighten the
        // committed value; the echo must show what was actually committed.
        let formatted = self.formatted(value);
        self.field.set_external(formatted);
        self.value = value;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
        Some(value)
    }

    /// Apply a stepper button click through the typed-entry commit path.
    pub fn step(&mut self, action: StepAction) -> Option<f32> {
        let next = match action {
            StepAction::Increment => (self.value + self.step).min(self.max),
            StepAction::Decrement => (self.value - self.step).max(self.min),
        };
        let raw = format!("{}", next.round() as i64);
        self.input(&raw)
    }

    pub fn increment(&mut self) -> Option<f32> {
        self.step(StepAction::Increment)
    }

    pub fn decrement(&mut self) -> Option<f32> {
        self.step(StepAction::Decrement)
    }

    /// Resolve a dangling edit when the field loses focus.
    pub fn blur(&mut self) {
        let fallback = self.formatted(self.value);
        self.field.blur(fallback);
    }

    fn formatted(&self, value: f32) -> String {
        self.field.kind().format(&FieldValue::Number(value))
    }
}

impl Default for ColorSteppers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_typed_entry_commits_once() {
        let changes = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(0.0));
        let mut steppers = ColorSteppers::new().on_change({
            let changes = changes.clone();
            let seen = seen.clone();
            move |value| {
                changes.set(changes.get() + 1);
                seen.set(value);
            }
        });

        assert_eq!(steppers.input("1"), Some(1.0));
        assert_eq!(steppers.text(), "1");
        assert_eq!(changes.get(), 1);
        assert_eq!(seen.get(), 1.0);
    }

    #[test]
    fn test_invalid_entry_is_echoed_without_commit() {
        let changes = Rc::new(Cell::new(0));
        let mut steppers = ColorSteppers::new().on_change({
            let changes = changes.clone();
            move |_| changes.set(changes.get() + 1)
        });

        assert_eq!(steppers.input("abc"), None);
        assert_eq!(steppers.text(), "abc");
        assert_eq!(changes.get(), 0);
        assert_eq!(steppers.value(), 100.0);
    }

    #[test]
    fn test_percent_variant_appends_suffix() {
        let mut steppers = ColorSteppers::percent();
        assert_eq!(steppers.text(), "100%");
        assert_eq!(steppers.input("1"), Some(1.0));
        assert_eq!(steppers.text(), "1%");
    }

    #[test]
    fn test_clicks_share_the_commit_path() {
        let mut steppers = ColorSteppers::new().with_value(50.0);
        assert_eq!(steppers.step(StepAction::Increment), Some(51.0));
        assert_eq!(steppers.text(), "51");
        assert_eq!(steppers.decrement(), Some(50.0));
        assert_eq!(steppers.value(), 50.0);
    }

    #[test]
    fn test_steps_clamp_at_the_range_edges() {
        let mut steppers = ColorSteppers::new().with_value(100.0);
        assert_eq!(steppers.increment(), Some(100.0));

        let mut steppers = ColorSteppers::new().with_value(0.0);
        assert_eq!(steppers.decrement(), Some(0.0));
    }

    #[test]
    fn test_typed_overflow_clamps() {
        let mut steppers = ColorSteppers::new();
        assert_eq!(steppers.input("300"), Some(100.0));
        assert_eq!(steppers.text(), "100");

        let mut narrow = ColorSteppers::new().range(0.0, 50.0);
        assert_eq!(narrow.input("80"), Some(50.0));
        assert_eq!(narrow.text(), "50");
    }

    #[test]
    fn test_external_value_respects_editing() {
        let mut steppers = ColorSteppers::new();
        assert_eq!(steppers.input("9x"), None);

        steppers.set_value(30.0);
        assert_eq!(steppers.text(), "9x");
        assert_eq!(steppers.value(), 30.0);

        steppers.blur();
        assert_eq!(steppers.text(), "30");
    }
}
