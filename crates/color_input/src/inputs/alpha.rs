use crate::color::ColorValue;
use crate::steppers::{ColorSteppers, StepAction};

/// A single-field alpha input backed by the percent stepper.
///
/// Typed entry and stepper clicks both commit through the stepper's shared
/// field path; a committed percentage merges into the color through
/// [`ColorValue::with_alpha`] and fires the change callback once.
pub struct AlphaInput {
    value: ColorValue,
    steppers: ColorSteppers,
    on_change: Option<Box<dyn FnMut(&ColorValue)>>,
}

impl AlphaInput {
    /// Create an uncontrolled input starting from the default opaque red.
    pub fn new() -> Self {
        Self::with_value(ColorValue::default())
    }

    /// Create an input displaying `value`'s alpha.
    pub fn with_value(value: ColorValue) -> Self {
        let mut steppers = ColorSteppers::percent();
        steppers.set_value(value.alpha_percent() as f32);
        Self {
            value,
            steppers,
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
        self.steppers.text()
    }

    /// Accept a new external value, subject to editing precedence.
    pub fn set_value(&mut self, value: ColorValue) {
        self.steppers.set_value(value.alpha_percent() as f32);
        self.value = value;
    }

    /// Record typed text; commits and emits when it parses.
    pub fn input(&mut self, raw: &str) -> Option<ColorValue> {
        let percent = self.steppers.input(raw)?;
        Some(self.commit(percent))
    }

    /// Apply a stepper click; shares the typed-entry commit path.
    pub fn step(&mut self, action: StepAction) -> Option<ColorValue> {
        let percent = self.steppers.step(action)?;
        Some(self.commit(percent))
    }

    /// Resolve a dangling edit when the field loses focus.
    pub fn blur(&mut self) {
        self.steppers.blur();
    }

    fn commit(&mut self, percent: f32) -> ColorValue {
        let next = self.value.with_alpha(percent.round() as u8);
        self.value = next.clone();
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.value);
        }
        next
    }
}

impl Default for AlphaInput {
    fn default() -> Self {
        Self::new()
    }
}
