use crate::color::{Channel, ColorValue};
use crate::field::{FieldKind, FieldState, FieldValue};

const CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// A three-field RGB input.
///
/// Each channel field commits independently; a committed edit merges into
/// the authoritative color through [`ColorValue::with_channel`] and fires
/// the change callback once. Sibling fields refresh from the merged color,
/// subject to editing precedence.
pub struct RgbInput {
    value: ColorValue,
    fields: [FieldState; 3],
    on_change: Option<Box<dyn FnMut(&ColorValue)>>,
}

impl RgbInput {
    /// Create an uncontrolled input starting from the default opaque red.
    pub fn new() -> Self {
        Self::with_value(ColorValue::default())
    }

    /// Create an input displaying `value`.
    pub fn with_value(value: ColorValue) -> Self {
        let mut input = Self {
            value,
            fields: CHANNELS.map(|channel| FieldState::new(FieldKind::Channel(channel))),
            on_change: None,
        };
        input.refresh_fields(None);
        input
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

    /// The text one channel field currently displays.
    pub fn text(&self, channel: Channel) -> &str {
        match Self::position(channel) {
            Some(ix) => self.fields[ix].text(),
            None => "",
        }
    }

    /// Accept a new external value, subject to editing precedence.
    pub fn set_value(&mut self, value: ColorValue) {
        self.value = value;
        self.refresh_fields(None);
    }

    /// Record typed text for one channel; commits merge into the color and
    /// emit once. Channels outside the RGB space are ignored.
    pub fn input(&mut self, channel: Channel, raw: &str) -> Option<ColorValue> {
        let ix = Self::position(channel)?;
        let FieldValue::Number(number) = self.fields[ix].input(raw)? else {
            return None;
        };
        let next = self.value.with_channel(channel, number);
        self.value = next.clone();
        self.refresh_fields(Some(ix));
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.value);
        }
        Some(next)
    }

    /// Resolve a dangling edit when a channel field loses focus.
    pub fn blur(&mut self, channel: Channel) {
        let Some(ix) = Self::position(channel) else {
            return;
        };
        let fallback = self.formatted(channel);
        self.fields[ix].blur(fallback);
    }

    fn position(channel: Channel) -> Option<usize> {
        CHANNELS.iter().position(|c| *c == channel)
    }

    /// Channel value in display units, read from the authoritative color.
    fn channel_value(&self, channel: Channel) -> f32 {
        let rgb = self.value.to_rgb();
        match channel {
            Channel::Red => rgb.r as f32,
            Channel::Green => rgb.g as f32,
            Channel::Blue => rgb.b as f32,
            _ => 0.0,
        }
    }

    fn formatted(&self, channel: Channel) -> String {
        FieldKind::Channel(channel).format(&FieldValue::Number(self.channel_value(channel)))
    }

    /// Push formatted text into every field except `skip`, the field that
    /// just committed and already holds its canonical echo.
    fn refresh_fields(&mut self, skip: Option<usize>) {
        for (ix, channel) in CHANNELS.iter().enumerate() {
            if Some(ix) == skip {
                continue;
            }
            let formatted = self.formatted(*channel);
            self.fields[ix].set_external(formatted);
        }
    }
}

impl Default for RgbInput {
    fn default() -> Self {
        Self::new()
    }
}
