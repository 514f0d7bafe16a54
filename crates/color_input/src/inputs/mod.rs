//! Composite color inputs: hex, RGB, HSB and alpha.
//!
//! Each composite owns one reconciled field per editable channel plus the
//! authoritative [`ColorValue`](crate::color::ColorValue). Fields commit
//! independently — a multi-field composite never requires all fields to be
//! valid at once — and every committed edit merges into the color and
//! fires the change callback exactly once.

mod alpha;
mod hex;
mod hsb;
mod rgb;

pub use alpha::AlphaInput;
pub use hex::HexInput;
pub use hsb::HsbInput;
pub use rgb::RgbInput;
