//! Color representation and input reconciliation for color picker widgets.
//!
//! The crate keeps one authoritative [`ColorValue`], convertible between
//! hex, RGB, HSB and alpha, and reconciles free-form keystrokes with
//! externally supplied values through a per-field state machine
//! ([`FieldState`]): invalid text is echoed untouched without committing,
//! local edits win over external updates until the field commits or blurs,
//! and every committed edit produces exactly one change notification.
//!
//! The composite inputs ([`HexInput`], [`RgbInput`], [`HsbInput`],
//! [`AlphaInput`]) wire those fields to the color value; [`ColorSteppers`]
//! adapts a numeric spinner so clicked and typed edits share one commit
//! path. Everything is headless and synchronous — drive the types with
//! method calls from whatever event loop hosts them.

mod color;
mod field;
mod inputs;
mod steppers;

pub use color::{Channel, ColorValue, Hsb, Rgb};
pub use field::{EditPhase, FieldKind, FieldState, FieldValue};
pub use inputs::{AlphaInput, HexInput, HsbInput, RgbInput};
pub use steppers::{ColorSteppers, StepAction};
