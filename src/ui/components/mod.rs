//! Reusable UI Components
//!
//! Shared building blocks for the login screen, the vault forms, and the
//! editor dialog.
//!
//! ## Components
//!
//! - `InputField` - Text input with focus handling and password masking
//! - `DialogFrame` - Centered dialog overlay with rounded borders

mod dialog_frame;
mod input_field;

pub use dialog_frame::render_dialog_frame;
pub use input_field::{render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT};
