//! Color theme constants for the KeyCuddle UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color - white for the banner
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for labels and hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for input areas
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Highlighted table row
pub const COLOR_SELECTED: Color = Color::Rgb(0, 122, 204);

/// Success notices
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

/// Error notices and failed writes
pub const COLOR_ERROR: Color = Color::Red;
