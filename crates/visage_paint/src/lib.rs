//! Visage Paint
//!
//! Leaf crate holding the visual value types the native theme is built from.
//!
//! # Features
//!
//! - RGBA colors with 8-bit channels
//! - Strict `#RRGGBB` / `#RRGGBBAA` parsing
//! - Linear gradient descriptions in normalized surface coordinates

pub mod color;
pub mod gradient;
pub mod point;

pub use color::{Color, ColorParseError};
pub use gradient::{Gradient, GradientStop};
pub use point::Point;
