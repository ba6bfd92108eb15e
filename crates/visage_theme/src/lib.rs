//! Visage Theme System
//!
//! Translates a loosely-typed customization document into a strongly-typed
//! [`NativeTheme`].
//!
//! # Overview
//!
//! - **Schema**: a static table of `(group, field) -> semantic type -> theme attribute`
//! - **Documents**: caller-supplied `group -> field -> raw value` mappings
//! - **Translator**: one generic coercion engine driven by the schema
//!
//! Translation never fails. Every field is independently optional: a value
//! that is absent, unknown or uncoercible leaves the theme attribute at its
//! prior value. Invalid colors are skipped, never replaced by a sentinel.
//!
//! # Quick Start
//!
//! ```rust
//! use visage_paint::Color;
//! use visage_theme::{ConfigurationDocument, Translator};
//!
//! let doc = ConfigurationDocument::from_json_str(
//!     r##"{"faceTecFrameCustomization": {"borderWidth": 4, "borderColor": "#FF0000"}}"##,
//! )
//! .unwrap();
//!
//! let theme = Translator::standard().translate(&doc);
//! assert_eq!(theme.frame.border_width, 4);
//! assert_eq!(theme.frame.border_color, Color::new(255, 0, 0, 255));
//! ```

pub mod coerce;
pub mod document;
pub mod error;
pub mod groups;
pub mod schema;
pub mod theme;
pub mod translator;

pub use document::ConfigurationDocument;
pub use error::{CoercionError, Result, ThemeError};
pub use groups::{
    ButtonStyle, CancelButtonCustomization, CancelButtonLocation, ExitAnimation,
    ExitAnimationCustomization, FeedbackCustomization, FrameCustomization, GuidanceCustomization,
    IdScanCustomization, OcrConfirmationCustomization, OvalCustomization, OverlayCustomization,
    ResultScreenCustomization, SessionTimerCustomization, VocalGuidanceMode,
};
pub use schema::{CustomizationSchema, FieldSpec, SemanticType};
pub use theme::NativeTheme;
pub use translator::{translate, translate_onto, TranslationReport, Translator};

// Re-export paint types used by theme records
pub use visage_paint::{Color, Gradient, GradientStop, Point};
