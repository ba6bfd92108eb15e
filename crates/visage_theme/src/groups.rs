//! Customization group records
//!
//! One record per customization group. Defaults mirror the stock look of
//! the capture surface; the translator only ever overwrites fields the
//! caller supplied in a coercible form.

use crate::schema::EnumSlot;
use serde::{Deserialize, Serialize};
use visage_paint::{Color, Gradient};

// ========== Enumerated Values ==========

/// Declares a closed set of string variants usable as an [`EnumSlot`]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(#[default] $default:ident = $default_wire:literal,)?
            $($variant:ident = $wire:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[default]
                #[serde(rename = $default_wire)]
                $default,
            )?
            $(
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            pub const VARIANTS: &'static [&'static str] = &[$($default_wire,)? $($wire,)*];

            /// Exact, case-sensitive match against the wire names
            pub fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($default_wire => Some(Self::$default),)?
                    $($wire => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn as_wire(&self) -> &'static str {
                match self {
                    $(Self::$default => $default_wire,)?
                    $(Self::$variant => $wire,)*
                }
            }
        }

        impl EnumSlot for $name {
            fn variants(&self) -> &'static [&'static str] {
                Self::VARIANTS
            }

            fn set_variant(&mut self, value: &str) -> bool {
                match Self::from_wire(value) {
                    Some(parsed) => {
                        *self = parsed;
                        true
                    }
                    None => false,
                }
            }
        }
    };
}

wire_enum! {
    /// Placement of the cancel button on the capture surface
    pub enum CancelButtonLocation {
        #[default] TopLeft = "topLeft",
        TopRight = "topRight",
        Disabled = "disabled",
    }
}

wire_enum! {
    /// Animation played when the capture surface closes
    pub enum ExitAnimation {
        #[default] CircleFade = "circleFade",
        RippleOut = "rippleOut",
        RippleIn = "rippleIn",
        None = "none",
    }
}

wire_enum! {
    /// Spoken guidance during capture
    pub enum VocalGuidanceMode {
        #[default] Off = "off",
        Minimal = "minimal",
        Full = "full",
    }
}

impl VocalGuidanceMode {
    /// Lenient parse used for the surface property; unknown values are `Off`
    pub fn from_wire_or_off(value: Option<&str>) -> Self {
        value.and_then(Self::from_wire).unwrap_or_default()
    }
}

// ========== Shared Records ==========

/// Action button styling shared by several screens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub text_normal_color: Color,
    pub background_normal_color: Color,
    pub text_highlight_color: Color,
    pub background_highlight_color: Color,
    pub text_disabled_color: Color,
    pub background_disabled_color: Color,
    pub border_color: Color,
    pub border_width: i32,
    pub corner_radius: i32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            text_normal_color: Color::WHITE,
            background_normal_color: Color::from_hex(0x417FB2),
            text_highlight_color: Color::WHITE,
            background_highlight_color: Color::from_hex(0x396E99),
            text_disabled_color: Color::from_hex(0xD6D6D6),
            background_disabled_color: Color::from_hex(0xB8CADB),
            border_color: Color::TRANSPARENT,
            border_width: 0,
            corner_radius: 8,
        }
    }
}

// ========== Groups ==========

/// `faceTecSessionTimerCustomization`, timeouts in seconds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionTimerCustomization {
    pub liveness_check_no_interaction_timeout: i32,
    pub id_scan_no_interaction_timeout: i32,
}

impl Default for SessionTimerCustomization {
    fn default() -> Self {
        Self {
            liveness_check_no_interaction_timeout: 60,
            id_scan_no_interaction_timeout: 120,
        }
    }
}

/// `faceTecOCRConfirmationCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcrConfirmationCustomization {
    pub background_colors: Gradient,
    pub main_header_divider_line_color: Color,
    pub main_header_text_color: Color,
    pub section_header_text_color: Color,
    pub field_label_text_color: Color,
    pub field_value_text_color: Color,
    pub input_field_background_color: Color,
    pub input_field_text_color: Color,
    pub input_field_border_color: Color,
    pub input_field_placeholder_text_color: Color,
    pub main_header_divider_line_width: i32,
    pub input_field_border_width: i32,
    pub input_field_corner_radius: i32,
    pub show_input_field_bottom_border_only: bool,
    pub button: ButtonStyle,
}

impl Default for OcrConfirmationCustomization {
    fn default() -> Self {
        let text = Color::from_hex(0x3C3C3C);
        let accent = Color::from_hex(0x417FB2);
        Self {
            background_colors: Gradient::solid(Color::WHITE),
            main_header_divider_line_color: accent,
            main_header_text_color: accent,
            section_header_text_color: accent,
            field_label_text_color: text,
            field_value_text_color: text,
            input_field_background_color: Color::TRANSPARENT,
            input_field_text_color: text,
            input_field_border_color: accent,
            input_field_placeholder_text_color: Color::from_hex(0x3C3C3C66),
            main_header_divider_line_width: 2,
            input_field_border_width: 2,
            input_field_corner_radius: 0,
            show_input_field_bottom_border_only: true,
            button: ButtonStyle::default(),
        }
    }
}

/// `faceTecIDScanCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdScanCustomization {
    pub show_selection_screen_branding_image: bool,
    pub show_selection_screen_document_image: bool,
    pub capture_screen_background_color: Color,
    pub capture_frame_stroke_color: Color,
    pub selection_screen_foreground_color: Color,
    pub review_screen_foreground_color: Color,
    pub review_screen_text_background_color: Color,
    pub review_screen_text_background_border_color: Color,
    pub capture_screen_foreground_color: Color,
    pub capture_screen_text_background_color: Color,
    pub capture_screen_text_background_border_color: Color,
    pub capture_screen_focus_message_text_color: Color,
    pub capture_frame_stroke_width: i32,
    pub capture_frame_corner_radius: i32,
    pub review_screen_text_background_border_width: i32,
    pub review_screen_text_background_corner_radius: i32,
    pub capture_screen_text_background_border_width: i32,
    pub capture_screen_text_background_corner_radius: i32,
    pub selection_screen_background_colors: Gradient,
    pub review_screen_background_colors: Gradient,
    pub button: ButtonStyle,
}

impl Default for IdScanCustomization {
    fn default() -> Self {
        let text = Color::from_hex(0x3C3C3C);
        let panel = Color::from_hex(0x417FB2);
        Self {
            show_selection_screen_branding_image: false,
            show_selection_screen_document_image: true,
            capture_screen_background_color: Color::WHITE,
            capture_frame_stroke_color: Color::WHITE,
            selection_screen_foreground_color: text,
            review_screen_foreground_color: Color::WHITE,
            review_screen_text_background_color: panel,
            review_screen_text_background_border_color: Color::TRANSPARENT,
            capture_screen_foreground_color: Color::WHITE,
            capture_screen_text_background_color: panel,
            capture_screen_text_background_border_color: Color::TRANSPARENT,
            capture_screen_focus_message_text_color: Color::WHITE,
            capture_frame_stroke_width: 2,
            capture_frame_corner_radius: 12,
            review_screen_text_background_border_width: 0,
            review_screen_text_background_corner_radius: 8,
            capture_screen_text_background_border_width: 0,
            capture_screen_text_background_corner_radius: 8,
            selection_screen_background_colors: Gradient::solid(Color::WHITE),
            review_screen_background_colors: Gradient::solid(Color::WHITE),
            button: ButtonStyle::default(),
        }
    }
}

/// `faceTecOverlayCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayCustomization {
    pub background_color: Color,
    pub show_branding_image: bool,
}

impl Default for OverlayCustomization {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            show_branding_image: true,
        }
    }
}

/// `faceTecResultScreenCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultScreenCustomization {
    pub animation_relative_scale: f32,
    pub foreground_color: Color,
    pub activity_indicator_color: Color,
    pub upload_progress_fill_color: Color,
    pub upload_progress_track_color: Color,
    pub result_animation_background_color: Color,
    pub result_animation_foreground_color: Color,
    pub background_colors: Gradient,
    /// Milliseconds per rotation of a custom activity indicator
    pub custom_activity_indicator_rotation_interval: i32,
    pub show_upload_progress_bar: bool,
}

impl Default for ResultScreenCustomization {
    fn default() -> Self {
        let accent = Color::from_hex(0x417FB2);
        Self {
            animation_relative_scale: 1.0,
            foreground_color: Color::from_hex(0x3C3C3C),
            activity_indicator_color: accent,
            upload_progress_fill_color: accent,
            upload_progress_track_color: Color::new(0, 0, 0, 0x1A),
            result_animation_background_color: accent,
            result_animation_foreground_color: Color::WHITE,
            background_colors: Gradient::solid(Color::WHITE),
            custom_activity_indicator_rotation_interval: 1000,
            show_upload_progress_bar: true,
        }
    }
}

/// `faceTecGuidanceCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidanceCustomization {
    pub background_colors: Gradient,
    pub foreground_color: Color,
    pub ready_screen_header_text_color: Color,
    pub ready_screen_subtext_text_color: Color,
    pub retry_screen_header_text_color: Color,
    pub retry_screen_subtext_text_color: Color,
    pub ready_screen_oval_fill_color: Color,
    pub ready_screen_text_background_color: Color,
    pub retry_screen_image_border_color: Color,
    pub retry_screen_oval_stroke_color: Color,
    pub ready_screen_header_attributed_string: Option<String>,
    pub ready_screen_subtext_attributed_string: Option<String>,
    pub retry_screen_header_attributed_string: Option<String>,
    pub retry_screen_subtext_attributed_string: Option<String>,
    pub ready_screen_text_background_corner_radius: i32,
    pub retry_screen_image_border_width: i32,
    pub retry_screen_image_corner_radius: i32,
    /// Milliseconds between slideshow images
    pub retry_screen_slideshow_interval: i32,
    pub enable_retry_screen_slideshow_shuffle: bool,
    pub button: ButtonStyle,
}

impl Default for GuidanceCustomization {
    fn default() -> Self {
        let text = Color::from_hex(0x3C3C3C);
        let accent = Color::from_hex(0x417FB2);
        Self {
            background_colors: Gradient::solid(Color::WHITE),
            foreground_color: text,
            ready_screen_header_text_color: text,
            ready_screen_subtext_text_color: text,
            retry_screen_header_text_color: text,
            retry_screen_subtext_text_color: text,
            ready_screen_oval_fill_color: Color::TRANSPARENT,
            ready_screen_text_background_color: Color::WHITE,
            retry_screen_image_border_color: accent,
            retry_screen_oval_stroke_color: Color::WHITE,
            ready_screen_header_attributed_string: None,
            ready_screen_subtext_attributed_string: None,
            retry_screen_header_attributed_string: None,
            retry_screen_subtext_attributed_string: None,
            ready_screen_text_background_corner_radius: 8,
            retry_screen_image_border_width: 2,
            retry_screen_image_corner_radius: 12,
            retry_screen_slideshow_interval: 1500,
            enable_retry_screen_slideshow_shuffle: true,
            button: ButtonStyle::default(),
        }
    }
}

/// `faceTecFrameCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameCustomization {
    pub border_width: i32,
    pub corner_radius: i32,
    pub elevation: i32,
    pub border_color: Color,
    pub background_color: Color,
}

impl Default for FrameCustomization {
    fn default() -> Self {
        Self {
            border_width: 0,
            corner_radius: 20,
            elevation: 0,
            border_color: Color::TRANSPARENT,
            background_color: Color::WHITE,
        }
    }
}

/// `faceTecFeedbackCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCustomization {
    pub corner_radius: i32,
    pub elevation: i32,
    pub background_colors: Gradient,
    pub text_color: Color,
    pub enable_pulsating_text: bool,
}

impl Default for FeedbackCustomization {
    fn default() -> Self {
        Self {
            corner_radius: 3,
            elevation: 0,
            background_colors: Gradient::solid(Color::from_hex(0x417FB2)),
            text_color: Color::WHITE,
            enable_pulsating_text: true,
        }
    }
}

/// `faceTecOvalCustomization`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OvalCustomization {
    pub stroke_width: i32,
    pub progress_stroke_width: i32,
    pub progress_radial_offset: i32,
    pub stroke_color: Color,
    pub progress_color1: Color,
    pub progress_color2: Color,
}

impl Default for OvalCustomization {
    fn default() -> Self {
        let accent = Color::from_hex(0x417FB2);
        Self {
            stroke_width: 6,
            progress_stroke_width: 9,
            progress_radial_offset: 6,
            stroke_color: accent,
            progress_color1: accent,
            progress_color2: accent,
        }
    }
}

/// `faceTecCancelButtonCustomization`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelButtonCustomization {
    pub location: CancelButtonLocation,
}

/// `faceTecExitAnimationStyle`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitAnimationCustomization {
    pub animation: ExitAnimation,
}
