//! Customization schema
//!
//! The declarative field table every translation goes through. Each entry
//! names a `(group, field)` pair of the configuration document, the semantic
//! type its raw value is coerced as, and the native theme attribute it lands
//! in. Entries whose semantic type has no native counterpart (fonts, images,
//! animations) are still declared so their input is validated and logged,
//! but carry no writer.

use crate::groups::{CancelButtonLocation, ExitAnimation};
use crate::theme::NativeTheme;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use visage_paint::{Color, Gradient};

// ========== Semantic Types ==========

/// How a raw document value is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemanticType {
    /// `#RRGGBB` or `#RRGGBBAA` string
    Color,
    /// Array of color strings, rendered as a horizontal gradient
    ColorList,
    Font,
    Image,
    ImageList,
    Animation,
    /// Integral measurement
    Dimension,
    /// Finite floating point factor
    Scale,
    Boolean,
    /// Plain string
    AttributedText,
    /// Integral time interval
    Duration,
    /// One of a closed set of strings, case-sensitive
    Enum(&'static [&'static str]),
}

impl SemanticType {
    /// Whether values of this type reach the native theme
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            SemanticType::Font
                | SemanticType::Image
                | SemanticType::ImageList
                | SemanticType::Animation
        )
    }
}

// ========== Slots ==========

/// A string-valued enumeration stored in the theme
pub trait EnumSlot {
    /// Accepted wire names
    fn variants(&self) -> &'static [&'static str];

    /// Set from an exact wire name; returns false and leaves the value
    /// untouched when the name is not a variant
    fn set_variant(&mut self, value: &str) -> bool;
}

/// Mutable view of one theme attribute
pub enum Slot<'a> {
    Color(&'a mut Color),
    Gradient(&'a mut Gradient),
    Int(&'a mut i32),
    Scale(&'a mut f32),
    Bool(&'a mut bool),
    Text(&'a mut Option<String>),
    Enum(&'a mut dyn EnumSlot),
}

/// Accessor from a theme to the slot a field writes
pub type Writer = for<'a> fn(&'a mut NativeTheme) -> Slot<'a>;

/// One declared field
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub group: &'static str,
    pub field: &'static str,
    pub kind: SemanticType,
    /// Dotted attribute path inside [`NativeTheme`]
    pub path: &'static str,
    pub write: Option<Writer>,
}

impl FieldSpec {
    pub fn is_supported(&self) -> bool {
        self.write.is_some()
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("group", &self.group)
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("supported", &self.is_supported())
            .finish()
    }
}

// ========== Table ==========

pub const SESSION_TIMER: &str = "faceTecSessionTimerCustomization";
pub const OCR_CONFIRMATION: &str = "faceTecOCRConfirmationCustomization";
pub const ID_SCAN: &str = "faceTecIDScanCustomization";
pub const OVERLAY: &str = "faceTecOverlayCustomization";
pub const RESULT_SCREEN: &str = "faceTecResultScreenCustomization";
pub const GUIDANCE: &str = "faceTecGuidanceCustomization";
pub const FRAME: &str = "faceTecFrameCustomization";
pub const FEEDBACK: &str = "faceTecFeedbackCustomization";
pub const OVAL: &str = "faceTecOvalCustomization";
pub const CANCEL_BUTTON: &str = "faceTecCancelButtonCustomization";
pub const EXIT_ANIMATION: &str = "faceTecExitAnimationStyle";

/// Entry with a writer into the theme
macro_rules! supported {
    ($group:expr, $field:literal, $kind:expr => $slot:ident($g:ident . $f:ident $(. $sub:ident)?)) => {
        FieldSpec {
            group: $group,
            field: $field,
            kind: $kind,
            path: concat!(stringify!($g), ".", stringify!($f) $(, ".", stringify!($sub))?),
            write: {
                fn write(theme: &mut NativeTheme) -> Slot<'_> {
                    Slot::$slot(&mut theme.$g.$f $(.$sub)?)
                }
                Some(write as Writer)
            },
        }
    };
}

/// Entry validated and logged but never written
macro_rules! unsupported {
    ($group:expr, $field:literal, $kind:expr => $g:ident . $f:ident $(. $sub:ident)?) => {
        FieldSpec {
            group: $group,
            field: $field,
            kind: $kind,
            path: concat!(stringify!($g), ".", stringify!($f) $(, ".", stringify!($sub))?),
            write: None,
        }
    };
}

/// The ten `button*` fields shared by screens with an action button
macro_rules! button_fields {
    ($group:expr, $g:ident) => {
        &[
            unsupported!($group, "buttonFont", SemanticType::Font => $g.button.font),
            supported!($group, "buttonTextNormalColor", SemanticType::Color => Color($g.button.text_normal_color)),
            supported!($group, "buttonBackgroundNormalColor", SemanticType::Color => Color($g.button.background_normal_color)),
            supported!($group, "buttonTextHighlightColor", SemanticType::Color => Color($g.button.text_highlight_color)),
            supported!($group, "buttonBackgroundHighlightColor", SemanticType::Color => Color($g.button.background_highlight_color)),
            supported!($group, "buttonTextDisabledColor", SemanticType::Color => Color($g.button.text_disabled_color)),
            supported!($group, "buttonBackgroundDisabledColor", SemanticType::Color => Color($g.button.background_disabled_color)),
            supported!($group, "buttonBorderColor", SemanticType::Color => Color($g.button.border_color)),
            supported!($group, "buttonBorderWidth", SemanticType::Dimension => Int($g.button.border_width)),
            supported!($group, "buttonCornerRadius", SemanticType::Dimension => Int($g.button.corner_radius)),
        ]
    };
}

use SemanticType::{
    AttributedText, Animation, Boolean, ColorList, Dimension, Duration, Font, Image, ImageList,
    Scale,
};

const SESSION_TIMER_FIELDS: &[FieldSpec] = &[
    supported!(SESSION_TIMER, "livenessCheckNoInteractionTimeout", Duration => Int(session_timer.liveness_check_no_interaction_timeout)),
    supported!(SESSION_TIMER, "idScanNoInteractionTimeout", Duration => Int(session_timer.id_scan_no_interaction_timeout)),
];

const OCR_CONFIRMATION_FIELDS: &[FieldSpec] = &[
    supported!(OCR_CONFIRMATION, "backgroundColors", ColorList => Gradient(ocr_confirmation.background_colors)),
    supported!(OCR_CONFIRMATION, "mainHeaderDividerLineColor", SemanticType::Color => Color(ocr_confirmation.main_header_divider_line_color)),
    supported!(OCR_CONFIRMATION, "mainHeaderTextColor", SemanticType::Color => Color(ocr_confirmation.main_header_text_color)),
    supported!(OCR_CONFIRMATION, "sectionHeaderTextColor", SemanticType::Color => Color(ocr_confirmation.section_header_text_color)),
    supported!(OCR_CONFIRMATION, "fieldLabelTextColor", SemanticType::Color => Color(ocr_confirmation.field_label_text_color)),
    supported!(OCR_CONFIRMATION, "fieldValueTextColor", SemanticType::Color => Color(ocr_confirmation.field_value_text_color)),
    supported!(OCR_CONFIRMATION, "inputFieldBackgroundColor", SemanticType::Color => Color(ocr_confirmation.input_field_background_color)),
    supported!(OCR_CONFIRMATION, "inputFieldTextColor", SemanticType::Color => Color(ocr_confirmation.input_field_text_color)),
    supported!(OCR_CONFIRMATION, "inputFieldBorderColor", SemanticType::Color => Color(ocr_confirmation.input_field_border_color)),
    supported!(OCR_CONFIRMATION, "inputFieldPlaceholderTextColor", SemanticType::Color => Color(ocr_confirmation.input_field_placeholder_text_color)),
    supported!(OCR_CONFIRMATION, "mainHeaderDividerLineWidth", Dimension => Int(ocr_confirmation.main_header_divider_line_width)),
    supported!(OCR_CONFIRMATION, "inputFieldBorderWidth", Dimension => Int(ocr_confirmation.input_field_border_width)),
    supported!(OCR_CONFIRMATION, "inputFieldCornerRadius", Dimension => Int(ocr_confirmation.input_field_corner_radius)),
    unsupported!(OCR_CONFIRMATION, "mainHeaderFont", Font => ocr_confirmation.main_header_font),
    unsupported!(OCR_CONFIRMATION, "sectionHeaderFont", Font => ocr_confirmation.section_header_font),
    unsupported!(OCR_CONFIRMATION, "fieldLabelFont", Font => ocr_confirmation.field_label_font),
    unsupported!(OCR_CONFIRMATION, "fieldValueFont", Font => ocr_confirmation.field_value_font),
    unsupported!(OCR_CONFIRMATION, "inputFieldFont", Font => ocr_confirmation.input_field_font),
    unsupported!(OCR_CONFIRMATION, "inputFieldPlaceholderFont", Font => ocr_confirmation.input_field_placeholder_font),
    supported!(OCR_CONFIRMATION, "showInputFieldBottomBorderOnly", Boolean => Bool(ocr_confirmation.show_input_field_bottom_border_only)),
];

const OCR_CONFIRMATION_BUTTON_FIELDS: &[FieldSpec] = button_fields!(OCR_CONFIRMATION, ocr_confirmation);

const ID_SCAN_FIELDS: &[FieldSpec] = &[
    supported!(ID_SCAN, "showSelectionScreenBrandingImage", Boolean => Bool(id_scan.show_selection_screen_branding_image)),
    supported!(ID_SCAN, "showSelectionScreenDocumentImage", Boolean => Bool(id_scan.show_selection_screen_document_image)),
    unsupported!(ID_SCAN, "selectionScreenBrandingImage", Image => id_scan.selection_screen_branding_image),
    unsupported!(ID_SCAN, "selectionScreenDocumentImage", Image => id_scan.selection_screen_document_image),
    unsupported!(ID_SCAN, "activeTorchButtonImage", Image => id_scan.active_torch_button_image),
    unsupported!(ID_SCAN, "inactiveTorchButtonImage", Image => id_scan.inactive_torch_button_image),
    supported!(ID_SCAN, "captureScreenBackgroundColor", SemanticType::Color => Color(id_scan.capture_screen_background_color)),
    supported!(ID_SCAN, "captureFrameStrokeColor", SemanticType::Color => Color(id_scan.capture_frame_stroke_color)),
    supported!(ID_SCAN, "selectionScreenForegroundColor", SemanticType::Color => Color(id_scan.selection_screen_foreground_color)),
    supported!(ID_SCAN, "reviewScreenForegroundColor", SemanticType::Color => Color(id_scan.review_screen_foreground_color)),
    supported!(ID_SCAN, "reviewScreenTextBackgroundColor", SemanticType::Color => Color(id_scan.review_screen_text_background_color)),
    supported!(ID_SCAN, "reviewScreenTextBackgroundBorderColor", SemanticType::Color => Color(id_scan.review_screen_text_background_border_color)),
    supported!(ID_SCAN, "captureScreenForegroundColor", SemanticType::Color => Color(id_scan.capture_screen_foreground_color)),
    supported!(ID_SCAN, "captureScreenTextBackgroundColor", SemanticType::Color => Color(id_scan.capture_screen_text_background_color)),
    supported!(ID_SCAN, "captureScreenTextBackgroundBorderColor", SemanticType::Color => Color(id_scan.capture_screen_text_background_border_color)),
    supported!(ID_SCAN, "captureScreenFocusMessageTextColor", SemanticType::Color => Color(id_scan.capture_screen_focus_message_text_color)),
    supported!(ID_SCAN, "captureFrameStrokeWidth", Dimension => Int(id_scan.capture_frame_stroke_width)),
    supported!(ID_SCAN, "captureFrameCornerRadius", Dimension => Int(id_scan.capture_frame_corner_radius)),
    supported!(ID_SCAN, "reviewScreenTextBackgroundBorderWidth", Dimension => Int(id_scan.review_screen_text_background_border_width)),
    supported!(ID_SCAN, "reviewScreenTextBackgroundCornerRadius", Dimension => Int(id_scan.review_screen_text_background_corner_radius)),
    supported!(ID_SCAN, "captureScreenTextBackgroundBorderWidth", Dimension => Int(id_scan.capture_screen_text_background_border_width)),
    supported!(ID_SCAN, "captureScreenTextBackgroundCornerRadius", Dimension => Int(id_scan.capture_screen_text_background_corner_radius)),
    supported!(ID_SCAN, "selectionScreenBackgroundColors", ColorList => Gradient(id_scan.selection_screen_background_colors)),
    supported!(ID_SCAN, "reviewScreenBackgroundColors", ColorList => Gradient(id_scan.review_screen_background_colors)),
    unsupported!(ID_SCAN, "captureScreenFocusMessageFont", Font => id_scan.capture_screen_focus_message_font),
    unsupported!(ID_SCAN, "headerFont", Font => id_scan.header_font),
    unsupported!(ID_SCAN, "subtextFont", Font => id_scan.subtext_font),
    unsupported!(ID_SCAN, "customNFCStartingAnimation", Animation => id_scan.custom_nfc_starting_animation),
    unsupported!(ID_SCAN, "customNFCScanningAnimation", Animation => id_scan.custom_nfc_scanning_animation),
    unsupported!(ID_SCAN, "customNFCCardStartingAnimation", Animation => id_scan.custom_nfc_card_starting_animation),
    unsupported!(ID_SCAN, "customNFCCardScanningAnimation", Animation => id_scan.custom_nfc_card_scanning_animation),
    unsupported!(ID_SCAN, "customNFCSkipOrErrorAnimation", Animation => id_scan.custom_nfc_skip_or_error_animation),
    unsupported!(ID_SCAN, "customStaticNFCStartingAnimation", Animation => id_scan.custom_static_nfc_starting_animation),
    unsupported!(ID_SCAN, "customStaticNFCScanningAnimation", Animation => id_scan.custom_static_nfc_scanning_animation),
    unsupported!(ID_SCAN, "customStaticNFCSkipOrErrorAnimation", Animation => id_scan.custom_static_nfc_skip_or_error_animation),
];

const ID_SCAN_BUTTON_FIELDS: &[FieldSpec] = button_fields!(ID_SCAN, id_scan);

const OVERLAY_FIELDS: &[FieldSpec] = &[
    supported!(OVERLAY, "backgroundColor", SemanticType::Color => Color(overlay.background_color)),
    unsupported!(OVERLAY, "brandingImage", Image => overlay.branding_image),
    supported!(OVERLAY, "showBrandingImage", Boolean => Bool(overlay.show_branding_image)),
];

const RESULT_SCREEN_FIELDS: &[FieldSpec] = &[
    supported!(RESULT_SCREEN, "animationRelativeScale", Scale => Scale(result_screen.animation_relative_scale)),
    supported!(RESULT_SCREEN, "foregroundColor", SemanticType::Color => Color(result_screen.foreground_color)),
    supported!(RESULT_SCREEN, "activityIndicatorColor", SemanticType::Color => Color(result_screen.activity_indicator_color)),
    supported!(RESULT_SCREEN, "uploadProgressFillColor", SemanticType::Color => Color(result_screen.upload_progress_fill_color)),
    supported!(RESULT_SCREEN, "uploadProgressTrackColor", SemanticType::Color => Color(result_screen.upload_progress_track_color)),
    supported!(RESULT_SCREEN, "resultAnimationBackgroundColor", SemanticType::Color => Color(result_screen.result_animation_background_color)),
    supported!(RESULT_SCREEN, "resultAnimationForegroundColor", SemanticType::Color => Color(result_screen.result_animation_foreground_color)),
    supported!(RESULT_SCREEN, "backgroundColors", ColorList => Gradient(result_screen.background_colors)),
    unsupported!(RESULT_SCREEN, "customActivityIndicatorImage", Image => result_screen.custom_activity_indicator_image),
    unsupported!(RESULT_SCREEN, "resultAnimationSuccessBackgroundImage", Image => result_screen.result_animation_success_background_image),
    unsupported!(RESULT_SCREEN, "resultAnimationUnsuccessBackgroundImage", Image => result_screen.result_animation_unsuccess_background_image),
    supported!(RESULT_SCREEN, "customActivityIndicatorRotationInterval", Duration => Int(result_screen.custom_activity_indicator_rotation_interval)),
    unsupported!(RESULT_SCREEN, "customActivityIndicatorAnimation", Animation => result_screen.custom_activity_indicator_animation),
    unsupported!(RESULT_SCREEN, "customResultAnimationSuccess", Animation => result_screen.custom_result_animation_success),
    unsupported!(RESULT_SCREEN, "customResultAnimationUnsuccess", Animation => result_screen.custom_result_animation_unsuccess),
    unsupported!(RESULT_SCREEN, "customStaticResultAnimationSuccess", Animation => result_screen.custom_static_result_animation_success),
    unsupported!(RESULT_SCREEN, "customStaticResultAnimationUnsuccess", Animation => result_screen.custom_static_result_animation_unsuccess),
    supported!(RESULT_SCREEN, "showUploadProgressBar", Boolean => Bool(result_screen.show_upload_progress_bar)),
    unsupported!(RESULT_SCREEN, "messageFont", Font => result_screen.message_font),
];

const GUIDANCE_FIELDS: &[FieldSpec] = &[
    supported!(GUIDANCE, "backgroundColors", ColorList => Gradient(guidance.background_colors)),
    supported!(GUIDANCE, "foregroundColor", SemanticType::Color => Color(guidance.foreground_color)),
    supported!(GUIDANCE, "readyScreenHeaderTextColor", SemanticType::Color => Color(guidance.ready_screen_header_text_color)),
    supported!(GUIDANCE, "readyScreenSubtextTextColor", SemanticType::Color => Color(guidance.ready_screen_subtext_text_color)),
    supported!(GUIDANCE, "retryScreenHeaderTextColor", SemanticType::Color => Color(guidance.retry_screen_header_text_color)),
    supported!(GUIDANCE, "retryScreenSubtextTextColor", SemanticType::Color => Color(guidance.retry_screen_subtext_text_color)),
    supported!(GUIDANCE, "readyScreenOvalFillColor", SemanticType::Color => Color(guidance.ready_screen_oval_fill_color)),
    supported!(GUIDANCE, "readyScreenTextBackgroundColor", SemanticType::Color => Color(guidance.ready_screen_text_background_color)),
    supported!(GUIDANCE, "retryScreenImageBorderColor", SemanticType::Color => Color(guidance.retry_screen_image_border_color)),
    supported!(GUIDANCE, "retryScreenOvalStrokeColor", SemanticType::Color => Color(guidance.retry_screen_oval_stroke_color)),
    unsupported!(GUIDANCE, "headerFont", Font => guidance.header_font),
    unsupported!(GUIDANCE, "subtextFont", Font => guidance.subtext_font),
    unsupported!(GUIDANCE, "readyScreenHeaderFont", Font => guidance.ready_screen_header_font),
    unsupported!(GUIDANCE, "readyScreenSubtextFont", Font => guidance.ready_screen_subtext_font),
    unsupported!(GUIDANCE, "retryScreenHeaderFont", Font => guidance.retry_screen_header_font),
    unsupported!(GUIDANCE, "retryScreenSubtextFont", Font => guidance.retry_screen_subtext_font),
    supported!(GUIDANCE, "readyScreenHeaderAttributedString", AttributedText => Text(guidance.ready_screen_header_attributed_string)),
    supported!(GUIDANCE, "readyScreenSubtextAttributedString", AttributedText => Text(guidance.ready_screen_subtext_attributed_string)),
    supported!(GUIDANCE, "retryScreenHeaderAttributedString", AttributedText => Text(guidance.retry_screen_header_attributed_string)),
    supported!(GUIDANCE, "retryScreenSubtextAttributedString", AttributedText => Text(guidance.retry_screen_subtext_attributed_string)),
    supported!(GUIDANCE, "readyScreenTextBackgroundCornerRadius", Dimension => Int(guidance.ready_screen_text_background_corner_radius)),
    supported!(GUIDANCE, "retryScreenImageBorderWidth", Dimension => Int(guidance.retry_screen_image_border_width)),
    supported!(GUIDANCE, "retryScreenImageCornerRadius", Dimension => Int(guidance.retry_screen_image_corner_radius)),
    unsupported!(GUIDANCE, "retryScreenIdealImage", Image => guidance.retry_screen_ideal_image),
    unsupported!(GUIDANCE, "cameraPermissionsScreenImage", Image => guidance.camera_permissions_screen_image),
    unsupported!(GUIDANCE, "retryScreenSlideshowImages", ImageList => guidance.retry_screen_slideshow_images),
    supported!(GUIDANCE, "retryScreenSlideshowInterval", Duration => Int(guidance.retry_screen_slideshow_interval)),
    supported!(GUIDANCE, "enableRetryScreenSlideshowShuffle", Boolean => Bool(guidance.enable_retry_screen_slideshow_shuffle)),
];

const GUIDANCE_BUTTON_FIELDS: &[FieldSpec] = button_fields!(GUIDANCE, guidance);

const FRAME_FIELDS: &[FieldSpec] = &[
    supported!(FRAME, "borderWidth", Dimension => Int(frame.border_width)),
    supported!(FRAME, "cornerRadius", Dimension => Int(frame.corner_radius)),
    supported!(FRAME, "elevation", Dimension => Int(frame.elevation)),
    supported!(FRAME, "borderColor", SemanticType::Color => Color(frame.border_color)),
    supported!(FRAME, "backgroundColor", SemanticType::Color => Color(frame.background_color)),
];

const FEEDBACK_FIELDS: &[FieldSpec] = &[
    supported!(FEEDBACK, "cornerRadius", Dimension => Int(feedback.corner_radius)),
    supported!(FEEDBACK, "elevation", Dimension => Int(feedback.elevation)),
    supported!(FEEDBACK, "backgroundColors", ColorList => Gradient(feedback.background_colors)),
    supported!(FEEDBACK, "textColor", SemanticType::Color => Color(feedback.text_color)),
    unsupported!(FEEDBACK, "textFont", Font => feedback.text_font),
    supported!(FEEDBACK, "enablePulsatingText", Boolean => Bool(feedback.enable_pulsating_text)),
];

const OVAL_FIELDS: &[FieldSpec] = &[
    supported!(OVAL, "strokeWidth", Dimension => Int(oval.stroke_width)),
    supported!(OVAL, "progressStrokeWidth", Dimension => Int(oval.progress_stroke_width)),
    supported!(OVAL, "progressRadialOffset", Dimension => Int(oval.progress_radial_offset)),
    supported!(OVAL, "strokeColor", SemanticType::Color => Color(oval.stroke_color)),
    supported!(OVAL, "progressColor1", SemanticType::Color => Color(oval.progress_color1)),
    supported!(OVAL, "progressColor2", SemanticType::Color => Color(oval.progress_color2)),
];

const CANCEL_BUTTON_FIELDS: &[FieldSpec] = &[
    supported!(CANCEL_BUTTON, "location", SemanticType::Enum(CancelButtonLocation::VARIANTS) => Enum(cancel_button.location)),
    unsupported!(CANCEL_BUTTON, "customImage", Image => cancel_button.custom_image),
];

const EXIT_ANIMATION_FIELDS: &[FieldSpec] = &[
    supported!(EXIT_ANIMATION, "animation", SemanticType::Enum(ExitAnimation::VARIANTS) => Enum(exit_animation.animation)),
];

/// Every declared field, grouped
pub const STANDARD_FIELDS: &[&[FieldSpec]] = &[
    SESSION_TIMER_FIELDS,
    OCR_CONFIRMATION_FIELDS,
    OCR_CONFIRMATION_BUTTON_FIELDS,
    ID_SCAN_FIELDS,
    ID_SCAN_BUTTON_FIELDS,
    OVERLAY_FIELDS,
    RESULT_SCREEN_FIELDS,
    GUIDANCE_FIELDS,
    GUIDANCE_BUTTON_FIELDS,
    FRAME_FIELDS,
    FEEDBACK_FIELDS,
    OVAL_FIELDS,
    CANCEL_BUTTON_FIELDS,
    EXIT_ANIMATION_FIELDS,
];

// ========== Schema ==========

/// Indexed view over a field table
pub struct CustomizationSchema {
    sections: &'static [&'static [FieldSpec]],
    index: FxHashMap<&'static str, FxHashMap<&'static str, &'static FieldSpec>>,
}

static STANDARD: OnceLock<CustomizationSchema> = OnceLock::new();

impl CustomizationSchema {
    /// The process-wide schema built from [`STANDARD_FIELDS`]
    pub fn standard() -> &'static CustomizationSchema {
        STANDARD.get_or_init(|| Self::from_sections(STANDARD_FIELDS))
    }

    /// Index a field table; a repeated `(group, field)` keeps the first entry
    pub fn from_sections(sections: &'static [&'static [FieldSpec]]) -> Self {
        let mut index: FxHashMap<&'static str, FxHashMap<&'static str, &'static FieldSpec>> =
            FxHashMap::default();
        for spec in sections.iter().flat_map(|section| section.iter()) {
            index
                .entry(spec.group)
                .or_default()
                .entry(spec.field)
                .or_insert(spec);
        }
        Self { sections, index }
    }

    pub fn lookup(&self, group: &str, field: &str) -> Option<&'static FieldSpec> {
        self.index.get(group)?.get(field).copied()
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.index.contains_key(group)
    }

    /// All declared entries in table order
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.sections.iter().flat_map(|section| section.iter())
    }

    pub fn group_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.index.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CustomizationSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomizationSchema")
            .field("groups", &self.index.len())
            .field("fields", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_eleven_groups() {
        let schema = CustomizationSchema::standard();
        let mut groups: Vec<_> = schema.group_names().collect();
        groups.sort_unstable();
        assert_eq!(
            groups,
            vec![
                CANCEL_BUTTON,
                EXIT_ANIMATION,
                FEEDBACK,
                FRAME,
                GUIDANCE,
                ID_SCAN,
                OCR_CONFIRMATION,
                OVAL,
                OVERLAY,
                RESULT_SCREEN,
                SESSION_TIMER,
            ]
        );
    }

    #[test]
    fn test_keys_and_paths_unique() {
        let schema = CustomizationSchema::standard();
        let mut keys = FxHashSet::default();
        let mut paths = FxHashSet::default();
        for spec in schema.fields() {
            assert!(keys.insert((spec.group, spec.field)), "duplicate {spec:?}");
            assert!(paths.insert(spec.path), "duplicate path {}", spec.path);
        }
    }

    #[test]
    fn test_writer_iff_supported_type() {
        for spec in CustomizationSchema::standard().fields() {
            assert_eq!(spec.is_supported(), spec.kind.is_supported(), "{spec:?}");
        }
    }

    #[test]
    fn test_writer_kind_matches_slot() {
        let mut theme = NativeTheme::default();
        for spec in CustomizationSchema::standard().fields() {
            let Some(write) = spec.write else { continue };
            let matched = match (spec.kind, write(&mut theme)) {
                (SemanticType::Color, Slot::Color(_)) => true,
                (SemanticType::ColorList, Slot::Gradient(_)) => true,
                (SemanticType::Dimension | SemanticType::Duration, Slot::Int(_)) => true,
                (SemanticType::Scale, Slot::Scale(_)) => true,
                (SemanticType::Boolean, Slot::Bool(_)) => true,
                (SemanticType::AttributedText, Slot::Text(_)) => true,
                (SemanticType::Enum(variants), Slot::Enum(slot)) => slot.variants() == variants,
                _ => false,
            };
            assert!(matched, "slot does not fit {spec:?}");
        }
    }

    #[test]
    fn test_paths() {
        let schema = CustomizationSchema::standard();
        assert_eq!(schema.lookup(FRAME, "borderWidth").unwrap().path, "frame.border_width");
        assert_eq!(
            schema.lookup(GUIDANCE, "buttonCornerRadius").unwrap().path,
            "guidance.button.corner_radius"
        );
        assert!(schema.lookup(FRAME, "borderwidth").is_none());
        assert!(schema.lookup("faceTecUnknownCustomization", "borderWidth").is_none());
    }
}
