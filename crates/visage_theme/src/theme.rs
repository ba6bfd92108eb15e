//! Native theme
//!
//! The strongly-typed output of translation. One record per customization
//! group plus the surface-level vocal guidance mode.

use crate::groups::*;
use serde::{Deserialize, Serialize};

/// Complete set of native customization values for one session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeTheme {
    pub session_timer: SessionTimerCustomization,
    pub ocr_confirmation: OcrConfirmationCustomization,
    pub id_scan: IdScanCustomization,
    pub overlay: OverlayCustomization,
    pub result_screen: ResultScreenCustomization,
    pub guidance: GuidanceCustomization,
    pub frame: FrameCustomization,
    pub feedback: FeedbackCustomization,
    pub oval: OvalCustomization,
    pub cancel_button: CancelButtonCustomization,
    pub exit_animation: ExitAnimationCustomization,
    pub vocal_guidance: VocalGuidanceMode,
}

impl NativeTheme {
    pub fn with_vocal_guidance(mut self, mode: VocalGuidanceMode) -> Self {
        self.vocal_guidance = mode;
        self
    }
}
