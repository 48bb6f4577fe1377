//! Page geometry for the A4 output frame.
//!
//! Two measurement systems exist side by side: pixel constants at 96 DPI for
//! on-screen height estimation, and physical units for the print rule set.
//! They are separate constants on purpose; `tests::test_screen_and_print_constants_agree`
//! keeps them in step.

use serde::{Deserialize, Serialize};

/// CSS reference resolution.
pub const SCREEN_DPI: f32 = 96.0;

pub const A4_WIDTH_PX: f32 = 794.0;
/// Single-page height used by the page-break estimator.
pub const A4_HEIGHT_PX: f32 = 1123.0;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Print margin on every side.
pub const PRINT_MARGIN_IN: f32 = 0.2;

/// Fraction of a full page beyond which a section is split instead of moved.
pub const SPLIT_THRESHOLD: f32 = 0.8;

/// Pixel geometry of one output page, as seen by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_px: f32,
    pub height_px: f32,
    pub margin_px: f32,
    pub split_threshold: f32,
}

impl PageGeometry {
    /// ISO A4 at 96 DPI with the 0.2in print margin.
    pub fn a4() -> Self {
        PageGeometry {
            width_px: A4_WIDTH_PX,
            height_px: A4_HEIGHT_PX,
            margin_px: PRINT_MARGIN_IN * SCREEN_DPI,
            split_threshold: SPLIT_THRESHOLD,
        }
    }

    /// Height in pixels above which a section is a split candidate (898.4 on A4).
    pub fn split_height(&self) -> f32 {
        self.height_px * self.split_threshold
    }

    /// Vertical room inside the margins; the paginator fills this much per page.
    pub fn content_height_px(&self) -> f32 {
        (self.height_px - 2.0 * self.margin_px).max(0.0)
    }

    /// Horizontal room for text inside the margins.
    pub fn content_width_px(&self) -> f32 {
        (self.width_px - 2.0 * self.margin_px).max(0.0)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}
