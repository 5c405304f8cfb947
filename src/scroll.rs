//! Scroll-driven hero fade and section reveal
//!
//! All values are a pure function of the scroll offset and element geometry;
//! `ScrollSurface` reads that geometry and applies the resulting styles.

use crate::error::Result;

/// Hero fades out completely at this fraction of its height
const FADE_END: f64 = 0.7;
/// Hero text moves up at this fraction of the scroll speed
const TEXT_PARALLAX: f64 = 0.2;
/// Dashboard content appears past this fraction of the hero height
const CONTENT_THRESHOLD: f64 = 0.2;

const CONTENT_SHOWN: ContentStyle = ContentStyle { opacity: 1.0, offset_px: 0.0 };
const CONTENT_HIDDEN: ContentStyle = ContentStyle { opacity: 0.0, offset_px: 10.0 };

/// Page geometry sampled on a scroll event
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub hero_height: f64,
    /// Viewport-relative top edge of every reveal section, in document order
    pub section_tops: Vec<f64>,
}

/// Opacity and vertical offset of the dashboard content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentStyle {
    pub opacity: f64,
    pub offset_px: f64,
}

impl ContentStyle {
    pub fn transform(&self) -> String {
        if self.offset_px == 0.0 {
            "translateY(0)".to_string()
        } else {
            format!("translateY({}px)", self.offset_px)
        }
    }
}

/// Styles to apply for one scroll position
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub hero_opacity: f64,
    /// Hero text offset; `None` leaves the current transform untouched
    pub hero_text_offset_px: Option<f64>,
    pub content: ContentStyle,
    /// Reveal state per section, aligned with `ScrollGeometry::section_tops`
    pub revealed: Vec<bool>,
}

/// Reads geometry from and writes styles to the page
pub trait ScrollSurface {
    fn geometry(&self) -> Result<ScrollGeometry>;
    fn apply(&self, frame: &ScrollFrame) -> Result<()>;
}

/// Computes scroll frames
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnimator {
    reveal_offset_px: f64,
}

impl ScrollAnimator {
    pub fn new(reveal_offset_px: f64) -> Self {
        Self { reveal_offset_px }
    }

    /// Whether a section whose top edge sits at `top` counts as in view
    pub fn is_revealed(&self, top: f64, viewport_height: f64) -> bool {
        top < viewport_height - self.reveal_offset_px
    }

    pub fn frame(&self, geometry: &ScrollGeometry) -> ScrollFrame {
        let ScrollGeometry { scroll_y, hero_height, viewport_height, .. } = *geometry;

        let (hero_opacity, hero_text_offset_px, content) = if scroll_y < hero_height {
            let opacity = (1.0 - scroll_y / (hero_height * FADE_END)).clamp(0.0, 1.0);
            let offset = (-scroll_y * TEXT_PARALLAX).min(0.0);
            let content = if scroll_y > hero_height * CONTENT_THRESHOLD {
                CONTENT_SHOWN
            } else {
                CONTENT_HIDDEN
            };
            (opacity, Some(offset), content)
        } else {
            (0.0, None, CONTENT_SHOWN)
        };

        ScrollFrame {
            hero_opacity,
            hero_text_offset_px,
            content,
            revealed: geometry
                .section_tops
                .iter()
                .map(|top| self.is_revealed(*top, viewport_height))
                .collect(),
        }
    }

    /// Sample the page and apply one frame
    pub fn refresh(&self, surface: &dyn ScrollSurface) -> Result<ScrollFrame> {
        let frame = self.frame(&surface.geometry()?);
        surface.apply(&frame)?;
        Ok(frame)
    }
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(100.0)
    }
}
