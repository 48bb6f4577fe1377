//! Section height measurement.
//!
//! The paginator never looks at fonts or text; it asks a `HeightMeasurer` how
//! tall a section block renders. `MetricMeasurer` estimates that from the
//! font metric tables and greedy word wrap at the page's content width.
//! `NoLayoutEngine` answers `None` for everything, which the paginator treats
//! as "fits".

use crate::layout::font_metrics::{get_metrics, FontMetrics};
use crate::layout::page::PageGeometry;
use crate::render::document::{Item, ItemKind, SectionBlock, SectionLayout, Theme};

/// Pluggable layout engine.
pub trait HeightMeasurer: Send + Sync {
    /// Rendered height of `block` in CSS pixels, or `None` when it cannot be
    /// measured.
    fn measure(&self, block: &SectionBlock, theme: &Theme) -> Option<f32>;
}

// ────────────────────────────────────────────────────────────────────────────
// Spacing constants (CSS pixels unless noted)
// ────────────────────────────────────────────────────────────────────────────

/// Heading font size relative to the body size.
const HEADING_SCALE: f32 = 1.2;
/// Gap below a heading and above the first item.
const HEADING_GAP: f32 = 8.0;
/// Vertical gap between stacked items.
const ITEM_GAP: f32 = 10.0;
/// Margin between consecutive sections.
const SECTION_GAP: f32 = 16.0;
/// Name line size relative to the body size.
const NAME_SCALE: f32 = 2.0;
/// Horizontal padding of a tag pill, in em.
const TAG_PADDING_EM: f32 = 1.2;
/// Extra vertical room per row of tag pills.
const TAG_ROW_GAP: f32 = 6.0;
/// Horizontal gap between grid columns.
const GRID_GUTTER: f32 = 12.0;

// ────────────────────────────────────────────────────────────────────────────
// MetricMeasurer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricMeasurer {
    page: PageGeometry,
}

impl MetricMeasurer {
    pub fn new(page: PageGeometry) -> Self {
        MetricMeasurer { page }
    }
}

/// Per-call measuring context: one font at one size over one text width.
struct Pen<'a> {
    metrics: &'a FontMetrics,
    font_px: f32,
    width_px: f32,
}

impl Pen<'_> {
    fn line_px(&self) -> f32 {
        self.font_px * self.metrics.line_height
    }

    /// Lines `text` wraps into at `width_px`.
    fn lines(&self, text: &str, width_px: f32) -> u32 {
        self.metrics.wrapped_lines(text, width_px / self.font_px)
    }

    fn text_height(&self, text: &str) -> f32 {
        self.lines(text, self.width_px) as f32 * self.line_px()
    }

    fn optional(&self, text: Option<&str>) -> f32 {
        text.map_or(0.0, |t| self.text_height(t))
    }

    /// Height of a flowing row of pills, each `TAG_PADDING_EM` wider than its text.
    fn tags_height<'t>(&self, tags: impl Iterator<Item = &'t str>) -> f32 {
        let width_em = self.width_px / self.font_px;
        let mut rows = 0u32;
        let mut current = 0.0f32;
        for tag in tags {
            let w = self.metrics.measure_str(tag) + TAG_PADDING_EM;
            if rows == 0 || current + self.metrics.space_width + w > width_em {
                rows += 1;
                current = w;
            } else {
                current += self.metrics.space_width + w;
            }
        }
        rows as f32 * (self.line_px() + TAG_ROW_GAP)
    }

    fn stacked_item(&self, item: &Item) -> f32 {
        let title = match item.kind {
            ItemKind::Name => self.lines(&item.title, self.width_px) as f32
                * self.line_px()
                * NAME_SCALE,
            _ => self.text_height(&item.title),
        };
        let tags = if item.tags.is_empty() {
            0.0
        } else {
            self.tags_height(item.tags.iter().map(String::as_str))
        };
        title
            + self.optional(item.subtitle.as_deref())
            + self.optional(item.meta.as_deref())
            + self.optional(item.body.as_deref())
            + tags
    }
}

impl HeightMeasurer for MetricMeasurer {
    fn measure(&self, block: &SectionBlock, theme: &Theme) -> Option<f32> {
        if !theme.font_size_px.is_finite() || theme.font_size_px <= 0.0 {
            return None;
        }
        let pen = Pen {
            metrics: get_metrics(theme.font),
            font_px: theme.font_size_px,
            width_px: self.page.content_width_px(),
        };
        if pen.width_px <= 0.0 {
            return None;
        }

        let heading = match &block.heading {
            Some(text) => {
                pen.lines(text, pen.width_px / HEADING_SCALE) as f32 * pen.line_px() * HEADING_SCALE
                    + HEADING_GAP
            }
            None => 0.0,
        };

        let body = match block.layout {
            SectionLayout::Header | SectionLayout::Stacked => {
                let items: f32 = block.items.iter().map(|i| pen.stacked_item(i)).sum();
                let gaps = block.items.len().saturating_sub(1) as f32 * ITEM_GAP;
                items + gaps
            }
            SectionLayout::Inline => {
                let joined = block
                    .items
                    .iter()
                    .map(|i| i.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                pen.text_height(&joined)
            }
            SectionLayout::Grid { columns } => {
                let columns = usize::from(columns.max(1));
                let cell_px = ((pen.width_px - GRID_GUTTER * (columns - 1) as f32)
                    / columns as f32)
                    .max(1.0);
                block
                    .items
                    .chunks(columns)
                    .map(|row| {
                        row.iter()
                            .map(|i| pen.lines(&i.title, cell_px).max(1))
                            .max()
                            .unwrap_or(1) as f32
                            * pen.line_px()
                    })
                    .sum()
            }
            SectionLayout::Tags => pen.tags_height(block.items.iter().map(|i| i.title.as_str())),
        };

        Some(heading + body + SECTION_GAP)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// NoLayoutEngine
// ────────────────────────────────────────────────────────────────────────────

/// Stand-in for an environment without layout; every measurement is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayoutEngine;

impl HeightMeasurer for NoLayoutEngine {
    fn measure(&self, _block: &SectionBlock, _theme: &Theme) -> Option<f32> {
        None
    }
}
