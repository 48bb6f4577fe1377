//! The preview container: a fixed A4 frame around whichever template is active.
//!
//! The frame has two mutually exclusive style regimes. On screen it shows
//! pixel-sized pages with a drop shadow; in print every page box is exactly
//! one A4 sheet, with the margin carried as padding, and sections stay whole
//! unless the estimator split them. The frame rules never depend on the
//! template.

use serde::{Deserialize, Serialize};

use crate::layout::measure::HeightMeasurer;
use crate::layout::page::{
    PageGeometry, A4_HEIGHT_MM, A4_HEIGHT_PX, A4_WIDTH_MM, A4_WIDTH_PX, PRINT_MARGIN_IN,
};
use crate::layout::pagination::{PagedDocument, Paginator};
use crate::render::html::{escape, write_pages};
use crate::render::templates::{renderer_for, TemplateId};
use crate::resume::ResumeContent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    #[default]
    Screen,
    Print,
}

impl Medium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::Screen => "screen",
            Medium::Print => "print",
        }
    }
}

/// Item styling shared by every template; templates override it.
const BASE_CSS: &str = "\
.document { overflow-wrap: anywhere; }
.document h1, .document h2, .document p { margin: 0; }
.document h2 { margin: 16px 0 8px; }
.document .item { margin-bottom: 10px; }
.document .item-title { font-weight: 600; }
.document .item-meta { font-size: 0.9em; opacity: 0.8; }
.document .grid { display: grid; gap: 4px 12px; }
.document .tags { list-style: none; padding: 0; margin: 4px 0 0; display: flex; flex-wrap: wrap; gap: 6px; }";

/// `@page` margin. The printable area is the whole sheet; the 0.2in margin is
/// `.page` padding so one page box fills exactly one sheet.
const SHEET_MARGIN_MM: f32 = 0.0;

/// The page frame rules for `medium`.
pub fn frame_css(medium: Medium) -> String {
    match medium {
        Medium::Screen => format!(
            "body {{ margin: 0; background: #e5e7eb; }}\n\
             .page {{ box-sizing: border-box; width: {A4_WIDTH_PX}px; min-height: {A4_HEIGHT_PX}px; \
             margin: 24px auto; padding: {PRINT_MARGIN_IN}in; background: #fff; \
             box-shadow: 0 4px 24px rgba(0, 0, 0, 0.15); }}\n"
        ),
        Medium::Print => format!(
            "@page {{ size: A4; margin: {SHEET_MARGIN_MM}mm; }}\n\
             body {{ margin: 0; background: #fff; }}\n\
             .page {{ box-sizing: border-box; width: {w}mm; height: {h}mm; \
             margin: 0; padding: {PRINT_MARGIN_IN}in; box-shadow: none; background: #fff; \
             print-color-adjust: exact; -webkit-print-color-adjust: exact; }}\n\
             .page + .page {{ break-before: page; }}\n\
             .section {{ break-inside: avoid; }}\n\
             .section.splittable {{ break-inside: auto; }}\n",
            w = A4_WIDTH_MM - 2.0 * SHEET_MARGIN_MM,
            h = A4_HEIGHT_MM - 2.0 * SHEET_MARGIN_MM,
        ),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DocumentContainer {
    template: TemplateId,
    page: PageGeometry,
}

impl DocumentContainer {
    /// Unknown or missing keys select the default template.
    pub fn new(template_key: Option<&str>) -> Self {
        DocumentContainer {
            template: TemplateId::resolve(template_key),
            page: PageGeometry::a4(),
        }
    }

    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    /// The template this container renders with, after fallback.
    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// Template render followed by pagination.
    pub fn paginate(&self, content: &ResumeContent, measurer: &dyn HeightMeasurer) -> PagedDocument {
        let document = renderer_for(self.template).render(content);
        Paginator::new(measurer, self.page).paginate(document)
    }

    /// Complete HTML document for `medium`.
    pub fn render_html(
        &self,
        content: &ResumeContent,
        medium: Medium,
        measurer: &dyn HeightMeasurer,
    ) -> String {
        let paged = self.paginate(content, measurer);
        let theme = paged.theme;
        let title = escape(content.personal_info.display_name());

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>\n{frame}{BASE_CSS}\n\
             .{class} {{ font-family: {stack}; font-size: {size}px; }}\n{template_css}\n</style>\n\
             </head>\n<body class=\"medium-{medium}\">\n\
             <main class=\"document {class}\" data-template=\"{key}\">{pages}</main>\n\
             </body>\n</html>\n",
            frame = frame_css(medium),
            class = theme.class_name,
            stack = theme.font.css_stack(),
            size = theme.font_size_px,
            template_css = theme.stylesheet,
            medium = medium.as_str(),
            key = self.template.as_str(),
            pages = write_pages(&paged),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::{MetricMeasurer, NoLayoutEngine};
    use crate::render::templates::fixtures::full_content;

    #[test]
    fn test_unknown_key_uses_default_template() {
        assert_eq!(DocumentContainer::new(Some("bogus")).template(), TemplateId::DEFAULT);
        assert_eq!(DocumentContainer::new(None).template(), TemplateId::DEFAULT);
        assert_eq!(DocumentContainer::new(Some("modern")).template(), TemplateId::Modern);
    }

    /// Value of the first `{property}: <number>{unit}` declaration after `selector`.
    fn declared(css: &str, selector: &str, property: &str, unit: &str) -> f32 {
        let rules = &css[css.find(selector).unwrap()..];
        let rule = &rules[..rules.find('}').unwrap()];
        let needle = format!(" {property}: ");
        let value = &rule[rule.find(&needle).unwrap() + needle.len()..];
        value[..value.find(unit).unwrap()].trim().parse().unwrap()
    }

    #[test]
    fn test_screen_frame_is_pixel_sized_with_shadow() {
        let css = frame_css(Medium::Screen);
        assert!(css.contains("width: 794px"));
        assert!(css.contains("min-height: 1123px"));
        assert!(css.contains("margin: 24px auto"));
        assert!(css.contains("box-shadow: 0 4px"));
        assert!(!css.contains("overflow: hidden"));
        assert!(!css.contains("@page"));
    }

    #[test]
    fn test_print_frame_uses_physical_units() {
        let css = frame_css(Medium::Print);
        assert!(css.contains("@page { size: A4; margin: 0mm; }"));
        assert!(css.contains("width: 210mm"));
        assert!(css.contains("height: 297mm"));
        assert!(css.contains("padding: 0.2in"));
        assert!(css.contains("box-shadow: none"));
        assert!(css.contains("print-color-adjust: exact"));
        assert!(css.contains(".page + .page { break-before: page; }"));
        assert!(css.contains(".section { break-inside: avoid; }"));
        assert!(css.contains(".section.splittable { break-inside: auto; }"));
        assert!(!css.contains(".page-break-before"));
    }

    #[test]
    fn test_print_page_box_fits_the_printable_area() {
        let css = frame_css(Medium::Print);
        let margin = declared(&css, "@page", "margin", "mm");
        let width = declared(&css, ".page {", "width", "mm");
        let height = declared(&css, ".page {", "height", "mm");
        assert!(width <= A4_WIDTH_MM - 2.0 * margin + 1e-3);
        assert!(height <= A4_HEIGHT_MM - 2.0 * margin + 1e-3);
        // And it fills the sheet, so consecutive pages never share one.
        assert!((height - (A4_HEIGHT_MM - 2.0 * margin)).abs() < 1e-3);
    }

    #[test]
    fn test_long_tokens_may_wrap_anywhere() {
        assert!(BASE_CSS.contains(".document { overflow-wrap: anywhere; }"));
    }

    #[test]
    fn test_frame_is_identical_for_every_template() {
        let content = full_content();
        for medium in [Medium::Screen, Medium::Print] {
            let frame = frame_css(medium);
            assert!(!frame.contains("template-"));
            for id in TemplateId::ALL {
                let html = DocumentContainer::new(Some(id.as_str())).render_html(
                    &content,
                    medium,
                    &MetricMeasurer::default(),
                );
                assert!(html.contains(&frame), "{id:?} {medium:?}");
                assert!(html.contains(&format!("data-template=\"{}\"", id.as_str())));
            }
        }
    }

    #[test]
    fn test_render_html_contains_content() {
        let html = DocumentContainer::new(Some("classic")).render_html(
            &full_content(),
            Medium::Screen,
            &NoLayoutEngine,
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ada Lovelace</title>"));
        assert!(html.contains("Analytical Engines Ltd"));
        assert!(html.contains("class=\"document template-classic\""));
        assert_eq!(html.matches("<div class=\"page\"").count(), 1);
    }

    #[test]
    fn test_render_html_is_idempotent() {
        let container = DocumentContainer::new(Some("terminal"));
        let content = full_content();
        let measurer = MetricMeasurer::default();
        assert_eq!(
            container.render_html(&content, Medium::Print, &measurer),
            container.render_html(&content, Medium::Print, &measurer)
        );
    }

    #[test]
    fn test_medium_serde_is_lowercase() {
        let medium: Medium = serde_json::from_str("\"print\"").unwrap();
        assert_eq!(medium, Medium::Print);
        assert_eq!(Medium::default(), Medium::Screen);
    }
}
