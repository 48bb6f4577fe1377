//! The document tree every template produces.
//!
//! A `Document` is an ordered list of `SectionBlock`s plus the template theme.
//! Blocks carry only structure (headings, items, arrangement); the HTML writer
//! and the height estimator both read this tree, never the template itself.

use serde::Serialize;

use crate::layout::font_metrics::FontFamily;
use crate::render::templates::TemplateId;
use crate::resume::SectionId;

/// Visual identity of a template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    /// CSS class put on the page frame, e.g. `template-classic`.
    pub class_name: &'static str,
    pub font: FontFamily,
    /// Body font size in CSS pixels.
    pub font_size_px: f32,
    pub accent: &'static str,
    /// Template-scoped CSS, appended after the container rules.
    #[serde(skip)]
    pub stylesheet: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub template: TemplateId,
    pub theme: Theme,
    pub sections: Vec<SectionBlock>,
}

/// How a section lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionLayout {
    /// Name banner with contact details.
    Header,
    /// One item below the other.
    Stacked,
    /// Items joined on flowing lines with a separator.
    Inline,
    /// Fixed number of columns, one item per cell.
    Grid { columns: u8 },
    /// Pill-shaped labels that wrap.
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Name,
    Contact,
    Summary,
    Experience,
    Education,
    Skill,
    Project,
    Custom,
}

/// One content row inside a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub kind: ItemKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(kind: ItemKind, title: impl Into<String>) -> Self {
        Item {
            kind,
            title: title.into(),
            subtitle: None,
            meta: None,
            body: None,
            tags: Vec::new(),
        }
    }

    pub fn subtitle(mut self, text: &str) -> Self {
        self.subtitle = non_blank(text);
        self
    }

    pub fn meta(mut self, text: &str) -> Self {
        self.meta = non_blank(text);
        self
    }

    pub fn body(mut self, text: &str) -> Self {
        self.body = non_blank(text);
        self
    }

    pub fn tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = tags
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub id: SectionId,
    /// `None` for header blocks and for the continuation half of a split section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub layout: SectionLayout,
    pub items: Vec<Item>,
    /// Set on the second fragment of a split section.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub continued: bool,
}

impl SectionBlock {
    pub fn new(id: SectionId, heading: Option<String>, layout: SectionLayout) -> Self {
        SectionBlock {
            id,
            heading,
            layout,
            items: Vec::new(),
            continued: false,
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Partitions the items into `[0, at)` and `[at, n)`.
    ///
    /// The head keeps the heading; the tail is marked `continued` and carries
    /// none, so a heading never sits on a page without the rows it introduces.
    pub fn split_at(&self, at: usize) -> (SectionBlock, SectionBlock) {
        let at = at.min(self.items.len());
        let (head_items, tail_items) = self.items.split_at(at);
        let head = SectionBlock {
            items: head_items.to_vec(),
            ..self.clone()
        };
        let tail = SectionBlock {
            id: self.id.clone(),
            heading: None,
            layout: self.layout,
            items: tail_items.to_vec(),
            continued: true,
        };
        (head, tail)
    }
}

impl Document {
    pub fn section_ids(&self) -> Vec<&SectionId> {
        self.sections.iter().map(|s| &s.id).collect()
    }

    /// Number of items of `kind` across all sections.
    pub fn item_count(&self, kind: ItemKind) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.items)
            .filter(|i| i.kind == kind)
            .count()
    }

    pub fn section(&self, id: &SectionId) -> Option<&SectionBlock> {
        self.sections.iter().find(|s| &s.id == id)
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(n: usize) -> SectionBlock {
        SectionBlock::new(
            SectionId::Experience,
            Some("Experience".to_string()),
            SectionLayout::Stacked,
        )
        .with_items(
            (0..n)
                .map(|i| Item::new(ItemKind::Experience, format!("Job {i}")))
                .collect(),
        )
    }

    #[test]
    fn test_item_builders_drop_blank_text() {
        let item = Item::new(ItemKind::Project, "Parser")
            .subtitle("  ")
            .meta("2021")
            .body("")
            .tags(&["Rust", " ", "nom"]);
        assert_eq!(item.subtitle, None);
        assert_eq!(item.meta.as_deref(), Some("2021"));
        assert_eq!(item.body, None);
        assert_eq!(item.tags, vec!["Rust", "nom"]);
    }

    #[test]
    fn test_split_at_partitions_items_contiguously() {
        let (head, tail) = block(5).split_at(2);
        assert_eq!(head.items.len(), 2);
        assert_eq!(tail.items.len(), 3);
        assert_eq!(head.items[1].title, "Job 1");
        assert_eq!(tail.items[0].title, "Job 2");
    }

    #[test]
    fn test_split_tail_has_no_heading() {
        let (head, tail) = block(4).split_at(2);
        assert_eq!(head.heading.as_deref(), Some("Experience"));
        assert!(!head.continued);
        assert_eq!(tail.heading, None);
        assert!(tail.continued);
        assert_eq!(tail.id, SectionId::Experience);
    }

    #[test]
    fn test_split_at_clamps_index() {
        let (head, tail) = block(2).split_at(10);
        assert_eq!(head.items.len(), 2);
        assert!(tail.items.is_empty());
    }
}
