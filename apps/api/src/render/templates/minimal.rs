//! Minimal: no rules, no color, lowercase headings, generous whitespace.

use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{CustomSection, ResumeContent, SectionId, SectionView};

pub struct Minimal;

const STYLESHEET: &str = "\
.template-minimal { color: #222; }
.template-minimal .name { font-size: 1.8em; font-weight: 300; }
.template-minimal h2 { font-weight: 400; font-size: 1em; color: #888; margin-top: 28px; }
.template-minimal .item { margin-bottom: 14px; }
.template-minimal .inline-list { color: #444; }";

impl TemplateRenderer for Minimal {
    fn id(&self) -> TemplateId {
        TemplateId::Minimal
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-minimal",
            font: FontFamily::Lato,
            font_size_px: 14.0,
            accent: "#888888",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        let mut sections = Vec::new();
        for view in content.resolved_sections() {
            let id = view.id();
            let block = match view {
                SectionView::PersonalInfo(info) => {
                    let mut items = vec![Item::new(ItemKind::Name, info.display_name())];
                    let contact = info.contact_lines().join("  /  ");
                    if !contact.is_empty() {
                        items.push(Item::new(ItemKind::Contact, contact));
                    }
                    if !info.summary.trim().is_empty() {
                        items.push(Item::new(ItemKind::Summary, info.summary.trim()));
                    }
                    SectionBlock::new(id, None, SectionLayout::Header).with_items(items)
                }
                SectionView::Experience(entries) => labelled(id, "experience", SectionLayout::Stacked)
                    .with_items(
                        entries
                            .iter()
                            .map(|e| {
                                let title = [e.position.trim(), e.company.trim()]
                                    .into_iter()
                                    .filter(|s| !s.is_empty())
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                Item::new(ItemKind::Experience, title)
                                    .meta(&e.date_range())
                                    .body(&e.description)
                            })
                            .collect(),
                    ),
                SectionView::Education(entries) => labelled(id, "education", SectionLayout::Stacked)
                    .with_items(
                        entries
                            .iter()
                            .map(|e| {
                                Item::new(ItemKind::Education, e.degree.trim())
                                    .subtitle(&e.school)
                                    .meta(&e.graduation_date)
                            })
                            .collect(),
                    ),
                SectionView::Skills(skills) => labelled(id, "skills", SectionLayout::Inline)
                    .with_items(
                        skills
                            .iter()
                            .map(|s| Item::new(ItemKind::Skill, s.trim()))
                            .collect(),
                    ),
                SectionView::Projects(projects) => labelled(id, "projects", SectionLayout::Stacked)
                    .with_items(
                        projects
                            .iter()
                            .map(|p| Item::new(ItemKind::Project, p.name.trim()).body(&p.description))
                            .collect(),
                    ),
                SectionView::Custom(custom) => custom_block(custom),
            };
            sections.push(block);
        }

        Document {
            template: TemplateId::Minimal,
            theme: self.theme(),
            sections,
        }
    }
}

fn labelled(
    id: SectionId,
    label: &str,
    layout: SectionLayout,
) -> SectionBlock {
    SectionBlock::new(id, Some(label.to_string()), layout)
}

fn custom_block(custom: &CustomSection) -> SectionBlock {
    let label = match custom.title.trim() {
        "" => custom.id.to_lowercase(),
        title => title.to_lowercase(),
    };
    SectionBlock::new(
        SectionId::Custom(custom.id.clone()),
        Some(label),
        SectionLayout::Inline,
    )
    .with_items(
        custom
            .rows()
            .into_iter()
            .map(|row| Item::new(ItemKind::Custom, row))
            .collect(),
    )
}
