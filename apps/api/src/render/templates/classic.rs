//! Classic: serif, centered name, ruled section headings. The default template.

use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{ResumeContent, SectionView};

pub struct Classic;

const STYLESHEET: &str = "\
.template-classic { color: #111; }
.template-classic .section-header { text-align: center; }
.template-classic .name { font-size: 2em; letter-spacing: 0.04em; }
.template-classic h2 { font-variant: small-caps; border-bottom: 1px solid #111; }
.template-classic .item-meta { font-style: italic; }";

impl TemplateRenderer for Classic {
    fn id(&self) -> TemplateId {
        TemplateId::Classic
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-classic",
            font: FontFamily::EbGaramond,
            font_size_px: 15.0,
            accent: "#111111",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        Document {
            template: self.id(),
            theme: self.theme(),
            sections: content
                .resolved_sections()
                .into_iter()
                .map(section)
                .collect(),
        }
    }
}

fn section(view: SectionView<'_>) -> SectionBlock {
    let heading = |label: &str| Some(label.to_string());
    match view {
        SectionView::PersonalInfo(info) => {
            let mut items = vec![Item::new(ItemKind::Name, info.display_name())];
            let contact = info.contact_lines().join(" · ");
            if !contact.is_empty() {
                items.push(Item::new(ItemKind::Contact, contact));
            }
            if !info.summary.trim().is_empty() {
                items.push(Item::new(ItemKind::Summary, info.summary.trim()));
            }
            SectionBlock::new(view.id(), None, SectionLayout::Header).with_items(items)
        }
        SectionView::Experience(entries) => {
            SectionBlock::new(view.id(), heading("Professional Experience"), SectionLayout::Stacked)
                .with_items(
                    entries
                        .iter()
                        .map(|e| {
                            Item::new(ItemKind::Experience, e.position.trim())
                                .subtitle(&e.company)
                                .meta(&e.date_range())
                                .body(&e.description)
                        })
                        .collect(),
                )
        }
        SectionView::Education(entries) => {
            SectionBlock::new(view.id(), heading("Education"), SectionLayout::Stacked).with_items(
                entries
                    .iter()
                    .map(|e| {
                        Item::new(ItemKind::Education, e.school.trim())
                            .subtitle(&e.degree)
                            .meta(&e.graduation_date)
                    })
                    .collect(),
            )
        }
        SectionView::Skills(skills) => {
            SectionBlock::new(view.id(), heading("Skills"), SectionLayout::Inline).with_items(
                skills
                    .iter()
                    .map(|s| Item::new(ItemKind::Skill, s.trim()))
                    .collect(),
            )
        }
        SectionView::Projects(projects) => {
            SectionBlock::new(view.id(), heading("Projects"), SectionLayout::Stacked).with_items(
                projects
                    .iter()
                    .map(|p| {
                        Item::new(ItemKind::Project, p.name.trim())
                            .body(&p.description)
                            .meta(&p.technologies.join(", "))
                    })
                    .collect(),
            )
        }
        SectionView::Custom(custom) => {
            let title = if custom.title.trim().is_empty() {
                custom.id.as_str()
            } else {
                custom.title.trim()
            };
            SectionBlock::new(view.id(), heading(title), SectionLayout::Stacked).with_items(
                custom
                    .rows()
                    .into_iter()
                    .map(|row| Item::new(ItemKind::Custom, row))
                    .collect(),
            )
        }
    }
}
