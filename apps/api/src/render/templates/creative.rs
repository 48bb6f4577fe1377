//! Creative: bold display type, gradient header, conversational headings.

use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{ResumeContent, SectionView};

pub struct Creative;

const STYLESHEET: &str = "\
.template-creative { color: #2d1b4e; }
.template-creative .section-header { background: linear-gradient(135deg, #7c3aed, #db2777); color: #fff; border-radius: 16px; padding: 24px; }
.template-creative .name { font-size: 2.4em; font-weight: 800; }
.template-creative h2 { color: #7c3aed; font-weight: 700; }
.template-creative .tag { border: 1px solid #db2777; color: #db2777; border-radius: 6px; padding: 2px 8px; }";

impl TemplateRenderer for Creative {
    fn id(&self) -> TemplateId {
        TemplateId::Creative
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-creative",
            font: FontFamily::Poppins,
            font_size_px: 14.0,
            accent: "#7c3aed",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        let sections = content
            .resolved_sections()
            .into_iter()
            .map(|view| {
                let id = view.id();
                match view {
                    SectionView::PersonalInfo(info) => {
                        let mut items = vec![Item::new(ItemKind::Name, info.display_name())];
                        if !info.summary.trim().is_empty() {
                            items.push(Item::new(ItemKind::Summary, info.summary.trim()));
                        }
                        items.extend(
                            info.contact_lines()
                                .into_iter()
                                .map(|c| Item::new(ItemKind::Contact, c)),
                        );
                        SectionBlock::new(id, None, SectionLayout::Header).with_items(items)
                    }
                    SectionView::Experience(entries) => SectionBlock::new(
                        id,
                        Some("Where I've Worked".to_string()),
                        SectionLayout::Stacked,
                    )
                    .with_items(
                        entries
                            .iter()
                            .map(|e| {
                                let company = match e.company.trim() {
                                    "" => String::new(),
                                    company => format!("@ {company}"),
                                };
                                Item::new(ItemKind::Experience, e.position.trim())
                                    .subtitle(&company)
                                    .meta(&e.date_range())
                                    .body(&e.description)
                            })
                            .collect(),
                    ),
                    SectionView::Education(entries) => SectionBlock::new(
                        id,
                        Some("Where I've Studied".to_string()),
                        SectionLayout::Stacked,
                    )
                    .with_items(
                        entries
                            .iter()
                            .map(|e| {
                                Item::new(ItemKind::Education, e.school.trim())
                                    .subtitle(&e.degree)
                                    .meta(&e.graduation_date)
                            })
                            .collect(),
                    ),
                    SectionView::Skills(skills) => SectionBlock::new(
                        id,
                        Some("What I Do".to_string()),
                        SectionLayout::Tags,
                    )
                    .with_items(
                        skills
                            .iter()
                            .map(|s| Item::new(ItemKind::Skill, s.trim()))
                            .collect(),
                    ),
                    SectionView::Projects(projects) => SectionBlock::new(
                        id,
                        Some("What I've Built".to_string()),
                        SectionLayout::Stacked,
                    )
                    .with_items(
                        projects
                            .iter()
                            .map(|p| {
                                Item::new(ItemKind::Project, p.name.trim())
                                    .body(&p.description)
                                    .tags(&p.technologies)
                            })
                            .collect(),
                    ),
                    SectionView::Custom(custom) => SectionBlock::new(
                        id,
                        Some(match custom.title.trim() {
                            "" => custom.id.clone(),
                            title => title.to_string(),
                        }),
                        SectionLayout::Tags,
                    )
                    .with_items(
                        custom
                            .rows()
                            .into_iter()
                            .map(|row| Item::new(ItemKind::Custom, row))
                            .collect(),
                    ),
                }
            })
            .collect();

        Document {
            template: self.id(),
            theme: self.theme(),
            sections,
        }
    }
}
