//! Technical. Dense sans-serif layout for engineers with skills in a four-column
//! grid, project stacks shown as tags and dates next to the title.

use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{ResumeContent, SectionView};

pub struct Technical;

const STYLESHEET: &str = "\
.template-technical { color: #0f172a; font-size: 13px; }
.template-technical .name { font-size: 1.9em; font-weight: 700; }
.template-technical .item-contact { display: inline; margin-right: 12px; color: #0d9488; }
.template-technical h2 { color: #0d9488; border-bottom: 1px solid #99f6e4; font-size: 1em; }
.template-technical .tag { font-family: monospace; background: #f1f5f9; padding: 1px 6px; }";

impl TemplateRenderer for Technical {
    fn id(&self) -> TemplateId {
        TemplateId::Technical
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-technical",
            font: FontFamily::Inter,
            font_size_px: 13.0,
            accent: "#0d9488",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        let sections = content
            .resolved_sections()
            .into_iter()
            .map(Self::section)
            .collect();
        Document {
            template: TemplateId::Technical,
            theme: self.theme(),
            sections,
        }
    }
}

impl Technical {
    fn section(view: SectionView<'_>) -> SectionBlock {
        let id = view.id();
        match view {
            SectionView::PersonalInfo(info) => {
                let mut items = vec![Item::new(ItemKind::Name, info.display_name())];
                items.extend(
                    info.contact_lines()
                        .into_iter()
                        .map(|c| Item::new(ItemKind::Contact, c)),
                );
                if !info.summary.trim().is_empty() {
                    items.push(Item::new(ItemKind::Summary, info.summary.trim()));
                }
                SectionBlock::new(id, None, SectionLayout::Header).with_items(items)
            }
            SectionView::Experience(entries) => {
                let items = entries
                    .iter()
                    .map(|e| {
                        let title = match (e.position.trim(), e.company.trim()) {
                            (position, "") => position.to_string(),
                            ("", company) => company.to_string(),
                            (position, company) => format!("{position}, {company}"),
                        };
                        Item::new(ItemKind::Experience, title)
                            .meta(&e.date_range())
                            .body(&e.description)
                    })
                    .collect();
                SectionBlock::new(id, Some("Experience".to_string()), SectionLayout::Stacked)
                    .with_items(items)
            }
            SectionView::Education(entries) => {
                let items = entries
                    .iter()
                    .map(|e| {
                        Item::new(ItemKind::Education, e.degree.trim())
                            .subtitle(&e.school)
                            .meta(&e.graduation_date)
                    })
                    .collect();
                SectionBlock::new(id, Some("Education".to_string()), SectionLayout::Stacked)
                    .with_items(items)
            }
            SectionView::Skills(skills) => SectionBlock::new(
                id,
                Some("Technical Skills".to_string()),
                SectionLayout::Grid { columns: 4 },
            )
            .with_items(
                skills
                    .iter()
                    .map(|s| Item::new(ItemKind::Skill, s.trim()))
                    .collect(),
            ),
            SectionView::Projects(projects) => {
                let items = projects
                    .iter()
                    .map(|p| {
                        Item::new(ItemKind::Project, p.name.trim())
                            .body(&p.description)
                            .tags(&p.technologies)
                    })
                    .collect();
                SectionBlock::new(id, Some("Projects".to_string()), SectionLayout::Stacked)
                    .with_items(items)
            }
            SectionView::Custom(custom) => {
                let heading = match custom.title.trim() {
                    "" => custom.id.clone(),
                    title => title.to_string(),
                };
                let items = custom
                    .rows()
                    .into_iter()
                    .map(|row| Item::new(ItemKind::Custom, row))
                    .collect();
                SectionBlock::new(id, Some(heading), SectionLayout::Stacked).with_items(items)
            }
        }
    }
}
