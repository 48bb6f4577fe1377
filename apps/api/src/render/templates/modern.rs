use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{ResumeContent, SectionView};

/// Modern: sans-serif with an accent bar, dates flushed right, skills as tags.
pub struct Modern;

const STYLESHEET: &str = "\
.template-modern { color: #1f2937; }
.template-modern .section-header { border-left: 6px solid #2563eb; padding-left: 16px; }
.template-modern .name { font-size: 2.2em; font-weight: 700; color: #2563eb; }
.template-modern h2 { text-transform: uppercase; font-size: 0.95em; color: #2563eb; letter-spacing: 0.08em; }
.template-modern .item-meta { float: right; color: #6b7280; }
.template-modern .tag { background: #dbeafe; color: #1e40af; border-radius: 9999px; padding: 2px 10px; }";

impl TemplateRenderer for Modern {
    fn id(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-modern",
            font: FontFamily::Inter,
            font_size_px: 14.0,
            accent: "#2563eb",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        let sections = content
            .resolved_sections()
            .into_iter()
            .map(|view| self.section(view))
            .collect();
        Document {
            template: self.id(),
            theme: self.theme(),
            sections,
        }
    }
}

impl Modern {
    fn section(&self, view: SectionView<'_>) -> SectionBlock {
        let id = view.id();
        match view {
            SectionView::PersonalInfo(info) => {
                let mut items = vec![Item::new(ItemKind::Name, info.display_name())];
                items.extend(
                    info.contact_lines()
                        .into_iter()
                        .map(|line| Item::new(ItemKind::Contact, line)),
                );
                if !info.summary.trim().is_empty() {
                    items.push(Item::new(ItemKind::Summary, info.summary.trim()));
                }
                SectionBlock::new(id, None, SectionLayout::Header).with_items(items)
            }
            SectionView::Experience(entries) => SectionBlock::new(
                id,
                Some("Work Experience".to_string()),
                SectionLayout::Stacked,
            )
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
            ),
            SectionView::Education(entries) => {
                SectionBlock::new(id, Some("Education".to_string()), SectionLayout::Stacked)
                    .with_items(
                        entries
                            .iter()
                            .map(|e| {
                                Item::new(ItemKind::Education, e.degree.trim())
                                    .subtitle(&e.school)
                                    .meta(&e.graduation_date)
                            })
                            .collect(),
                    )
            }
            SectionView::Skills(skills) => {
                SectionBlock::new(id, Some("Skills".to_string()), SectionLayout::Tags).with_items(
                    skills
                        .iter()
                        .map(|s| Item::new(ItemKind::Skill, s.trim()))
                        .collect(),
                )
            }
            SectionView::Projects(projects) => {
                SectionBlock::new(id, Some("Projects".to_string()), SectionLayout::Stacked)
                    .with_items(
                        projects
                            .iter()
                            .map(|p| {
                                Item::new(ItemKind::Project, p.name.trim())
                                    .body(&p.description)
                                    .tags(&p.technologies)
                            })
                            .collect(),
                    )
            }
            SectionView::Custom(custom) => {
                let heading = Some(custom.title.trim())
                    .filter(|t| !t.is_empty())
                    .unwrap_or(custom.id.as_str())
                    .to_string();
                SectionBlock::new(id, Some(heading), SectionLayout::Stacked).with_items(
                    custom
                        .rows()
                        .into_iter()
                        .map(|row| Item::new(ItemKind::Custom, row))
                        .collect(),
                )
            }
        }
    }
}
