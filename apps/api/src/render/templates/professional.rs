use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{ResumeContent, SectionView};

/// Professional: navy banner header, competencies in a three-column grid.
pub struct Professional;

const SKILL_COLUMNS: u8 = 3;

const STYLESHEET: &str = "\
.template-professional { color: #1a202c; }
.template-professional .section-header { background: #1e3a5f; color: #fff; padding: 24px; margin: -19px -19px 16px; }
.template-professional .name { font-size: 2em; font-weight: 700; }
.template-professional h2 { color: #1e3a5f; border-bottom: 2px solid #1e3a5f; text-transform: uppercase; font-size: 0.9em; }
.template-professional .item-subtitle { font-weight: 600; }";

impl TemplateRenderer for Professional {
    fn id(&self) -> TemplateId {
        TemplateId::Professional
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-professional",
            font: FontFamily::Lato,
            font_size_px: 14.0,
            accent: "#1e3a5f",
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
                .map(render_section)
                .collect(),
        }
    }
}

fn render_section(view: SectionView<'_>) -> SectionBlock {
    let (heading, layout, items): (Option<&str>, SectionLayout, Vec<Item>) = match view {
        SectionView::PersonalInfo(info) => {
            let mut items = vec![Item::new(ItemKind::Name, info.display_name())
                .subtitle(&info.contact_lines().join(" | "))];
            if !info.summary.trim().is_empty() {
                items.push(Item::new(ItemKind::Summary, info.summary.trim()));
            }
            (None, SectionLayout::Header, items)
        }
        SectionView::Experience(entries) => (
            Some("Professional Experience"),
            SectionLayout::Stacked,
            entries
                .iter()
                .map(|e| {
                    Item::new(ItemKind::Experience, e.company.trim())
                        .subtitle(&e.position)
                        .meta(&e.date_range())
                        .body(&e.description)
                })
                .collect(),
        ),
        SectionView::Education(entries) => (
            Some("Academic Background"),
            SectionLayout::Stacked,
            entries
                .iter()
                .map(|e| {
                    Item::new(ItemKind::Education, e.school.trim())
                        .subtitle(&e.degree)
                        .meta(&e.graduation_date)
                })
                .collect(),
        ),
        SectionView::Skills(skills) => (
            Some("Core Competencies"),
            SectionLayout::Grid {
                columns: SKILL_COLUMNS,
            },
            skills
                .iter()
                .map(|s| Item::new(ItemKind::Skill, s.trim()))
                .collect(),
        ),
        SectionView::Projects(projects) => (
            Some("Key Projects"),
            SectionLayout::Stacked,
            projects
                .iter()
                .map(|p| {
                    Item::new(ItemKind::Project, p.name.trim())
                        .body(&p.description)
                        .meta(&p.technologies.join(" · "))
                })
                .collect(),
        ),
        SectionView::Custom(custom) => (
            Some(if custom.title.trim().is_empty() {
                custom.id.as_str()
            } else {
                custom.title.trim()
            }),
            SectionLayout::Stacked,
            custom
                .rows()
                .into_iter()
                .map(|row| Item::new(ItemKind::Custom, row))
                .collect(),
        ),
    };

    SectionBlock::new(view.id(), heading.map(String::from), layout).with_items(items)
}
