use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{ResumeContent, SectionId, SectionView};

/// Executive: serif, gold accents, summary presented as an executive profile.
pub struct Executive;

const STYLESHEET: &str = "\
.template-executive { color: #1c1917; }
.template-executive .section-header { border-bottom: 3px double #a16207; padding-bottom: 12px; }
.template-executive .name { font-size: 2.1em; text-transform: uppercase; letter-spacing: 0.12em; }
.template-executive .item-summary { font-style: italic; margin-top: 10px; }
.template-executive h2 { color: #a16207; text-transform: uppercase; letter-spacing: 0.1em; font-size: 0.95em; }";

impl TemplateRenderer for Executive {
    fn id(&self) -> TemplateId {
        TemplateId::Executive
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-executive",
            font: FontFamily::EbGaramond,
            font_size_px: 15.0,
            accent: "#a16207",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        let mut sections = Vec::new();
        for view in content.resolved_sections() {
            sections.push(match view {
                SectionView::PersonalInfo(info) => {
                    let mut items = vec![Item::new(ItemKind::Name, info.display_name())];
                    for line in info.contact_lines() {
                        items.push(Item::new(ItemKind::Contact, line));
                    }
                    if !info.summary.trim().is_empty() {
                        items.push(
                            Item::new(ItemKind::Summary, info.summary.trim())
                                .subtitle("Executive Profile"),
                        );
                    }
                    SectionBlock::new(SectionId::PersonalInfo, None, SectionLayout::Header)
                        .with_items(items)
                }
                SectionView::Experience(entries) => headed(SectionId::Experience, "Career History")
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
                SectionView::Education(entries) => headed(SectionId::Education, "Education")
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
                SectionView::Skills(skills) => SectionBlock::new(
                    SectionId::Skills,
                    Some("Areas of Expertise".to_string()),
                    SectionLayout::Grid { columns: 2 },
                )
                .with_items(
                    skills
                        .iter()
                        .map(|s| Item::new(ItemKind::Skill, s.trim()))
                        .collect(),
                ),
                SectionView::Projects(projects) => headed(SectionId::Projects, "Selected Initiatives")
                    .with_items(
                        projects
                            .iter()
                            .map(|p| Item::new(ItemKind::Project, p.name.trim()).body(&p.description))
                            .collect(),
                    ),
                SectionView::Custom(custom) => {
                    let title = custom.title.trim();
                    headed(view.id(), if title.is_empty() { custom.id.as_str() } else { title }).with_items(
                        custom
                            .rows()
                            .into_iter()
                            .map(|row| Item::new(ItemKind::Custom, row))
                            .collect(),
                    )
                }
            });
        }

        Document {
            template: self.id(),
            theme: self.theme(),
            sections,
        }
    }
}

fn headed(id: SectionId, heading: &str) -> SectionBlock {
    SectionBlock::new(id, Some(heading.to_string()), SectionLayout::Stacked)
}
