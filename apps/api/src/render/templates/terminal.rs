//! Terminal: monospace, dark background, sections styled as shell output.
//!
//! The header carries a document label (`DOC-XXXXXXXX`) derived from the
//! name and email, so the same resume always shows the same label.

use crate::layout::font_metrics::FontFamily;
use crate::render::document::{Document, Item, ItemKind, SectionBlock, SectionLayout, Theme};
use crate::render::templates::{TemplateId, TemplateRenderer};
use crate::resume::{PersonalInfo, ResumeContent, SectionView};

pub struct Terminal;

const STYLESHEET: &str = "\
.template-terminal { background: #0b0f14; color: #c9d1d9; }
.template-terminal .name { color: #3fb950; font-size: 1.6em; text-transform: lowercase; }
.template-terminal .name::before { content: '> '; }
.template-terminal .item-meta { color: #8b949e; }
.template-terminal h2 { color: #58a6ff; font-size: 1em; font-weight: 400; }
.template-terminal .tag { color: #d29922; }
.template-terminal .tag::before { content: '#'; }";

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

impl TemplateRenderer for Terminal {
    fn id(&self) -> TemplateId {
        TemplateId::Terminal
    }

    fn theme(&self) -> Theme {
        Theme {
            class_name: "template-terminal",
            font: FontFamily::JetBrainsMono,
            font_size_px: 13.0,
            accent: "#3fb950",
            stylesheet: STYLESHEET,
        }
    }

    fn render(&self, content: &ResumeContent) -> Document {
        let mut sections = Vec::new();
        for view in content.resolved_sections() {
            let id = view.id();
            let (heading, layout, items) = match view {
                SectionView::PersonalInfo(info) => {
                    let mut items = vec![Item::new(ItemKind::Name, info.display_name())
                        .meta(&document_label(info))];
                    items.extend(
                        info.contact_lines()
                            .into_iter()
                            .map(|c| Item::new(ItemKind::Contact, c)),
                    );
                    if !info.summary.trim().is_empty() {
                        items.push(Item::new(ItemKind::Summary, format!("# {}", info.summary.trim())));
                    }
                    (None, SectionLayout::Header, items)
                }
                SectionView::Experience(entries) => (
                    Some("$ cat experience.log".to_string()),
                    SectionLayout::Stacked,
                    entries
                        .iter()
                        .map(|e| {
                            let dates = match e.date_range() {
                                range if range.is_empty() => range,
                                range => format!("[{range}]"),
                            };
                            Item::new(ItemKind::Experience, e.position.trim())
                                .subtitle(&e.company)
                                .meta(&dates)
                                .body(&e.description)
                        })
                        .collect(),
                ),
                SectionView::Education(entries) => (
                    Some("$ cat education.log".to_string()),
                    SectionLayout::Stacked,
                    entries
                        .iter()
                        .map(|e| {
                            Item::new(ItemKind::Education, e.degree.trim())
                                .subtitle(&e.school)
                                .meta(&e.graduation_date)
                        })
                        .collect(),
                ),
                SectionView::Skills(skills) => (
                    Some("$ ls skills/".to_string()),
                    SectionLayout::Tags,
                    skills
                        .iter()
                        .map(|s| Item::new(ItemKind::Skill, s.trim()))
                        .collect(),
                ),
                SectionView::Projects(projects) => (
                    Some("$ git log --projects".to_string()),
                    SectionLayout::Stacked,
                    projects
                        .iter()
                        .map(|p| {
                            Item::new(ItemKind::Project, p.name.trim())
                                .body(&p.description)
                                .tags(&p.technologies)
                        })
                        .collect(),
                ),
                SectionView::Custom(custom) => {
                    let file = match custom.title.trim() {
                        "" => custom.id.to_lowercase(),
                        title => title.to_lowercase().replace(' ', "_"),
                    };
                    (
                        Some(format!("$ cat {file}.txt")),
                        SectionLayout::Stacked,
                        custom
                            .rows()
                            .into_iter()
                            .map(|row| Item::new(ItemKind::Custom, row))
                            .collect(),
                    )
                }
            };
            sections.push(SectionBlock::new(id, heading, layout).with_items(items));
        }

        Document {
            template: self.id(),
            theme: self.theme(),
            sections,
        }
    }
}

/// FNV-1a over the trimmed name and email, separated by a NUL byte.
fn document_label(info: &PersonalInfo) -> String {
    let mut hash = FNV_OFFSET;
    let bytes = info
        .full_name
        .trim()
        .bytes()
        .chain(std::iter::once(0))
        .chain(info.email.trim().bytes());
    for byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("DOC-{hash:08X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::templates::fixtures::full_content;
    use crate::resume::SectionId;

    #[test]
    fn test_document_label_is_stable_and_formatted() {
        let content = full_content();
        let a = document_label(&content.personal_info);
        let b = document_label(&content.personal_info);
        assert_eq!(a, b);
        assert!(a.starts_with("DOC-"));
        assert_eq!(a.len(), 12);
        assert!(a[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_document_label_changes_with_identity() {
        let mut info = full_content().personal_info;
        let before = document_label(&info);
        info.email = "someone.else@example.com".to_string();
        assert_ne!(before, document_label(&info));
    }

    #[test]
    fn test_empty_identity_hashes_to_separator_only() {
        // FNV-1a of the single NUL byte
        let label = document_label(&PersonalInfo::default());
        assert_eq!(label, "DOC-050C5D1F");
    }

    #[test]
    fn test_header_carries_label() {
        let doc = Terminal.render(&full_content());
        let header = doc.section(&SectionId::PersonalInfo).unwrap();
        let name = &header.items[0];
        assert_eq!(name.kind, ItemKind::Name);
        assert_eq!(name.title, "Ada Lovelace");
        assert!(name.meta.as_deref().unwrap().starts_with("DOC-"));
    }

    #[test]
    fn test_custom_section_heading_uses_file_name() {
        let doc = Terminal.render(&full_content());
        let mut content = full_content();
        content.section_order = Some(vec!["languages".to_string()]);
        let custom = Terminal.render(&content);
        assert!(doc.section(&SectionId::Custom("languages".to_string())).is_none());
        assert_eq!(custom.sections.len(), 1);
        assert_eq!(
            custom.sections[0].heading.as_deref(),
            Some("$ cat languages.txt")
        );
    }
}
