//! The eight resume templates and the table that selects between them.
//!
//! Every template is an independent `TemplateRenderer`: same input, same
//! section vocabulary, different labels and arrangement. None of them shares
//! an implementation with another; what they have in common lives in
//! `ResumeContent::resolved_sections` and in this dispatch table.

mod classic;
mod creative;
mod executive;
mod minimal;
mod modern;
mod professional;
mod technical;
mod terminal;

use serde::{Deserialize, Serialize};

use crate::render::document::{Document, Theme};
use crate::resume::ResumeContent;

pub use classic::Classic;
pub use creative::Creative;
pub use executive::Executive;
pub use minimal::Minimal;
pub use modern::Modern;
pub use professional::Professional;
pub use technical::Technical;
pub use terminal::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Classic,
    Modern,
    Minimal,
    Professional,
    Creative,
    Executive,
    Technical,
    Terminal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Classic,
        TemplateId::Modern,
        TemplateId::Minimal,
        TemplateId::Professional,
        TemplateId::Creative,
        TemplateId::Executive,
        TemplateId::Technical,
        TemplateId::Terminal,
    ];

    /// Used for missing or unknown template keys.
    pub const DEFAULT: TemplateId = TemplateId::Classic;

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Minimal => "minimal",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
            TemplateId::Executive => "executive",
            TemplateId::Technical => "technical",
            TemplateId::Terminal => "terminal",
        }
    }

    /// Parses a template key (case-insensitive). `None` for unknown keys.
    pub fn parse(key: &str) -> Option<TemplateId> {
        let key = key.trim().to_ascii_lowercase();
        TemplateId::ALL.into_iter().find(|t| t.as_str() == key)
    }

    /// Resolves an optional key, falling back to the default template.
    pub fn resolve(key: Option<&str>) -> TemplateId {
        key.and_then(TemplateId::parse).unwrap_or(TemplateId::DEFAULT)
    }
}

/// A template: renders a resume snapshot into a themed document tree.
///
/// Implementations must be pure. Rendering the same snapshot twice yields
/// equal documents.
pub trait TemplateRenderer: Send + Sync {
    fn id(&self) -> TemplateId;
    fn theme(&self) -> Theme;
    fn render(&self, content: &ResumeContent) -> Document;
}

static CLASSIC: Classic = Classic;
static MODERN: Modern = Modern;
static MINIMAL: Minimal = Minimal;
static PROFESSIONAL: Professional = Professional;
static CREATIVE: Creative = Creative;
static EXECUTIVE: Executive = Executive;
static TECHNICAL: Technical = Technical;
static TERMINAL: Terminal = Terminal;

/// Dispatch table from template key to renderer.
pub fn renderer_for(id: TemplateId) -> &'static dyn TemplateRenderer {
    match id {
        TemplateId::Classic => &CLASSIC,
        TemplateId::Modern => &MODERN,
        TemplateId::Minimal => &MINIMAL,
        TemplateId::Professional => &PROFESSIONAL,
        TemplateId::Creative => &CREATIVE,
        TemplateId::Executive => &EXECUTIVE,
        TemplateId::Technical => &TECHNICAL,
        TemplateId::Terminal => &TERMINAL,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::resume::{
        CustomContent, CustomSection, CustomSectionKind, EducationEntry, ExperienceEntry,
        PersonalInfo, ProjectEntry, ResumeContent,
    };

    pub fn full_content() -> ResumeContent {
        ResumeContent {
            section_order: None,
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+44 20 0000 0000".to_string(),
                address: "London".to_string(),
                summary: "Mathematician and first programmer.".to_string(),
            },
            experience: vec![
                ExperienceEntry {
                    id: "x1".to_string(),
                    company: "Analytical Engines Ltd".to_string(),
                    position: "Programmer".to_string(),
                    start_date: "1842".to_string(),
                    end_date: String::new(),
                    description: "Wrote the first published algorithm.".to_string(),
                },
                ExperienceEntry {
                    id: "x2".to_string(),
                    company: "Royal Society".to_string(),
                    position: "Translator".to_string(),
                    start_date: "1840".to_string(),
                    end_date: "1842".to_string(),
                    description: "Translated Menabrea's memoir.".to_string(),
                },
            ],
            education: vec![EducationEntry {
                id: "e1".to_string(),
                school: "Private tutoring".to_string(),
                degree: "Mathematics".to_string(),
                graduation_date: "1835".to_string(),
            }],
            skills: vec![
                "Mathematics".to_string(),
                "Algorithms".to_string(),
                "Translation".to_string(),
            ],
            projects: vec![ProjectEntry {
                id: "p1".to_string(),
                name: "Note G".to_string(),
                description: "Bernoulli number computation.".to_string(),
                technologies: vec!["Analytical Engine".to_string()],
            }],
            custom_sections: vec![CustomSection {
                id: "languages".to_string(),
                title: "Languages".to_string(),
                kind: CustomSectionKind::List,
                content: CustomContent::Items(vec!["English".to_string(), "French".to_string()]),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::full_content;
    use super::*;
    use crate::render::document::ItemKind;
    use crate::resume::SectionId;

    fn ids(doc: &Document) -> Vec<String> {
        doc.section_ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_resolve_unknown_template_falls_back_to_default() {
        assert_eq!(TemplateId::resolve(Some("nonexistent")), TemplateId::DEFAULT);
        assert_eq!(TemplateId::resolve(None), TemplateId::DEFAULT);
        assert_eq!(TemplateId::resolve(Some(" Terminal ")), TemplateId::Terminal);
    }

    #[test]
    fn test_dispatch_table_matches_ids() {
        for id in TemplateId::ALL {
            assert_eq!(renderer_for(id).id(), id);
            assert_eq!(TemplateId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_template_id_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&TemplateId::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }

    #[test]
    fn test_rendering_is_idempotent_for_every_template() {
        let content = full_content();
        for id in TemplateId::ALL {
            let renderer = renderer_for(id);
            assert_eq!(
                renderer.render(&content),
                renderer.render(&content),
                "{id:?} should render identically twice"
            );
        }
    }

    #[test]
    fn test_default_section_order_for_every_template() {
        let content = full_content();
        for id in TemplateId::ALL {
            let doc = renderer_for(id).render(&content);
            assert_eq!(
                ids(&doc),
                vec!["personal-info", "experience", "education", "skills", "projects"],
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_section_order_is_respected_and_filtered() {
        let mut content = full_content();
        content.education.clear();
        content.section_order = Some(
            ["projects", "unknown", "education", "languages", "personal-info", "skills"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for id in TemplateId::ALL {
            let doc = renderer_for(id).render(&content);
            assert_eq!(
                ids(&doc),
                vec!["projects", "languages", "personal-info", "skills"],
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_empty_experience_omits_section_for_every_template() {
        let mut content = full_content();
        content.experience.clear();
        for id in TemplateId::ALL {
            let doc = renderer_for(id).render(&content);
            assert!(doc.section(&SectionId::Experience).is_none(), "{id:?}");
            assert_eq!(doc.item_count(ItemKind::Experience), 0);
            for heading in doc.sections.iter().filter_map(|s| s.heading.as_deref()) {
                assert!(!heading.to_lowercase().contains("experience"), "{id:?}: {heading}");
            }
        }
    }

    #[test]
    fn test_every_heading_has_rows_beneath_it() {
        let mut content = full_content();
        content.section_order = Some(
            ["personal-info", "experience", "skills", "languages"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for id in TemplateId::ALL {
            let doc = renderer_for(id).render(&content);
            for section in &doc.sections {
                assert!(!section.items.is_empty(), "{id:?} {:?}", section.id);
            }
        }
    }

    #[test]
    fn test_templates_are_interchangeable_on_item_counts() {
        let content = full_content();
        for id in TemplateId::ALL {
            let doc = renderer_for(id).render(&content);
            assert_eq!(doc.item_count(ItemKind::Experience), content.experience.len(), "{id:?}");
            assert_eq!(doc.item_count(ItemKind::Education), content.education.len(), "{id:?}");
            assert_eq!(doc.item_count(ItemKind::Project), content.projects.len(), "{id:?}");
            assert_eq!(doc.item_count(ItemKind::Skill), content.skills.len(), "{id:?}");
            assert_eq!(doc.item_count(ItemKind::Name), 1, "{id:?}");
        }
    }

    #[test]
    fn test_empty_name_uses_placeholder() {
        let content = ResumeContent::default();
        for id in TemplateId::ALL {
            let doc = renderer_for(id).render(&content);
            let header = doc.section(&SectionId::PersonalInfo).unwrap();
            let name = header.items.iter().find(|i| i.kind == ItemKind::Name).unwrap();
            assert!(name.title.contains("Your Name"), "{id:?}: {}", name.title);
        }
    }

    #[test]
    fn test_all_templates_share_theme_contract() {
        for id in TemplateId::ALL {
            let renderer = renderer_for(id);
            let doc = renderer.render(&ResumeContent::default());
            assert_eq!(doc.template, id);
            assert_eq!(doc.theme, renderer.theme());
            assert!(doc.theme.class_name.starts_with("template-"));
        }
    }
}
