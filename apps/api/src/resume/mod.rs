// Resume data model: the canonical structured document every template renders.
// Pure data plus the section-resolution walk shared by all templates.

pub mod model;
pub mod validation;

pub use model::{
    CustomContent, CustomSection, CustomSectionKind, EducationEntry, ExperienceEntry,
    PersonalInfo, ProjectEntry, ResumeContent, SectionId, SectionView, DEFAULT_SECTION_ORDER,
};
