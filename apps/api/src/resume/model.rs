//! ResumeContent: the structured resume snapshot owned by the editor.
//!
//! Every field defaults when absent (and collections also when `null`), so a
//! partially filled or older snapshot deserializes into a renderable value.
//! Renderers only ever borrow this type; nothing in the render path mutates it.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown when the editor has not filled in a name yet.
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Section order used when a snapshot carries no `sectionOrder`.
pub const DEFAULT_SECTION_ORDER: [&str; 5] =
    ["personal-info", "experience", "education", "skills", "projects"];

// ────────────────────────────────────────────────────────────────────────────
// Snapshot types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_order: Option<Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// Empty means the position is ongoing.
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub graduation_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomSectionKind {
    #[default]
    Text,
    List,
    Date,
    Link,
}

/// Body of a custom section: a single string for `text`/`date`/`link`,
/// a list of strings for `list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomContent {
    Items(Vec<String>),
    Text(String),
}

impl Default for CustomContent {
    fn default() -> Self {
        CustomContent::Text(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: CustomSectionKind,
    #[serde(deserialize_with = "null_as_default")]
    pub content: CustomContent,
}

impl PersonalInfo {
    /// The name to display, falling back to the placeholder when blank.
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            NAME_PLACEHOLDER
        } else {
            name
        }
    }

    /// Non-empty contact fields in display order (email, phone, address).
    pub fn contact_lines(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.address]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl ExperienceEntry {
    /// "start – end", with "Present" for an ongoing position.
    pub fn date_range(&self) -> String {
        date_range(&self.start_date, &self.end_date)
    }
}

/// Formats a start/end pair; an empty end date reads as "Present".
pub fn date_range(start: &str, end: &str) -> String {
    let start = start.trim();
    let end = end.trim();
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (true, false) => end.to_string(),
        (false, true) => format!("{start} – Present"),
        (false, false) => format!("{start} – {end}"),
    }
}

impl CustomSection {
    /// True when there is nothing to show under the section title.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            CustomContent::Text(text) => text.trim().is_empty(),
            CustomContent::Items(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }

    /// Content rows for rendering. A `list` yields one row per non-blank item,
    /// every other kind yields its single string.
    pub fn rows(&self) -> Vec<&str> {
        match &self.content {
            CustomContent::Text(text) if text.trim().is_empty() => vec![],
            CustomContent::Text(text) => vec![text.trim()],
            CustomContent::Items(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section vocabulary
// ────────────────────────────────────────────────────────────────────────────

/// A section identifier as it appears in `sectionOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SectionId {
    PersonalInfo,
    Experience,
    Education,
    Skills,
    Projects,
    /// Refers to a `customSections` entry by its `id`.
    Custom(String),
}

impl SectionId {
    pub fn parse(key: &str) -> SectionId {
        match key.trim() {
            "personal-info" => SectionId::PersonalInfo,
            "experience" => SectionId::Experience,
            "education" => SectionId::Education,
            "skills" => SectionId::Skills,
            "projects" => SectionId::Projects,
            other => SectionId::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionId::PersonalInfo => "personal-info",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Custom(id) => id,
        }
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        SectionId::parse(&value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.as_str().to_string()
    }
}

/// A section with its backing data, borrowed from the snapshot.
#[derive(Debug, Clone, Copy)]
pub enum SectionView<'a> {
    PersonalInfo(&'a PersonalInfo),
    Experience(&'a [ExperienceEntry]),
    Education(&'a [EducationEntry]),
    Skills(&'a [String]),
    Projects(&'a [ProjectEntry]),
    Custom(&'a CustomSection),
}

impl SectionView<'_> {
    pub fn id(&self) -> SectionId {
        match self {
            SectionView::PersonalInfo(_) => SectionId::PersonalInfo,
            SectionView::Experience(_) => SectionId::Experience,
            SectionView::Education(_) => SectionId::Education,
            SectionView::Skills(_) => SectionId::Skills,
            SectionView::Projects(_) => SectionId::Projects,
            SectionView::Custom(section) => SectionId::Custom(section.id.clone()),
        }
    }
}

impl ResumeContent {
    /// The order sections are requested in: `sectionOrder`, or the default order.
    pub fn effective_order(&self) -> Vec<SectionId> {
        match &self.section_order {
            Some(order) => order.iter().map(|k| SectionId::parse(k)).collect(),
            None => DEFAULT_SECTION_ORDER
                .iter()
                .map(|k| SectionId::parse(k))
                .collect(),
        }
    }

    /// Walks the effective order and yields every section that has something
    /// to render.
    ///
    /// Skips identifiers that name no known section or custom section, repeats
    /// of an identifier already yielded, and sections whose collection is
    /// empty. `personal-info` is never empty (the name has a placeholder).
    pub fn resolved_sections(&self) -> Vec<SectionView<'_>> {
        let mut seen: HashSet<SectionId> = HashSet::new();
        let mut views = Vec::new();

        for id in self.effective_order() {
            if !seen.insert(id.clone()) {
                continue;
            }
            let view = match &id {
                SectionId::PersonalInfo => Some(SectionView::PersonalInfo(&self.personal_info)),
                SectionId::Experience if !self.experience.is_empty() => {
                    Some(SectionView::Experience(&self.experience))
                }
                SectionId::Education if !self.education.is_empty() => {
                    Some(SectionView::Education(&self.education))
                }
                SectionId::Skills if !self.skills.is_empty() => {
                    Some(SectionView::Skills(&self.skills))
                }
                SectionId::Projects if !self.projects.is_empty() => {
                    Some(SectionView::Projects(&self.projects))
                }
                SectionId::Custom(key) => self
                    .custom_sections
                    .iter()
                    .find(|s| s.id == *key && !s.is_empty())
                    .map(SectionView::Custom),
                _ => None,
            };
            if let Some(view) = view {
                views.push(view);
            }
        }

        views
    }
}

impl ResumeContent {
    /// Deserializes a JSON snapshot, treating `null` anywhere inside an object
    /// as an absent field.
    pub fn from_json(mut value: serde_json::Value) -> Result<Self, serde_json::Error> {
        drop_nulls(&mut value);
        serde_json::from_value(value)
    }
}

fn drop_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
