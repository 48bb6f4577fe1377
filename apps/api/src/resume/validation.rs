//! Shape validation for resume content arriving at the persistence layer.
//!
//! The renderer is tolerant of anything that deserializes, so this is the one
//! place malformed snapshots are turned away: wrong JSON types, list items of
//! the wrong shape, and custom sections whose content does not match their kind.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::resume::model::ResumeContent;

/// One problem found in a submitted content object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentIssue {
    /// JSON-pointer-ish location, e.g. `experience[2].company`.
    pub path: String,
    pub reason: String,
}

/// Maximum accepted title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

const ENTRY_COLLECTIONS: &[(&str, &[&str], &[&str])] = &[
    // (field, string fields, string-list fields)
    (
        "experience",
        &["id", "company", "position", "startDate", "endDate", "description"],
        &[],
    ),
    ("education", &["id", "school", "degree", "graduationDate"], &[]),
    ("projects", &["id", "name", "description"], &["technologies"]),
];

const PERSONAL_INFO_FIELDS: &[&str] = &["fullName", "email", "phone", "address", "summary"];

/// Validates a submitted content value and, if it passes, returns the typed snapshot.
pub fn validate_content(value: &Value) -> Result<ResumeContent, Vec<ContentIssue>> {
    let mut issues = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(vec![issue("content", "must be a JSON object")]);
    };

    if let Some(order) = present(root, "sectionOrder") {
        check_string_list(order, "sectionOrder", &mut issues);
    }

    if let Some(info) = present(root, "personalInfo") {
        match info.as_object() {
            Some(info) => {
                for field in PERSONAL_INFO_FIELDS {
                    check_string_field(info, field, "personalInfo", &mut issues);
                }
            }
            None => issues.push(issue("personalInfo", "must be an object")),
        }
    }

    for (collection, string_fields, list_fields) in ENTRY_COLLECTIONS {
        let Some(entries) = present(root, collection) else {
            continue;
        };
        let Some(entries) = entries.as_array() else {
            issues.push(issue(collection, "must be an array"));
            continue;
        };
        for (i, entry) in entries.iter().enumerate() {
            let path = format!("{collection}[{i}]");
            let Some(entry) = entry.as_object() else {
                issues.push(issue(&path, "must be an object"));
                continue;
            };
            for field in *string_fields {
                check_string_field(entry, field, &path, &mut issues);
            }
            for field in *list_fields {
                if let Some(list) = present(entry, field) {
                    check_string_list(list, &format!("{path}.{field}"), &mut issues);
                }
            }
        }
    }

    if let Some(skills) = present(root, "skills") {
        check_string_list(skills, "skills", &mut issues);
    }

    if let Some(sections) = present(root, "customSections") {
        match sections.as_array() {
            Some(sections) => {
                for (i, section) in sections.iter().enumerate() {
                    check_custom_section(section, &format!("customSections[{i}]"), &mut issues);
                }
            }
            None => issues.push(issue("customSections", "must be an array")),
        }
    }

    if !issues.is_empty() {
        return Err(issues);
    }

    ResumeContent::from_json(value.clone())
        .map_err(|e| vec![issue("content", &format!("could not be read: {e}"))])
}

/// Validates a resume title for create/update.
pub fn validate_title(title: &str) -> Result<(), ContentIssue> {
    if title.trim().is_empty() {
        return Err(issue("title", "cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(issue(
            "title",
            &format!("must be at most {MAX_TITLE_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Joins issues into a single human-readable message.
pub fn describe_issues(issues: &[ContentIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_custom_section(section: &Value, path: &str, issues: &mut Vec<ContentIssue>) {
    let Some(section) = section.as_object() else {
        issues.push(issue(path, "must be an object"));
        return;
    };
    check_string_field(section, "id", path, issues);
    check_string_field(section, "title", path, issues);

    let kind = match present(section, "type") {
        None => "text",
        Some(Value::String(kind)) => kind.as_str(),
        Some(_) => {
            issues.push(issue(&format!("{path}.type"), "must be a string"));
            return;
        }
    };

    let content_path = format!("{path}.content");
    match kind {
        "list" => {
            if let Some(content) = present(section, "content") {
                check_string_list(content, &content_path, issues);
            }
        }
        "text" | "date" | "link" => {
            if let Some(content) = present(section, "content") {
                if !content.is_string() {
                    issues.push(issue(&content_path, &format!("must be a string for type '{kind}'")));
                }
            }
        }
        other => issues.push(issue(
            &format!("{path}.type"),
            &format!("unknown section type '{other}' (expected text, list, date or link)"),
        )),
    }
}

/// Returns the field if it is present and not `null`.
fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn check_string_field(
    object: &Map<String, Value>,
    field: &str,
    parent: &str,
    issues: &mut Vec<ContentIssue>,
) {
    if let Some(value) = present(object, field) {
        if !value.is_string() {
            issues.push(issue(&format!("{parent}.{field}"), "must be a string"));
        }
    }
}

fn check_string_list(value: &Value, path: &str, issues: &mut Vec<ContentIssue>) {
    match value.as_array() {
        Some(items) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    issues.push(issue(&format!("{path}[{i}]"), "must be a string"));
                }
            }
        }
        None => issues.push(issue(path, "must be an array of strings")),
    }
}

fn issue(path: &str, reason: &str) -> ContentIssue {
    ContentIssue {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
