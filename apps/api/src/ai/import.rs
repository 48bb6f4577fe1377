//! Resume import: PDF text → LLM → `ResumeContent`.
//!
//! The model's reply is read with the same tolerant deserializer the editor
//! uses, so missing fields default instead of failing. Entries the model
//! returned without an `id` get one here; ids are positional (`exp-1`,
//! `edu-1`, ...) and skip any id the model did supply.

use std::collections::HashSet;

use serde_json::Value;
use tracing::info;

use crate::ai::prompts::{IMPORT_PROMPT_TEMPLATE, IMPORT_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::FIDELITY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::resume::ResumeContent;

/// Resume text beyond this many characters is cut before prompting.
pub const MAX_PROMPT_CHARS: usize = 24_000;

pub fn build_import_prompt(resume_text: &str) -> String {
    IMPORT_PROMPT_TEMPLATE
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
        .replace("{resume_text}", truncate_chars(resume_text, MAX_PROMPT_CHARS))
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

pub async fn import_resume_text(text: &str, llm: &LlmClient) -> Result<ResumeContent, AppError> {
    let prompt = build_import_prompt(text);
    let reply: Value = llm.call_json(&prompt, IMPORT_SYSTEM).await?;
    let content = content_from_reply(reply)?;
    info!(
        experience = content.experience.len(),
        education = content.education.len(),
        skills = content.skills.len(),
        "Imported resume from PDF text"
    );
    Ok(content)
}

/// Reads the model's JSON into a snapshot and assigns missing entry ids.
pub fn content_from_reply(reply: Value) -> Result<ResumeContent, AppError> {
    if !reply.is_object() {
        return Err(AppError::Llm("import reply was not a JSON object".to_string()));
    }
    let mut content = ResumeContent::from_json(reply)
        .map_err(|e| AppError::Llm(format!("import reply had an unexpected shape: {e}")))?;
    assign_missing_ids(&mut content);
    Ok(content)
}

pub fn assign_missing_ids(content: &mut ResumeContent) {
    fill_ids(content.experience.iter_mut().map(|e| &mut e.id), "exp");
    fill_ids(content.education.iter_mut().map(|e| &mut e.id), "edu");
    fill_ids(content.projects.iter_mut().map(|p| &mut p.id), "proj");
}

fn fill_ids<'a>(ids: impl Iterator<Item = &'a mut String>, prefix: &str) {
    let ids: Vec<&mut String> = ids.collect();
    let mut taken: HashSet<String> = ids
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let mut next = 1usize;
    for id in ids {
        if !id.trim().is_empty() {
            continue;
        }
        let fresh = loop {
            let candidate = format!("{prefix}-{next}");
            next += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(fresh.clone());
        *id = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_with_missing_fields_defaults() {
        let content = content_from_reply(json!({
            "personalInfo": {"fullName": "Grace Hopper"},
            "skills": ["COBOL", "Compilers"]
        }))
        .unwrap();
        assert_eq!(content.personal_info.full_name, "Grace Hopper");
        assert_eq!(content.personal_info.email, "");
        assert!(content.experience.is_empty());
        assert_eq!(content.skills.len(), 2);
    }

    #[test]
    fn test_missing_ids_are_assigned_positionally() {
        let content = content_from_reply(json!({
            "experience": [
                {"company": "Navy"},
                {"id": "exp-2", "company": "Remington Rand"},
                {"company": "Harvard"}
            ],
            "education": [{"school": "Yale"}]
        }))
        .unwrap();
        let ids: Vec<&str> = content.experience.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["exp-1", "exp-2", "exp-3"]);
        assert_eq!(content.education[0].id, "edu-1");
    }

    #[test]
    fn test_supplied_ids_are_not_reused() {
        let mut content = content_from_reply(json!({
            "projects": [{"name": "A"}, {"id": "proj-1", "name": "B"}]
        }))
        .unwrap();
        assign_missing_ids(&mut content);
        assert_eq!(content.projects[0].id, "proj-2");
        assert_eq!(content.projects[1].id, "proj-1");
    }

    #[test]
    fn test_non_object_reply_is_rejected() {
        assert!(matches!(
            content_from_reply(json!(["not", "an", "object"])),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_prompt_embeds_text_and_rules() {
        let prompt = build_import_prompt("Grace Hopper\nRear Admiral");
        assert!(prompt.contains("Grace Hopper\nRear Admiral"));
        assert!(prompt.contains("Do NOT invent"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
