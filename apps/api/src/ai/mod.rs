pub mod ats;
pub mod handlers;
pub mod import;
pub mod pdf_text;
pub mod prompts;
pub mod upload;
