// Prompt fragments shared across features. Feature prompts live next to the feature
// (see ai::prompts).

/// Reminder that the model must not embellish the candidate's record.
pub const FIDELITY_INSTRUCTION: &str = "\
    Use only facts present in the provided material. Do NOT invent employers, \
    dates, degrees, or skills. Leave a field empty rather than guessing.";
