use std::fs;
use std::io;
use std::path::Path;

pub const PROMPTS_DIR: &str = "prompts";
pub const INSTRUCTIONS_FILE: &str = "instructions.txt";
pub const SYSTEM_PROMPT_FILE: &str = "system.txt";

/// Trimmed contents of `path`, or `None` when the file is missing or blank.
pub fn read_override(path: &Path) -> io::Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Optional local text that replaces parts of the request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptOverrides {
    pub instructions: Option<String>,
    pub system_prompt: Option<String>,
}

impl PromptOverrides {
    /// Read `instructions.txt` and `system.txt` from `dir`
    pub fn load(dir: &Path) -> io::Result<Self> {
        let overrides = Self {
            instructions: read_override(&dir.join(INSTRUCTIONS_FILE))?,
            system_prompt: read_override(&dir.join(SYSTEM_PROMPT_FILE))?,
        };

        tracing::debug!(
            dir = %dir.display(),
            instructions = overrides.instructions.is_some(),
            system_prompt = overrides.system_prompt.is_some(),
            "prompt overrides loaded"
        );

        Ok(overrides)
    }
}
