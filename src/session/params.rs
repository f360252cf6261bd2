/// Defaults mirror the original command-line client.
pub const DEFAULT_PERSONA_NAME: &str = "Emily";
pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_PROMPT: &str = "Act like you are a human named $PersonaName talking with $UserName.";
pub const DEFAULT_SYS_PROMPT: &str = "$Prompt";

/// Tunable conversation parameters. Owned exclusively by the session;
/// mutations only affect requests built afterwards.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub persona_name: String,
    pub user_name: String,
    /// Template wrapped around each typed message ($Message marks where the
    /// text goes; without it the text is appended on a new line).
    pub prompt_template: String,
    /// Template for the system message ($Prompt expands to the resolved
    /// prompt template).
    pub sys_prompt_template: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            persona_name: DEFAULT_PERSONA_NAME.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            prompt_template: DEFAULT_PROMPT.to_string(),
            sys_prompt_template: DEFAULT_SYS_PROMPT.to_string(),
            max_tokens: 512,
            temperature: 1.06,
            top_p: 1.0,
            frequency_penalty: 1.0,
            presence_penalty: 1.0,
        }
    }
}
