use colored::Colorize;
use std::sync::Arc;

use crate::api::TransportClient;
use crate::commands::Command;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::logging;
use crate::models::{ChatRequest, ChatResponse, Message};
use crate::template;
use crate::tokenizer::Tokenizer;

use super::history::ConversationHistory;
use super::params::SessionParams;

/// Asks the user whether a failed request should be resent. Injected so the
/// session stays testable without a real terminal.
pub trait RetryPrompt: Send {
    fn should_retry(&mut self, detail: &str) -> bool;
}

/// Never retries; for non-interactive callers.
pub struct NoRetry;

impl RetryPrompt for NoRetry {
    fn should_retry(&mut self, _detail: &str) -> bool {
        false
    }
}

/// One running conversation: message history, parameters, and the
/// request/response lifecycle against the chat completions endpoint.
///
/// One turn at a time; `post` must not be called concurrently.
pub struct ChatSession {
    config: SessionConfig,
    params: SessionParams,
    api_key: String,
    /// Per-turn template, re-resolved from `params` on reset.
    prompt: String,
    history: ConversationHistory,
    tokenizer: Arc<dyn Tokenizer>,
    transport: Arc<dyn TransportClient>,
    retry: Box<dyn RetryPrompt>,
}

impl ChatSession {
    pub fn new(
        config: SessionConfig,
        params: SessionParams,
        api_key: impl Into<String>,
        tokenizer: Arc<dyn Tokenizer>,
        transport: Arc<dyn TransportClient>,
        retry: Box<dyn RetryPrompt>,
    ) -> Result<Self, SessionError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SessionError::MissingApiKey);
        }

        let (prompt, system) = resolve_templates(&params);
        Ok(Self {
            history: ConversationHistory::new(Message::system(system)),
            prompt,
            config,
            params,
            api_key,
            tokenizer,
            transport,
            retry,
        })
    }

    /// Send one conversational turn and return the assistant's reply.
    ///
    /// The request carries the template-expanded form of `user_text`, while
    /// the transcript keeps the raw text. A failed exchange is offered for
    /// retry with the identical serialized body; declining yields an empty
    /// reply with only the user turn recorded.
    pub async fn post(&mut self, user_text: &str) -> Result<String, SessionError> {
        let (expanded, substituted) = template::resolve_message(&self.prompt, user_text);
        let message = if substituted {
            expanded
        } else {
            format!("{}\n{}", self.prompt, user_text)
        };

        let body = self.build_request_body(Message::user(message))?;
        logging::log_request(&self.config.api_url, &body, self.config.debug);

        self.history.push(Message::user(user_text));
        Ok(self.exchange(&body).await)
    }

    /// Start the conversation over, re-reading current parameter values
    /// into both templates. In-flight requests are unaffected.
    pub fn reset(&mut self) {
        let (prompt, system) = resolve_templates(&self.params);
        self.prompt = prompt;
        self.history.reset(Message::system(system));
    }

    /// Apply a runtime command to the session parameters, returning a line
    /// describing what happened. Never touches history except for `Reset`.
    pub fn apply_command(&mut self, command: &Command) -> String {
        match command {
            Command::SetMaxTokens(value) => {
                let clamped = (*value).clamp(0, self.config.budget_ceiling as i64) as u32;
                self.params.max_tokens = clamped;
                format!("max_tokens set to {}", clamped)
            }
            Command::SetTemperature(value) => {
                let clamped = value.clamp(0.0, 2.0);
                self.params.temperature = clamped;
                format!("temperature set to {}", clamped)
            }
            Command::Reset => {
                self.reset();
                "conversation reset".to_string()
            }
            Command::Exit => "exiting".to_string(),
        }
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SessionParams {
        &mut self.params
    }

    pub fn history(&self) -> &[Message] {
        self.history.messages()
    }

    /// Evict oldest turns until history plus the candidate turn fit the
    /// token budget, then serialize the request once. The serialized body is
    /// what every retry re-sends.
    fn build_request_body(&mut self, candidate: Message) -> Result<String, SessionError> {
        let limit = self
            .config
            .budget_ceiling
            .saturating_sub(self.params.max_tokens as usize);

        let request = loop {
            let mut messages = self.history.messages().to_vec();
            messages.push(candidate.clone());

            let text = messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let estimate = self.tokenizer.count(&text);

            if estimate + self.config.safety_margin < limit {
                if self.config.debug {
                    eprintln!("Message is {} tokens in size.", estimate);
                }
                break self.request_for(messages);
            }

            // Over budget: drop the oldest turn after the system message.
            // With nothing left to evict, send the oversized request anyway
            // rather than looping forever.
            if !self.history.evict_oldest() {
                eprintln!(
                    "{} Conversation exceeds the token budget even after eviction (~{} tokens).",
                    "⚠️".yellow(),
                    estimate
                );
                break self.request_for(messages);
            }
        };

        Ok(serde_json::to_string(&request)?)
    }

    fn request_for(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            frequency_penalty: self.params.frequency_penalty,
            presence_penalty: self.params.presence_penalty,
            top_p: self.params.top_p,
        }
    }

    /// One exchange against the endpoint, re-issuing the identical body for
    /// as long as the retry prompt says yes. Declined failures produce an
    /// empty reply and leave history alone.
    async fn exchange(&mut self, body: &str) -> String {
        loop {
            let failure = match self
                .transport
                .send(&self.config.api_url, &self.api_key, body.to_string())
                .await
            {
                Ok(reply) if reply.success => {
                    let content = extract_reply(&reply.body);
                    self.history.push(Message::assistant(content.clone()));
                    return content;
                }
                Ok(reply) => format!(
                    "request failed with status code {}: {}",
                    reply.status, reply.body
                ),
                Err(err) => err.to_string(),
            };

            eprintln!("{} {}", "Request error:".bright_red().bold(), failure);
            if !self.retry.should_retry(&failure) {
                return String::new();
            }
        }
    }
}

fn resolve_templates(params: &SessionParams) -> (String, String) {
    let prompt = template::resolve(&params.prompt_template, params);
    // The system template sees the already-resolved prompt as $Prompt.
    let mut with_prompt = params.clone();
    with_prompt.prompt_template = prompt.clone();
    let system = template::resolve(&params.sys_prompt_template, &with_prompt);
    (prompt, system)
}

/// First choice's message content. An unparsable or choice-less payload
/// degrades to an empty reply so one bad response never stalls the loop.
fn extract_reply(body: &str) -> String {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(response) => response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default(),
        Err(err) => {
            eprintln!("{} malformed response payload: {}", "⚠️".yellow(), err);
            String::new()
        }
    }
}
