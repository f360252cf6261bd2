//! Placeholder resolution for prompt templates.
//!
//! Three names are recognized: `Prompt`, `PersonaName` and `UserName`, each
//! in the forms `$Name`, `${Name}` and bare `Name` at word boundaries,
//! case-insensitively. Substitution is a single literal pass: replacement
//! values are never re-scanned, unknown placeholders stay verbatim, and a
//! backslash in front of `$` keeps that occurrence literal.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::session::SessionParams;

pub const PROMPT_KEY: &str = "Prompt";
pub const PERSONA_KEY: &str = "PersonaName";
pub const USER_KEY: &str = "UserName";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alt = format!("{}|{}|{}", PROMPT_KEY, PERSONA_KEY, USER_KEY);
        let pattern = format!(
            r"(?i)(?P<esc>\\)?\$(?:\{{(?P<braced>{alt})\}}|(?P<plain>{alt})\b)|\b(?P<bare>{alt})\b"
        );
        Regex::new(&pattern).expect("placeholder pattern is valid")
    })
}

fn message_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?P<esc>\\)?\$\{?Message\}?").expect("message pattern is valid"))
}

/// Resolve the three recognized placeholders against current parameter
/// values. Never fails: wherever no match occurs the template passes
/// through unchanged.
pub fn resolve(template: &str, params: &SessionParams) -> String {
    let values = [
        (PROMPT_KEY, params.prompt_template.as_str()),
        (PERSONA_KEY, params.persona_name.as_str()),
        (USER_KEY, params.user_name.as_str()),
    ];

    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            if caps.name("esc").is_some() {
                // Escaped: drop the backslash, keep the placeholder text.
                return caps[0][1..].to_string();
            }
            let key = caps
                .name("braced")
                .or_else(|| caps.name("plain"))
                .or_else(|| caps.name("bare"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            values
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Substitute `$Message` / `${Message}` with the user's text. Returns the
/// expanded template and whether any unescaped occurrence was replaced, so
/// the caller can fall back to plain concatenation.
pub fn resolve_message(template: &str, text: &str) -> (String, bool) {
    let mut found = false;
    let expanded = message_regex()
        .replace_all(template, |caps: &Captures| {
            if caps.name("esc").is_some() {
                return caps[0][1..].to_string();
            }
            found = true;
            text.to_string()
        })
        .into_owned();
    (expanded, found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SessionParams {
        SessionParams {
            persona_name: "Emily".to_string(),
            user_name: "Sam".to_string(),
            prompt_template: "the prompt".to_string(),
            ..SessionParams::default()
        }
    }

    #[test]
    fn substitutes_all_three_forms() {
        let out = resolve("$PersonaName talks to ${UserName} about $Prompt", &params());
        assert_eq!(out, "Emily talks to Sam about the prompt");
    }

    #[test]
    fn bare_names_match_at_word_boundaries() {
        assert_eq!(resolve("dear personaname!", &params()), "dear Emily!");
        // No boundary, no substitution.
        assert_eq!(resolve("PersonaNames", &params()), "PersonaNames");
        assert_eq!(resolve("$PersonaNames", &params()), "$PersonaNames");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(resolve("$PERSONANAME and ${username}", &params()), "Emily and Sam");
    }

    #[test]
    fn escaped_occurrences_stay_literal() {
        let out = resolve(r"\$PersonaName is $PersonaName", &params());
        assert_eq!(out, "$PersonaName is Emily");
    }

    #[test]
    fn unknown_placeholders_pass_through() {
        assert_eq!(resolve("$Unknown and ${Nope}", &params()), "$Unknown and ${Nope}");
    }

    #[test]
    fn replacement_values_are_not_rescanned() {
        let mut p = params();
        p.persona_name = "$UserName".to_string();
        assert_eq!(resolve("$PersonaName", &p), "$UserName");
    }

    #[test]
    fn message_placeholder_is_substituted_everywhere() {
        let (out, found) = resolve_message("say $Message, then ${Message}", "hi");
        assert!(found);
        assert_eq!(out, "say hi, then hi");
    }

    #[test]
    fn message_placeholder_is_case_insensitive() {
        let (out, found) = resolve_message("$MESSAGE", "hi");
        assert!(found);
        assert_eq!(out, "hi");
    }

    #[test]
    fn escaped_message_placeholder_does_not_count_as_found() {
        let (out, found) = resolve_message(r"keep \$Message here", "hi");
        assert!(!found);
        assert_eq!(out, "keep $Message here");
    }

    #[test]
    fn template_without_placeholder_reports_not_found() {
        let (out, found) = resolve_message("no placeholder", "hi");
        assert!(!found);
        assert_eq!(out, "no placeholder");
    }
}
