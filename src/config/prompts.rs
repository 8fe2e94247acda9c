//! Prompt templates for Precis.
//!
//! Prompts can be customized by placing a `summary.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the two summarization stages.
///
/// Both templates receive the text to summarize as `{{text}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    /// Applied to every chunk.
    pub map: String,
    /// Applied to the joined partial summaries.
    pub combine: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            map: "Summarize the following content in 150 words:\n{{text}}\n".to_string(),
            combine: "You are given multiple partial summaries.\n\
                      Combine them into a single clear summary in about 300 words:\n{{text}}\n"
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let summary_path = crate::config::Settings::expand_path(dir).join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render the map prompt for one chunk.
    pub fn map_prompt(&self, text: &str) -> String {
        self.render_text(&self.summary.map, text)
    }

    /// Render the combine prompt for joined partial summaries.
    pub fn combine_prompt(&self, text: &str) -> String {
        self.render_text(&self.summary.combine, text)
    }

    fn render_text(&self, template: &str, text: &str) -> String {
        // Custom variables first, so `{{...}}` sequences inside the transcript stay untouched.
        let without_text: HashMap<String, String> = self
            .variables
            .iter()
            .filter(|(k, _)| k.as_str() != "text")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let template = Self::render(template, &without_text);
        template.replace("{{text}}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.summary.map.contains("150 words"));
        assert!(prompts.summary.combine.contains("300 words"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_map_prompt_with_custom_variables() {
        let mut prompts = Prompts::default();
        prompts.summary.map = "In {{lang}}: {{text}}".to_string();
        prompts.variables.insert("lang".to_string(), "French".to_string());

        assert_eq!(prompts.map_prompt("the talk"), "In French: the talk");
    }

    #[test]
    fn test_transcript_braces_are_not_rendered() {
        let mut prompts = Prompts::default();
        prompts.summary.combine = "{{text}}".to_string();
        prompts.variables.insert("lang".to_string(), "French".to_string());

        assert_eq!(prompts.combine_prompt("say {{lang}}"), "say {{lang}}");
    }

    #[test]
    fn test_load_custom_summary_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("summary.toml"),
            "map = \"Short: {{text}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.summary.map, "Short: {{text}}");
        assert!(prompts.summary.combine.contains("partial summaries"));
    }
}
