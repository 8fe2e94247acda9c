//! Doctor command - verify configuration before summarizing.

use crate::chunking::ChunkingConfig;
use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<&str>) -> anyhow::Result<()> {
    Output::header("Precis Doctor");
    println!();

    let sections: Vec<(&str, Vec<CheckResult>)> = vec![
        ("LLM", vec![check_api_key(settings), check_llm_endpoint(settings)]),
        ("Pipeline", vec![check_chunking(settings), check_prompts_dir(settings)]),
        ("Configuration", vec![check_config_file(config_path)]),
    ];

    for (title, checks) in &sections {
        println!("{}", style(title).bold());
        for check in checks {
            check.print();
        }
        println!();
    }

    let checks: Vec<&CheckResult> = sections.iter().flat_map(|(_, c)| c.iter()).collect();
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Precis.",
            errors
        ));
        anyhow::bail!("{} configuration error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Precis is ready to use.");
    }

    Ok(())
}

/// Check that an API key resolves, showing it masked.
fn check_api_key(settings: &Settings) -> CheckResult {
    let name = settings.llm.api_key_env.as_str();
    match settings.llm.resolve_api_key() {
        Some(key) => CheckResult::ok(name, &format!("configured ({})", mask_key(&key))),
        None => CheckResult::error(
            name,
            "not set",
            &format!("Set with: export {}='...' or llm.api_key in the config", name),
        ),
    }
}

fn check_llm_endpoint(settings: &Settings) -> CheckResult {
    match url::Url::parse(&settings.llm.base_url) {
        Ok(_) => CheckResult::ok(
            "Endpoint",
            &format!("{} ({})", settings.llm.base_url, settings.llm.model),
        ),
        Err(e) => CheckResult::error(
            "Endpoint",
            &format!("invalid base URL: {}", e),
            "Set llm.base_url to an OpenAI-compatible API base",
        ),
    }
}

fn check_chunking(settings: &Settings) -> CheckResult {
    match ChunkingConfig::try_from(&settings.chunking) {
        Ok(cfg) => CheckResult::ok(
            "Chunking",
            &format!("{} chars, {} overlap", cfg.chunk_size, cfg.chunk_overlap),
        ),
        Err(e) => CheckResult::error("Chunking", &e.to_string(), "Lower chunking.chunk_overlap"),
    }
}

fn check_prompts_dir(settings: &Settings) -> CheckResult {
    match settings.prompts.custom_dir.as_deref() {
        None => CheckResult::ok("Prompts", "defaults"),
        Some(dir) => {
            let path = Settings::expand_path(dir);
            if path.join("summary.toml").exists() {
                CheckResult::ok("Prompts", &format!("{}", path.display()))
            } else {
                CheckResult::warning(
                    "Prompts",
                    &format!("{} has no summary.toml", path.display()),
                    "Default prompts will be used",
                )
            }
        }
    }
}

/// Check if config file exists.
fn check_config_file(config_path: Option<&str>) -> CheckResult {
    let config_path = config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Settings::default_config_path);
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: precis config init",
        )
    }
}

/// Show the first and last characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
