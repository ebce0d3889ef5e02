use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Write a configuration file, prompting for the component registry.
    Init {
        /// Write the built-in defaults without prompting.
        #[arg(long)]
        defaults: bool,
        /// Replace an existing configuration file.
        #[arg(long)]
        force: bool,
    },
    /// Show the effective configuration.
    Show,
}

pub fn run(command: ConfigCommand, path: &Path) -> AppResult<()> {
    match command {
        ConfigCommand::Init { defaults, force } => run_init(path, defaults, force),
        ConfigCommand::Show => run_show(path),
    }
}

fn run_init(path: &Path, defaults: bool, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::Configuration(format!(
            "{} already exists, pass --force to replace it",
            path.display()
        )));
    }

    let mut cfg = AppConfig::default();
    if !defaults {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut stdout = io::stdout();
        prompt_registry(&mut cfg, &mut input, &mut stdout)?;
    }

    cfg.save(path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> AppResult<()> {
    let cfg = if path.exists() {
        AppConfig::read(path)?
    } else {
        AppConfig::default()
    };

    println!("Configuration file: {}", display_path(path));
    println!("Triage section: {}", cfg.triage_section);
    println!("Repositories:");
    for (component, repository) in cfg.registry().iter() {
        println!("  {component} -> {repository}");
    }
    println!("Section rules (last match wins):");
    for rule in &cfg.sections {
        println!("  {} <- {}", rule.section, rule.keywords.join(", "));
    }
    Ok(())
}

/// Asks for the repository of each known component, then for extra ones.
fn prompt_registry(
    cfg: &mut AppConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> AppResult<()> {
    writeln!(output, "Configuring changelog components.")?;
    writeln!(output, "Press Enter to keep the current value, '-' to remove it.")?;
    writeln!(output)?;

    let components: Vec<String> = cfg.repositories.keys().cloned().collect();
    for component in components {
        let current = cfg.repositories.get(&component).cloned();
        let field = format!("Repository for component '{component}'");
        match prompt(&field, current.as_deref(), input, output)? {
            PromptAction::Keep => {}
            PromptAction::Clear => {
                cfg.repositories.remove(&component);
            }
            PromptAction::Set(value) => {
                cfg.repositories.insert(component, value);
            }
        }
    }

    loop {
        let PromptAction::Set(component) =
            prompt("Additional component label", None, input, output)?
        else {
            break;
        };
        let field = format!("Repository for component '{component}' (owner/repo)");
        if let PromptAction::Set(repository) = prompt(&field, None, input, output)? {
            cfg.repositories.insert(component, repository);
        }
    }

    if let PromptAction::Set(section) =
        prompt("Triage section", Some(cfg.triage_section.as_str()), input, output)?
    {
        cfg.triage_section = section;
    }
    Ok(())
}

fn prompt(
    field: &str,
    current: Option<&str>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> AppResult<PromptAction> {
    match current {
        Some(value) => write!(output, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(output, "{field} (Enter to skip): ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not created, using defaults)", path.display())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
