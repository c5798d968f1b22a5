use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    for (key, value) in entries(&config) {
        println!("  {:<26} {}", key.cyan(), value);
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key,
        value,
        path.display()
    );
    Ok(())
}

/// Effective value for every key, defaults filled in.
fn entries(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("defaults.theme", config.theme().to_string()),
        (
            "defaults.swipe_threshold",
            config.swipe_threshold().to_string(),
        ),
        (
            "defaults.start_slide",
            config
                .start_slide()
                .map_or_else(|| "first".to_string(), |n| n.to_string()),
        ),
    ]
}
