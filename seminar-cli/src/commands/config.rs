use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::config::Config;

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let config = Config::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Downloads:  {}", config.download_dir.display());
    println!();
    println!("{}", "API".bold());
    println!("  URL:        {}", config.api_url);
    println!(
        "  Token:      {}",
        if config.api_token.is_some() { "set" } else { "not set" }
    );

    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    Config::create_default_config(&config_path)?;
    println!("{} Wrote {}", "✓".green(), config_path.display());
    Ok(())
}
