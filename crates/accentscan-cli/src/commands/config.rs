use anyhow::Result;
use std::path::Path;

use accentscan_core::config::Config;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("accentscan configuration\n");

    // api_key is never serialized
    print!("{}", toml::to_string_pretty(&config)?);

    let key_state = if config.has_api_key() { "(set)" } else { "(not set)" };
    println!("\n# openai.api_key = {}", key_state);
    if config.paths.ffmpeg.is_none() {
        println!("# paths.ffmpeg = (auto-detect)");
    }
    if config.temp.directory.is_none() {
        println!("# temp.directory = (system temp)");
    }

    // Show config file locations
    println!("\nConfig file locations (in priority order, last wins):");
    if let Some(p) = Config::default_path() {
        println!("  1. {}", p.display());
    }
    if let Some(p) = config_path {
        println!("  2. {} (specified)", p.display());
    }
    println!("  3. Environment variables (ACCENTSCAN_*, nested keys joined with __)");
    println!("  4. OPENAI_API_KEY");

    Ok(())
}
