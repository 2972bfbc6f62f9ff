use anyhow::Result;
use std::path::Path;
use std::process::Command;

use accentscan_core::config::Config;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    println!("accentscan dependency check\n");

    let config = Config::load(config_path)?;
    let mut all_ok = true;

    // Check FFmpeg
    print!("ffmpeg:         ");
    match config.ffmpeg_path() {
        Ok(path) => match Command::new(&path).arg("-version").output() {
            Ok(out) => {
                let first_line = String::from_utf8_lossy(&out.stdout)
                    .lines()
                    .next()
                    .unwrap_or("")
                    .to_string();
                // "ffmpeg version 6.1.1 Copyright ..." -> "6.1.1"
                let version_part = first_line.split_whitespace().nth(2).unwrap_or("unknown");
                println!("OK ({}, {})", version_part, path.display());
            }
            Err(_) => {
                println!("FOUND but failed to get version ({})", path.display());
                all_ok = false;
            }
        },
        Err(_) => {
            println!("NOT FOUND");
            println!("                Install with: brew install ffmpeg");
            all_ok = false;
        }
    }

    // Check API key
    print!("OPENAI_API_KEY: ");
    if config.has_api_key() {
        println!("OK (set)");
    } else {
        println!("NOT SET");
        println!("                Export OPENAI_API_KEY before running analyze or serve");
        all_ok = false;
    }

    println!("model:          {}", config.openai.model);
    println!("endpoint:       {}", config.openai.base_url);

    // Check temp directory
    print!("temp dir:       ");
    let temp_dir = config.temp_dir();
    match tempfile::tempfile_in(&temp_dir) {
        Ok(_) => println!("OK ({})", temp_dir.display()),
        Err(e) => {
            println!("NOT WRITABLE ({}: {})", temp_dir.display(), e);
            all_ok = false;
        }
    }

    println!();
    if all_ok {
        println!("All dependencies OK!");
    } else {
        println!("Some dependencies are missing. See above for installation instructions.");
    }

    Ok(())
}
