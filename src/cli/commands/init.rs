use crate::cli::commands::config_path;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the configuration directory and writes a configuration file
/// with every default spelled out. An existing file is left alone.
/// With `--test` nothing is written.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = config_path(cli);

    println!("⚙️  Initializing projtime…");
    println!("📄 Config file : {}", path.display());

    if path.exists() {
        info("Configuration file already exists, leaving it unchanged.");
        return Ok(());
    }

    if cli.test {
        info("Test mode: configuration file not written.");
        return Ok(());
    }

    let cfg = Config::default();
    cfg.save(&path)?;
    success(format!("Configuration written to {}", path.display()));

    println!("🔑 OAuth client : {}", cfg.credentials_file);
    println!("   Download an OAuth client (Desktop app) from the Google Cloud console");
    println!("   and save it there, then run `projtime auth`.");
    Ok(())
}
