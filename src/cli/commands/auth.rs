use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::google::GoogleAuth;
use crate::ui::messages::success;

/// Handle the `auth` command: refresh or obtain a token right away.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Auth { reset } = &cli.command {
        let auth = GoogleAuth::from_config(cfg)?;
        if *reset {
            auth.reset()?;
        }

        let token = auth.access_token()?;
        let offset = cfg.offset()?;
        success(format!(
            "Signed in. Token cached at {} (valid until {}).",
            auth.token_path().display(),
            token.expires_at.with_timezone(&offset).format("%d/%m/%Y %H:%M")
        ));
    }
    Ok(())
}
