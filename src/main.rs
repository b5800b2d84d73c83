use std::{io::Result, path::Path};

use folio::{
    core::settings::{Settings, SETTINGS_PATH},
    error::FolioError,
    server::start_server,
    site::Site,
};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = match init_local_files(Path::new(SETTINGS_PATH)) {
        Ok(settings) => settings,
        Err(error) => fatal_load_error(&error),
    };
    let site = match Site::load(&settings) {
        Ok(site) => site,
        Err(error) => fatal_load_error(&error),
    };

    start_server(settings, site).await
}

/// Writes default settings on first run, otherwise loads the existing file.
fn init_local_files(settings_path: &Path) -> std::result::Result<Settings, FolioError> {
    if settings_path.is_file() {
        return Settings::load(settings_path);
    }
    let settings = Settings::new();
    settings.save(settings_path)?;
    tracing::info!("Wrote default settings to {}", settings_path.display());
    Ok(settings)
}

fn fatal_load_error(error: &FolioError) -> ! {
    tracing::error!("Startup failed: {}", error);
    std::process::exit(1);
}
