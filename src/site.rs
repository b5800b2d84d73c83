use std::path::PathBuf;

use crate::{
    core::{content::Library, data::Catalog, profile, settings::Settings},
    error::FolioError,
    types::Profile,
};

/// Everything the pages render from. Built once at startup and shared
/// read-only between workers.
#[derive(Debug, Clone)]
pub struct Site {
    pub profile: Profile,
    pub catalog: Catalog,
    pub library: Library,
    pub resume_path: PathBuf,
}

impl Site {
    pub fn load(settings: &Settings) -> Result<Self, FolioError> {
        let site = Site {
            profile: profile::embedded()?,
            catalog: Catalog::load(&settings.projects_path.value)?,
            library: Library::embedded()?,
            resume_path: PathBuf::from(&settings.resume_path.value),
        };
        tracing::info!(
            "Loaded {} projects and {} articles",
            site.catalog.projects().len(),
            site.library.summaries(None).len()
        );
        Ok(site)
    }
}
