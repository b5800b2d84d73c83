use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{error::FolioError, types::Project};

const EMBEDDED_PROJECTS: &str = include_str!("../../data/projects.json");

/// The distinguished category that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => CategoryFilter::All,
            Some(category) => CategoryFilter::Only(category.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }

    /// Keeps the input order. An unknown category yields nothing.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        match self {
            CategoryFilter::All => projects.iter().collect(),
            CategoryFilter::Only(category) => projects
                .iter()
                .filter(|project| project.in_category(category))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Result<Self, FolioError> {
        let mut seen = HashSet::new();
        for project in &projects {
            if !is_url_safe(&project.slug) {
                return Err(FolioError::InvalidSlug(project.slug.clone()));
            }
            if !seen.insert(project.slug.as_str()) {
                return Err(FolioError::DuplicateSlug(project.slug.clone()));
            }
        }
        Ok(Catalog { projects })
    }

    pub fn embedded() -> Result<Self, FolioError> {
        let projects = serde_json::from_str::<Vec<Project>>(EMBEDDED_PROJECTS)?;
        Catalog::new(projects)
    }

    /// Prefers a local override file when one exists, else the table built
    /// into the binary.
    pub fn load(local_projects_path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path = local_projects_path.as_ref();
        if path.is_file() {
            tracing::info!("Loading projects from {}", path.display());
            Catalog::new(load_from_storage(path)?)
        } else {
            tracing::debug!("No local projects at {}, using built-in table", path.display());
            Catalog::embedded()
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }

    pub fn get(&self, slug: &str) -> Result<&Project, FolioError> {
        self.find(slug)
            .ok_or_else(|| FolioError::ProjectNotFound(slug.to_string()))
    }

    /// "All" followed by every category in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for category in self.projects.iter().flat_map(|project| &project.categories) {
            if !categories.contains(&category.as_str()) {
                categories.push(category);
            }
        }
        categories
    }

    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Project> {
        filter.apply(&self.projects)
    }
}

/// Lowercase ASCII alphanumeric runs joined by single hyphens.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

pub fn load_from_storage(path: impl AsRef<Path>) -> Result<Vec<Project>, FolioError> {
    let file = File::open(path)?;
    let mut buffer: Vec<u8> = Vec::new();
    let size = BufReader::new(file).read_to_end(&mut buffer)?;
    tracing::debug!("Local projects data size: {}", size);
    match serde_json::from_slice::<Vec<Project>>(&buffer) {
        Ok(projects) => Ok(projects),
        Err(error) => {
            tracing::error!("Local projects data structure is incorrect: {}", error);
            Err(error.into())
        }
    }
}
