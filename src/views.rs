use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    core::{
        contact::{ContactForm, ContactMessage, SubmitStatus, Toast},
        content::{Article, ArticleSummary},
        data::CategoryFilter,
        gallery::{Carousel, Lightbox, Position},
        media::Video,
        nav::Navigation,
    },
    error::FolioError,
    site::Site,
    types::{
        ContactInfo, Experience, Project, ProjectImage, ProjectLink, Service, SiteMeta, Skill,
        SocialLink, Stat, Technology, Testimonial,
    },
};

pub const RESUME_URL: &str = "/resume";
const HOME_SERVICES: usize = 3;
const HOME_PROJECTS: usize = 2;
const HOME_ARTICLES: usize = 3;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero<'a> {
    pub name: &'a str,
    pub headline: &'a str,
    pub intro: &'a str,
    pub portrait: &'a str,
    pub socials: &'a [SocialLink],
    pub resume_url: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard<'a> {
    pub slug: &'a str,
    pub href: String,
    pub title: &'a str,
    pub image: &'a str,
    pub description: &'a str,
    pub categories: &'a [String],
    pub technologies: &'a [Technology],
    pub links: &'a [ProjectLink],
}

impl<'a> From<&'a Project> for ProjectCard<'a> {
    fn from(project: &'a Project) -> Self {
        ProjectCard {
            slug: &project.slug,
            href: format!("/projects/{}", project.slug),
            title: &project.title,
            image: &project.image,
            description: &project.description,
            categories: &project.categories,
            technologies: &project.technologies,
            links: &project.links,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView<'a> {
    pub meta: &'a SiteMeta,
    pub nav: Navigation,
    pub hero: Hero<'a>,
    pub analytics: &'a [Stat],
    pub services: &'a [Service],
    pub featured_projects: Vec<ProjectCard<'a>>,
    pub recent_articles: Vec<ArticleSummary>,
    pub testimonials: &'a [Testimonial],
}

pub fn home<'a>(site: &'a Site, path: &str) -> HomeView<'a> {
    let profile = &site.profile;
    let mut recent_articles = site.library.summaries(None);
    recent_articles.truncate(HOME_ARTICLES);
    HomeView {
        meta: &profile.meta,
        nav: Navigation::for_path(path),
        hero: Hero {
            name: &profile.name,
            headline: &profile.headline,
            intro: &profile.intro,
            portrait: &profile.portrait,
            socials: &profile.socials,
            resume_url: RESUME_URL,
        },
        analytics: &profile.analytics,
        services: &profile.services[..profile.services.len().min(HOME_SERVICES)],
        featured_projects: site
            .catalog
            .projects()
            .iter()
            .take(HOME_PROJECTS)
            .map(ProjectCard::from)
            .collect(),
        recent_articles,
        testimonials: &profile.testimonials,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView<'a> {
    pub nav: Navigation,
    pub name: &'a str,
    pub portrait: &'a str,
    pub bio: &'a [String],
    pub stats: &'a [Stat],
    pub skills: &'a [Skill],
    pub experience: &'a [Experience],
}

pub fn about<'a>(site: &'a Site, path: &str) -> AboutView<'a> {
    let profile = &site.profile;
    AboutView {
        nav: Navigation::for_path(path),
        name: &profile.name,
        portrait: &profile.portrait,
        bio: &profile.bio,
        stats: &profile.stats,
        skills: &profile.skills,
        experience: &profile.experience,
    }
}

#[derive(Serialize)]
pub struct ServicesView<'a> {
    pub nav: Navigation,
    pub services: &'a [Service],
}

pub fn services<'a>(site: &'a Site, path: &str) -> ServicesView<'a> {
    ServicesView {
        nav: Navigation::for_path(path),
        services: &site.profile.services,
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ProjectsQuery {
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTab<'a> {
    pub name: &'a str,
    pub active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsView<'a> {
    pub nav: Navigation,
    pub active_category: String,
    pub categories: Vec<CategoryTab<'a>>,
    pub projects: Vec<ProjectCard<'a>>,
}

pub fn projects<'a>(site: &'a Site, path: &str, query: &ProjectsQuery) -> ProjectsView<'a> {
    let filter = CategoryFilter::parse(query.category.as_deref());
    let categories = site
        .catalog
        .categories()
        .into_iter()
        .map(|name| CategoryTab {
            name,
            active: name == filter.name(),
        })
        .collect();
    ProjectsView {
        nav: Navigation::for_path(path),
        active_category: filter.name().to_string(),
        categories,
        projects: site
            .catalog
            .filter(&filter)
            .into_iter()
            .map(ProjectCard::from)
            .collect(),
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GalleryQuery {
    pub image: Option<String>,
    pub lightbox: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView<'a> {
    #[serde(flatten)]
    pub position: Position,
    pub image: &'a ProjectImage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailView<'a> {
    pub nav: Navigation,
    pub project: &'a Project,
    pub video: Option<Video>,
    pub gallery: Option<GalleryView<'a>>,
    pub lightbox: Option<GalleryView<'a>>,
}

pub fn project_detail<'a>(
    site: &'a Site,
    path: &str,
    slug: &str,
    query: &GalleryQuery,
) -> Result<ProjectDetailView<'a>, FolioError> {
    let project = site.catalog.get(slug)?;
    let images = &project.images;
    let gallery = Carousel::starting_at(images.len(), image_index(query.image.as_deref()));

    let lightbox = gallery.and_then(|gallery| {
        let mut lightbox = Lightbox::closed(images.len())?;
        match query.lightbox.as_deref().map(str::trim) {
            None => {}
            Some("") | Some("open") => lightbox.open_from(&gallery),
            Some(value) => match value.parse::<usize>() {
                Ok(index) => lightbox.open_at(index),
                Err(_) => tracing::debug!("Ignoring lightbox value \"{}\"", value),
            },
        }
        lightbox.is_open().then_some(lightbox)
    });

    Ok(ProjectDetailView {
        nav: Navigation::for_path(path),
        project,
        video: Video::for_project(project),
        gallery: gallery.map(|gallery| GalleryView {
            position: gallery.position(),
            image: &images[gallery.index()],
        }),
        lightbox: lightbox.map(|lightbox| GalleryView {
            position: lightbox.position(),
            image: &images[lightbox.index()],
        }),
    })
}

/// Anything but a non-negative integer starts the gallery at the first image.
fn image_index(value: Option<&str>) -> usize {
    match value.map(str::trim) {
        None | Some("") => 0,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::debug!("Ignoring image value \"{}\"", value);
            0
        }),
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct BlogQuery {
    pub tag: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub nav: Navigation,
    pub tag: Option<String>,
    pub featured: Option<ArticleSummary>,
    pub articles: Vec<ArticleSummary>,
}

pub fn blog(site: &Site, path: &str, query: &BlogQuery) -> BlogView {
    let tag = query
        .tag
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty());
    let mut articles = site.library.summaries(tag).into_iter();
    BlogView {
        nav: Navigation::for_path(path),
        tag: tag.map(str::to_string),
        featured: articles.next(),
        articles: articles.collect(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView<'a> {
    pub nav: Navigation,
    pub requested_slug: String,
    pub fallback: bool,
    pub article: &'a Article,
}

pub fn article<'a>(site: &'a Site, path: &str, slug: &str) -> ArticleView<'a> {
    let resolved = site.library.resolve(slug);
    ArticleView {
        nav: Navigation::for_path(path),
        requested_slug: slug.to_string(),
        fallback: resolved.fallback,
        article: resolved.article,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub fields: ContactMessage,
    pub status: SubmitStatus,
    pub submit_enabled: bool,
    pub toast: Option<Toast>,
}

impl From<&ContactForm> for FormView {
    fn from(form: &ContactForm) -> Self {
        FormView {
            fields: form.fields().clone(),
            status: form.status(),
            submit_enabled: form.submit_enabled(),
            toast: form.toast().cloned(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPageView<'a> {
    pub nav: Navigation,
    pub contact: &'a [ContactInfo],
    pub socials: &'a [SocialLink],
    pub form: FormView,
}

pub fn contact<'a>(site: &'a Site, path: &str) -> ContactPageView<'a> {
    ContactPageView {
        nav: Navigation::for_path(path),
        contact: &site.profile.contact,
        socials: &site.profile.socials,
        form: FormView::from(&ContactForm::new()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOutcomeView {
    pub submission_id: Uuid,
    pub form: FormView,
}
