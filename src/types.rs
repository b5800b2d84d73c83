use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Technology {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectImage {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Github,
    Live,
    Download,
    Other,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectLink {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub url: String,
    pub label: String,
}

/// One portfolio work item. `slug` is the routing key under `/projects/`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub categories: Vec<String>,
    pub image: String,
    pub description: String,
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub video_src: String,
    #[serde(default)]
    pub video_thumbnail: String,
    pub images: Vec<ProjectImage>,
    pub links: Vec<ProjectLink>,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Project {
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|tag| tag == category)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Author {
    pub name: String,
    pub image: String,
    pub role: String,
}

/// Article metadata as stored in `data/articles.json`. The body lives in a
/// separate Markdown file keyed by slug.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: Author,
    pub date: NaiveDate,
    pub read_time: String,
    pub image: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub related: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Experience {
    pub period: String,
    pub title: String,
    pub company: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Service {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub image: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContactInfo {
    pub title: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Document title and description for the site's pages.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub meta: SiteMeta,
    pub name: String,
    pub headline: String,
    pub intro: String,
    pub portrait: String,
    pub bio: Vec<String>,
    pub stats: Vec<Stat>,
    pub analytics: Vec<Stat>,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub services: Vec<Service>,
    pub testimonials: Vec<Testimonial>,
    pub contact: Vec<ContactInfo>,
    pub socials: Vec<SocialLink>,
}
