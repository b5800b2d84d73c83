use serde::Serialize;

use crate::types::Project;

const YOUTUBE_ID_LEN: usize = 11;
const ID_MARKERS: [&str; 5] = ["youtu.be/", "v/", "embed/", "watch?v=", "&v="];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Video {
    Youtube { id: String, embed_url: String },
    File { src: String, poster: String },
}

impl Video {
    pub fn for_project(project: &Project) -> Option<Self> {
        if project.video_src.is_empty() {
            return None;
        }
        if is_youtube(&project.video_src) {
            if let Some(id) = youtube_id(&project.video_src) {
                let embed_url = format!(
                    "https://www.youtube.com/embed/{}?autoplay=1&mute=1&controls=1&rel=0",
                    id
                );
                return Some(Video::Youtube { id, embed_url });
            }
        }
        Some(Video::File {
            src: project.video_src.clone(),
            poster: project.video_thumbnail.clone(),
        })
    }
}

pub fn is_youtube(url: &str) -> bool {
    url.contains("youtu.be") || url.contains("youtube.com")
}

/// The id follows the last recognised marker and runs to `#`, `&` or `?`.
/// Only ids of exactly eleven characters are accepted.
pub fn youtube_id(url: &str) -> Option<String> {
    let start = ID_MARKERS
        .iter()
        .filter_map(|marker| url.rfind(marker).map(|at| at + marker.len()))
        .chain(user_marker_end(url))
        .max()?;
    let id: &str = url[start..]
        .split(|c| c == '#' || c == '&' || c == '?')
        .next()
        .unwrap_or_default();
    (id.chars().count() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

/// End of the last `u/<word char>/` segment, as in legacy channel links
/// like `/user/Name#p/u/1/<id>`.
fn user_marker_end(url: &str) -> Option<usize> {
    url.match_indices("u/")
        .filter_map(|(at, marker)| {
            let rest = &url[at + marker.len()..];
            let mut chars = rest.char_indices();
            match (chars.next(), chars.next()) {
                (Some((_, c)), Some((slash, '/'))) if c.is_ascii_alphanumeric() || c == '_' => {
                    Some(at + marker.len() + slash + 1)
                }
                _ => None,
            }
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ids_from_common_url_shapes() {
        for url in [
            "https://youtu.be/-RjEULM8a4w",
            "https://www.youtube.com/watch?v=-RjEULM8a4w",
            "https://www.youtube.com/watch?feature=share&v=-RjEULM8a4w#t=3",
            "https://www.youtube.com/embed/-RjEULM8a4w?rel=0",
        ] {
            assert_eq!(youtube_id(url).as_deref(), Some("-RjEULM8a4w"), "{}", url);
        }
    }

    #[test]
    fn extracts_ids_from_legacy_channel_links() {
        assert_eq!(
            youtube_id("https://www.youtube.com/user/SomeUser#p/u/1/-RjEULM8a4w").as_deref(),
            Some("-RjEULM8a4w")
        );
        assert_eq!(youtube_id("https://www.youtube.com/menu/ab/-RjEULM8a4w"), None);
    }

    #[test]
    fn rejects_ids_of_wrong_length() {
        assert_eq!(youtube_id("https://youtu.be/short"), None);
        assert_eq!(youtube_id("https://example.com/video.mp4"), None);
    }

    #[test]
    fn hosted_files_use_thumbnail_as_poster() {
        let catalog = crate::core::data::Catalog::embedded().unwrap();
        let project = catalog.get("close-cart").unwrap();
        assert_eq!(
            Video::for_project(project),
            Some(Video::File {
                src: "/videos/close-cart.mp4".to_string(),
                poster: "/thumbnails/close-cart-thumb.jpg".to_string(),
            })
        );

        let youtube = catalog.get("gymnai").unwrap();
        assert!(matches!(
            Video::for_project(youtube),
            Some(Video::Youtube { ref id, .. }) if id == "-RjEULM8a4w"
        ));
    }
}
