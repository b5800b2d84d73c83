use serde::Serialize;

pub const NAV_ITEMS: [(&str, &str); 6] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Services", "/services"),
    ("Projects", "/projects"),
    ("Blog", "/blog"),
    ("Contact", "/contact"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub active: usize,
    pub items: Vec<NavItem>,
}

impl Navigation {
    pub fn for_path(path: &str) -> Self {
        let active = active_index(path);
        let items = NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(index, &(label, path))| NavItem {
                label,
                path,
                active: index == active,
            })
            .collect();
        Navigation { active, items }
    }
}

/// Longest matching section prefix, falling back to Home.
fn active_index(path: &str) -> usize {
    let path = path.trim_end_matches('/');
    NAV_ITEMS
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, (_, prefix))| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by_key(|(_, (_, prefix))| prefix.len())
        .map(|(index, _)| index)
        .unwrap_or(0)
}
