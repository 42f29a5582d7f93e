//! Icon URLs for items and machines, resolved by file stem

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

pub const MISSING_ICON: &str = "/img/missing-item.png";

#[derive(Debug, Default, Clone)]
pub struct IconIndex {
    by_name: HashMap<String, String>,
}

impl IconIndex {
    /// Index every file under `icon_dir`. A file `<icon_dir>/a/b.png` is
    /// served as `<url_prefix>/a/b.png` and named `b`.
    pub fn scan(icon_dir: &Path, url_prefix: &str) -> Self {
        let prefix = url_prefix.trim_end_matches('/');
        let mut by_name = HashMap::new();

        if !icon_dir.is_dir() {
            warn!(dir = %icon_dir.display(), "icon directory not found");
        }

        for entry in WalkDir::new(icon_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(relative) = path.strip_prefix(icon_dir) else {
                continue;
            };
            let relative: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            by_name.insert(stem.to_string(), format!("{}/{}", prefix, relative.join("/")));
        }

        info!(dir = %icon_dir.display(), icons = by_name.len(), "indexed icons");
        Self { by_name }
    }

    /// URL of the icon for an item, recipe or machine name.
    pub fn icon_for(&self, name: &str) -> &str {
        self.by_name.get(name).map_or(MISSING_ICON, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
