use std::collections::BTreeSet;
use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::config::CheckConfig;

/// A descriptor file found below the descriptors folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub name: String,
    /// Slash-separated path relative to the descriptors folder (`sub/name.xml`).
    pub relative_path: String,
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Sorted by `relative_path`.
    pub files: Vec<DiscoveredFile>,
    /// Traversal failures as `(path, error)`; traversal continues past them.
    pub errors: Vec<(String, String)>,
}

impl Discovery {
    pub fn included(&self) -> impl Iterator<Item = &DiscoveredFile> {
        self.files.iter().filter(|f| !f.excluded)
    }
}

fn should_walk_dir_entry(entry: &walkdir::DirEntry, config: &CheckConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    !config.skip_dirs.iter().any(|d| d.as_str() == name)
}

/// Path components after the first `folder` component, or `None` when the path does
/// not pass through `folder`.
fn components_below_folder(rel: &Path, folder: &str) -> Option<Vec<String>> {
    let mut parts = rel.components().filter_map(|c| match c {
        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
        _ => None,
    });
    parts.by_ref().find(|p| p == folder)?;
    Some(parts.collect())
}

fn is_excluded(relative_dir: &str, config: &CheckConfig) -> bool {
    config
        .excluded_subfolders
        .iter()
        .any(|fragment| relative_dir.contains(fragment.as_str()))
}

/// Walk `root` and collect every descriptor file below the descriptors folder.
///
/// A file is excluded when the directory part of its folder-relative path contains
/// any configured exclusion fragment.
pub fn discover_descriptors(root: &Path, config: &CheckConfig) -> Discovery {
    let mut out = Discovery::default();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| should_walk_dir_entry(e, config))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                tracing::warn!(%path, error = %err, "descriptor discovery failed for entry");
                out.errors.push((path, err.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(&config.descriptor_extension) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let Some(below) = components_below_folder(rel, &config.descriptors_folder) else {
            continue;
        };
        let relative_path = below.join("/");
        let relative_dir = below[..below.len().saturating_sub(1)].join("/");
        let excluded = is_excluded(&relative_dir, config);
        if excluded {
            tracing::debug!(file = %relative_path, "descriptor excluded by configuration");
        }
        if seen.insert(relative_path.clone()) {
            out.files.push(DiscoveredFile {
                name,
                relative_path,
                excluded,
            });
        }
    }

    out.files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    tracing::debug!(
        root = %root.display(),
        found = out.files.len(),
        included = out.included().count(),
        "discovered descriptor files"
    );
    out
}
