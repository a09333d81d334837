use crate::ports::outbound::ComponentSource;
use crate::sbom_generation::domain::{Component, ComponentKind, UNKNOWN_VERSION};
use crate::sbom_generation::services::{SourceComponentRules, BUILD_CONFIG_FILE};
use crate::shared::error::SbomError;
use crate::shared::security::MAX_FILE_SIZE;
use crate::shared::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// SourceTreeScanner adapter discovering components in an extracted source tree
///
/// Library directories are the `lib*` entries directly under the root.
/// Special application and compiler directories are found anywhere below it.
/// Directory entries are visited in file-name order and symbolic links are
/// never followed.
pub struct SourceTreeScanner;

impl SourceTreeScanner {
    pub fn new() -> Self {
        Self
    }

    /// Reads a build file lossily; unreadable or oversized files yield `None`
    fn read_build_file(path: &Path) -> Option<String> {
        let metadata = fs::symlink_metadata(path).ok()?;
        if !metadata.is_file() || metadata.len() > MAX_FILE_SIZE {
            return None;
        }
        let bytes = fs::read(path).ok()?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn library_components(root: &Path) -> Vec<Component> {
        WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !SourceComponentRules::is_library_dir(&name) {
                    return None;
                }
                let version = Self::read_build_file(&entry.path().join(BUILD_CONFIG_FILE))
                    .and_then(|content| SourceComponentRules::parse_ac_init_version(&content))
                    .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
                Some(Component::new(name, version, ComponentKind::Library))
            })
            .collect()
    }

    fn special_components(root: &Path, already_emitted: &HashSet<String>) -> Vec<Component> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut components = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
        {
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(kind) = SourceComponentRules::special_component_kind(name) else {
                continue;
            };
            if already_emitted.contains(name) || !seen.insert(name.to_string()) {
                continue;
            }
            components.push(Component::new(name, UNKNOWN_VERSION, kind));
        }

        components
    }
}

impl Default for SourceTreeScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentSource for SourceTreeScanner {
    fn discover_components(&self, root: &Path) -> Result<Vec<Component>> {
        if !root.is_dir() {
            return Err(SbomError::InputNotFound {
                path: root.to_path_buf(),
                suggestion: "Pass the directory the source archive was extracted into".to_string(),
            }
            .into());
        }

        let mut components = Self::library_components(root);
        let library_names: HashSet<String> =
            components.iter().map(|c| c.name().to_string()).collect();
        components.extend(Self::special_components(root, &library_names));

        Ok(components)
    }
}
