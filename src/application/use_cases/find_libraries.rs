use crate::ports::outbound::{LibraryInspector, ProgressReporter};
use crate::sbom_generation::domain::FetchTarget;
use crate::sbom_generation::services::LibraryVersionRules;
use crate::shared::Result;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// FindLibrariesUseCase - Derives fetch targets from the libraries binaries link against
///
/// # Type Parameters
/// * `I` - LibraryInspector implementation
/// * `P` - ProgressReporter implementation
pub struct FindLibrariesUseCase<I, P> {
    inspector: I,
    progress_reporter: P,
    rules: LibraryVersionRules,
}

impl<I, P> FindLibrariesUseCase<I, P>
where
    I: LibraryInspector,
    P: ProgressReporter,
{
    pub fn new(inspector: I, progress_reporter: P, rules: LibraryVersionRules) -> Self {
        Self {
            inspector,
            progress_reporter,
            rules,
        }
    }

    /// Lists `name:version` targets for the shared libraries linked by the
    /// binaries in `binaries_dir`
    ///
    /// Libraries are processed in sorted order and the first version found
    /// for a component name wins. Libraries without a resolvable path or a
    /// recognisable version are left out.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed or the library
    /// cache cannot be read.
    pub async fn execute(&self, binaries_dir: &Path) -> Result<Vec<FetchTarget>> {
        let binaries = self.inspector.list_binaries(binaries_dir)?;
        self.progress_reporter.report(&format!(
            "🔗 Inspecting {} binar{} in {}",
            binaries.len(),
            if binaries.len() == 1 { "y" } else { "ies" },
            binaries_dir.display()
        ));

        let mut libraries = BTreeSet::new();
        for binary in &binaries {
            if let Some(report) = self.inspector.linked_libraries(binary).await {
                LibraryVersionRules::parse_linked_libraries(&report, &mut libraries);
            }
        }

        if libraries.is_empty() {
            self.progress_reporter
                .report_completion("ℹ️  No linked shared libraries found");
            return Ok(Vec::new());
        }

        let cache_listing = self.inspector.library_cache().await?;

        let mut targets = Vec::new();
        let mut seen_names = HashSet::new();
        for library in &libraries {
            let Some(path) = LibraryVersionRules::resolve_library_path(&cache_listing, library) else {
                continue;
            };
            let Some(strings) = self.inspector.printable_strings(Path::new(&path)).await else {
                continue;
            };
            let Some(version) = LibraryVersionRules::extract_version(&strings) else {
                continue;
            };

            let name = self.rules.component_name(library);
            if !seen_names.insert(name.clone()) {
                continue;
            }
            match FetchTarget::new(name, version) {
                Ok(target) => targets.push(target),
                Err(e) => self
                    .progress_reporter
                    .report_error(&format!("⚠️  Warning: {}", e)),
            }
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Found {} versioned librar{} out of {} linked",
            targets.len(),
            if targets.len() == 1 { "y" } else { "ies" },
            libraries.len()
        ));

        Ok(targets)
    }
}
