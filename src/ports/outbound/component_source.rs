use crate::sbom_generation::domain::Component;
use crate::shared::Result;
use std::path::Path;

/// ComponentSource port for discovering components in an unpacked source tree
pub trait ComponentSource {
    /// Discovers library, application and compiler components under `root`
    ///
    /// # Arguments
    /// * `root` - Top-level directory of the extracted sources
    ///
    /// # Returns
    /// Components in traversal order; versions that cannot be determined
    /// are recorded as `unknown`
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or is not a directory.
    fn discover_components(&self, root: &Path) -> Result<Vec<Component>>;
}

impl<T: ComponentSource + ?Sized> ComponentSource for &T {
    fn discover_components(&self, root: &Path) -> Result<Vec<Component>> {
        (**self).discover_components(root)
    }
}
