use crate::sbom_generation::domain::ComponentKind;
use regex::Regex;
use std::sync::LazyLock;

/// Build-configuration file holding the package version of a library directory
pub const BUILD_CONFIG_FILE: &str = "configure.ac";

static AC_INIT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"AC_INIT\s*\(\s*\[?[\w\-]+\]?\s*,\s*\[?([0-9][^,\]\) ]+)")
        .expect("AC_INIT pattern is valid")
});

/// Directories inside a toolchain source tree that are not libraries but
/// ship as their own components
const NON_LIBRARY_COMPONENTS: &[(&str, ComponentKind)] = &[
    ("fastjar", ComponentKind::Application),
    ("gnattools", ComponentKind::Application),
    ("treelang", ComponentKind::Application),
    ("fixincludes", ComponentKind::Application),
    ("gcj", ComponentKind::Compiler),
];

/// SourceComponentRules holds the naming and version rules for source trees
pub struct SourceComponentRules;

impl SourceComponentRules {
    /// Top-level directories named `lib*` are library components
    pub fn is_library_dir(name: &str) -> bool {
        name.starts_with("lib")
    }

    /// Component kind for a directory with a recognised special name
    pub fn special_component_kind(name: &str) -> Option<ComponentKind> {
        NON_LIBRARY_COMPONENTS
            .iter()
            .find(|(special, _)| *special == name)
            .map(|(_, kind)| *kind)
    }

    /// Version given as the second argument of the `AC_INIT` macro
    ///
    /// Only values starting with a digit are accepted; macro calls like
    /// `AC_INIT([pkg], m4_esyscmd(...))` yield `None`.
    pub fn parse_ac_init_version(content: &str) -> Option<String> {
        AC_INIT_VERSION
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
