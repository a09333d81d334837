use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

static SHARED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(\S+\.so\S*)").expect("shared object pattern is valid"));

static CACHE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=>\s+(\S+)").expect("cache path pattern is valid"));

/// Tried in order against the full strings dump; the first pattern with a match wins
static VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"GNU C Library.*?version (\d+\.\d+)", r"(\d+\.\d+\.\d+)"]
        .iter()
        .map(|p| Regex::new(p).expect("version pattern is valid"))
        .collect()
});

/// Shared objects whose component name differs from the file name
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("libc.so.6", "glibc"),
    ("libm.so.6", "glibc"),
    ("libz.so.1", "zlib"),
    ("ld-linux.so.2", "ld-linux"),
    ("ld-linux-x86-64.so.2", "ld-linux"),
];

/// LibraryVersionRules turns linker and strings output into component targets
#[derive(Debug, Clone)]
pub struct LibraryVersionRules {
    aliases: HashMap<String, String>,
}

impl LibraryVersionRules {
    pub fn new() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(so, name)| (so.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Adds or overrides shared-object to component-name aliases
    pub fn with_aliases(mut self, aliases: &HashMap<String, String>) -> Self {
        for (so, name) in aliases {
            self.aliases.insert(so.clone(), name.clone());
        }
        self
    }

    /// Collects the first shared-object token of every `ldd` output line
    pub fn parse_linked_libraries(ldd_output: &str, into: &mut BTreeSet<String>) {
        for line in ldd_output.lines() {
            if let Some(caps) = SHARED_OBJECT.captures(line) {
                into.insert(caps[1].to_string());
            }
        }
    }

    /// Finds the on-disk path of a library in an `ldconfig -p` listing.
    /// The first line that contains the library name and a `=> path` wins.
    pub fn resolve_library_path(cache_listing: &str, library: &str) -> Option<String> {
        cache_listing
            .lines()
            .filter(|line| line.contains(library))
            .find_map(|line| CACHE_PATH.captures(line))
            .map(|caps| caps[1].to_string())
    }

    /// Version embedded in a library's printable strings
    pub fn extract_version(strings_output: &str) -> Option<String> {
        VERSION_PATTERNS.iter().find_map(|pattern| {
            pattern
                .captures(strings_output)
                .map(|caps| caps[1].to_string())
        })
    }

    /// Component name for a shared object, by the base name of its path
    pub fn component_name(&self, shared_object: &str) -> String {
        let base = shared_object
            .rsplit('/')
            .next()
            .unwrap_or(shared_object);
        self.aliases
            .get(base)
            .cloned()
            .unwrap_or_else(|| base.to_string())
    }
}

impl Default for LibraryVersionRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LDD_OUTPUT: &str = "\tlinux-vdso.so.1 (0x00007ffc8b5f2000)
\tlibz.so.1 => /lib/x86_64-linux-gnu/libz.so.1 (0x00007f1c2a400000)
\tlibc.so.6 => /lib/x86_64-linux-gnu/libc.so.6 (0x00007f1c2a200000)
\t/lib64/ld-linux-x86-64.so.2 (0x00007f1c2a6a0000)
";

    const LDCONFIG_OUTPUT: &str = "1024 libs found in cache `/etc/ld.so.cache'
\tlibz.so.1 (libc6,x86-64) => /lib/x86_64-linux-gnu/libz.so.1
\tlibc.so.6 (libc6,x86-64, OS ABI: Linux 3.2.0) => /lib/x86_64-linux-gnu/libc.so.6
";

    #[test]
    fn test_parse_linked_libraries() {
        let mut libs = BTreeSet::new();
        LibraryVersionRules::parse_linked_libraries(LDD_OUTPUT, &mut libs);

        let libs: Vec<_> = libs.into_iter().collect();
        assert_eq!(
            libs,
            vec![
                "/lib64/ld-linux-x86-64.so.2".to_string(),
                "libc.so.6".to_string(),
                "libz.so.1".to_string(),
                "linux-vdso.so.1".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_linked_libraries_not_dynamic() {
        let mut libs = BTreeSet::new();
        LibraryVersionRules::parse_linked_libraries("\tnot a dynamic executable\n", &mut libs);
        assert!(libs.is_empty());
    }

    #[test]
    fn test_resolve_library_path() {
        assert_eq!(
            LibraryVersionRules::resolve_library_path(LDCONFIG_OUTPUT, "libc.so.6"),
            Some("/lib/x86_64-linux-gnu/libc.so.6".to_string())
        );
        assert_eq!(
            LibraryVersionRules::resolve_library_path(LDCONFIG_OUTPUT, "libgfortran.so.5"),
            None
        );
    }

    #[test]
    fn test_extract_version_glibc_banner() {
        let strings = "GLIBC_2.2.5\nGNU C Library (Ubuntu GLIBC 2.39-0ubuntu8) stable release version 2.39.\n";
        assert_eq!(
            LibraryVersionRules::extract_version(strings),
            Some("2.39".to_string())
        );
    }

    #[test]
    fn test_extract_version_dotted_fallback() {
        let strings = "deflate 1.2.13 Copyright 1995-2022 Jean-loup Gailly and Mark Adler\n";
        assert_eq!(
            LibraryVersionRules::extract_version(strings),
            Some("1.2.13".to_string())
        );
    }

    #[test]
    fn test_extract_version_none() {
        assert_eq!(LibraryVersionRules::extract_version("no digits here"), None);
    }

    #[test]
    fn test_component_name_aliases() {
        let rules = LibraryVersionRules::new();
        assert_eq!(rules.component_name("libc.so.6"), "glibc");
        assert_eq!(rules.component_name("/lib64/ld-linux-x86-64.so.2"), "ld-linux");
        assert_eq!(rules.component_name("libgfortran.so.5"), "libgfortran.so.5");
    }

    #[test]
    fn test_component_name_configured_alias() {
        let mut extra = HashMap::new();
        extra.insert("libgfortran.so.5".to_string(), "gfortran-runtime".to_string());
        let rules = LibraryVersionRules::new().with_aliases(&extra);
        assert_eq!(rules.component_name("libgfortran.so.5"), "gfortran-runtime");
        assert_eq!(rules.component_name("libz.so.1"), "zlib");
    }
}
