use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version recorded for components whose version could not be determined
pub const UNKNOWN_VERSION: &str = "unknown";

/// Kinds of components this tool creates itself
///
/// Components read from a base document may carry any CycloneDX type;
/// those are kept as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Library,
    Application,
    Compiler,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Library => "library",
            ComponentKind::Application => "application",
            ComponentKind::Compiler => "compiler",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds the `bom-ref` used for components created by this tool
pub fn bom_ref_for(name: &str, version: &str) -> String {
    format!("{}@{}", name, version)
}

/// A CycloneDX component entry
///
/// Fields not modelled here (purl, cpe, properties, ...) are kept in `extra`
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "bom-ref", default, skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(rename = "type", default = "default_component_type")]
    component_type: String,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn default_component_type() -> String {
    ComponentKind::Library.as_str().to_string()
}

impl Component {
    /// Creates a component with `bom-ref` set to `name@version`
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: ComponentKind) -> Self {
        let name = name.into();
        let version = version.into();
        Self {
            bom_ref: Some(bom_ref_for(&name, &version)),
            component_type: kind.as_str().to_string(),
            name,
            version: Some(version),
            extra: Map::new(),
        }
    }

    pub fn library(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, ComponentKind::Library)
    }

    pub fn bom_ref(&self) -> Option<&str> {
        self.bom_ref.as_deref()
    }

    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
