use super::component::Component;
use super::vulnerability::VulnerabilityRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool entry under `metadata.tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolComponent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolComponent {
    pub fn application(name: impl Into<String>) -> Self {
        Self {
            tool_type: Some("application".to_string()),
            author: None,
            name: name.into(),
            version: None,
            extra: Map::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// `metadata.tools` in either of the two shapes CycloneDX allows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tools {
    /// CycloneDX 1.4 and earlier: a plain array of tools
    Legacy(Vec<ToolComponent>),
    /// CycloneDX 1.5+: `{"components": [...], "services": [...]}`
    Structured(ToolSection),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSection {
    #[serde(default)]
    pub components: Vec<ToolComponent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Tools>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A CycloneDX JSON document
///
/// Only the parts this tool reads or extends are modelled. The header fields
/// are declared so they stay at the top of a rewritten document; everything
/// else (dependencies, compositions, ...) is carried in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SbomDocument {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    schema: Option<Value>,
    #[serde(rename = "bomFormat", default, skip_serializing_if = "Option::is_none")]
    bom_format: Option<Value>,
    #[serde(rename = "specVersion", default, skip_serializing_if = "Option::is_none")]
    spec_version: Option<Value>,
    #[serde(rename = "serialNumber", default, skip_serializing_if = "Option::is_none")]
    serial_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    vulnerabilities: Vec<VulnerabilityRecord>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl SbomDocument {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn vulnerabilities(&self) -> &[VulnerabilityRecord] {
        &self.vulnerabilities
    }

    pub fn tools(&self) -> &[ToolComponent] {
        match self.metadata.as_ref().and_then(|m| m.tools.as_ref()) {
            Some(Tools::Structured(section)) => &section.components,
            Some(Tools::Legacy(tools)) => tools,
            None => &[],
        }
    }

    pub fn find_component_by_name(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }

    pub fn has_component_named(&self, name: &str) -> bool {
        self.find_component_by_name(name).is_some()
    }

    pub fn has_bom_ref(&self, bom_ref: &str) -> bool {
        self.components
            .iter()
            .any(|c| c.bom_ref() == Some(bom_ref))
    }

    pub fn has_vulnerability(&self, id: &str) -> bool {
        self.vulnerabilities.iter().any(|v| v.id() == id)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }

    pub(crate) fn push_component(&mut self, component: Component) {
        self.components.push(component);
    }

    pub(crate) fn push_vulnerability(&mut self, vulnerability: VulnerabilityRecord) {
        self.vulnerabilities.push(vulnerability);
    }

    /// Appends a tool, creating `metadata.tools.components` when absent
    pub(crate) fn push_tool(&mut self, tool: ToolComponent) {
        let metadata = self.metadata.get_or_insert_with(Metadata::default);
        match metadata.tools.get_or_insert_with(|| {
            Tools::Structured(ToolSection {
                components: Vec::new(),
                extra: Map::new(),
            })
        }) {
            Tools::Structured(section) => section.components.push(tool),
            Tools::Legacy(tools) => tools.push(tool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYFT_DOCUMENT: &str = r#"{
        "$schema": "http://cyclonedx.org/schema/bom-1.6.schema.json",
        "bomFormat": "CycloneDX",
        "specVersion": "1.6",
        "serialNumber": "urn:uuid:0b1e4f7c-0000-4000-8000-000000000000",
        "version": 1,
        "metadata": {
            "timestamp": "2024-05-01T10:00:00Z",
            "tools": {
                "components": [
                    {"type": "application", "author": "anchore", "name": "syft", "version": "1.4.1"}
                ]
            },
            "component": {"bom-ref": "root", "type": "file", "name": "gcc"}
        },
        "components": [
            {"bom-ref": "lib-a", "type": "library", "name": "libiberty", "version": "unknown"}
        ]
    }"#;

    #[test]
    fn test_parse_syft_document() {
        let doc = SbomDocument::from_json(SYFT_DOCUMENT).unwrap();
        assert_eq!(doc.components().len(), 1);
        assert!(doc.vulnerabilities().is_empty());
        assert_eq!(doc.tools().len(), 1);
        assert!(doc.has_tool("syft"));
        assert!(doc.has_component_named("libiberty"));
        assert!(doc.has_bom_ref("lib-a"));
    }

    #[test]
    fn test_roundtrip_preserves_unmodelled_fields() {
        let doc = SbomDocument::from_json(SYFT_DOCUMENT).unwrap();
        let json: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["bomFormat"], "CycloneDX");
        assert_eq!(json["serialNumber"], "urn:uuid:0b1e4f7c-0000-4000-8000-000000000000");
        assert_eq!(json["metadata"]["timestamp"], "2024-05-01T10:00:00Z");
        assert_eq!(json["metadata"]["component"]["name"], "gcc");
        assert_eq!(json["vulnerabilities"], Value::Array(vec![]));
    }

    #[test]
    fn test_rewrite_keeps_header_first() {
        let doc = SbomDocument::from_json(SYFT_DOCUMENT).unwrap();
        let written = doc.to_json_pretty().unwrap();

        let position = |key: &str| written.find(&format!("\"{}\"", key)).unwrap();
        assert!(position("$schema") < position("bomFormat"));
        assert!(position("bomFormat") < position("specVersion"));
        assert!(position("specVersion") < position("serialNumber"));
        assert!(position("serialNumber") < position("metadata"));
        assert!(position("metadata") < position("components"));
        assert!(position("components") < position("vulnerabilities"));
    }

    #[test]
    fn test_rewrite_keeps_order_of_unmodelled_fields() {
        let doc = SbomDocument::from_json(
            r#"{"bomFormat": "CycloneDX", "components": [], "dependencies": [], "compositions": [], "annotations": []}"#,
        )
        .unwrap();
        let written = doc.to_json_pretty().unwrap();

        let position = |key: &str| written.find(&format!("\"{}\"", key)).unwrap();
        assert!(position("dependencies") < position("compositions"));
        assert!(position("compositions") < position("annotations"));
    }

    #[test]
    fn test_push_tool_creates_metadata() {
        let mut doc = SbomDocument::default();
        doc.push_tool(ToolComponent::application("toolchain-sbom").with_version("0.4.0"));
        assert!(doc.has_tool("toolchain-sbom"));

        let json: Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["metadata"]["tools"]["components"][0]["name"], "toolchain-sbom");
    }

    #[test]
    fn test_legacy_tools_array_is_kept_as_array() {
        let mut doc = SbomDocument::from_json(
            r#"{"metadata": {"tools": [{"vendor": "anchore", "name": "syft", "version": "0.80.0"}]}}"#,
        )
        .unwrap();
        doc.push_tool(ToolComponent::application("toolchain-sbom"));

        let json: Value = serde_json::to_value(&doc).unwrap();
        let tools = json["metadata"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["vendor"], "anchore");
    }
}
