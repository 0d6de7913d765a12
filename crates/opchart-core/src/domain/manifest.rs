//! Rendered manifests and their classification into chart directories.

use serde::Deserialize;

use crate::domain::error::DomainError;

/// Substring that marks a file as holding a CustomResourceDefinition.
///
/// Matches the file names `kustomize build -o <dir>` produces for CRDs
/// (`apiextensions.k8s.io_v1_customresourcedefinition_<name>.yaml`).
pub const CRD_FILE_MARKER: &str = "customresourcedefinition";

/// Where a rendered manifest file belongs inside a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestClass {
    Template,
    CustomResourceDefinition,
}

impl ManifestClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::CustomResourceDefinition => "crd",
        }
    }
}

/// Classify a manifest file by its name alone.
///
/// The check is a case-sensitive substring match on the file name, so a
/// non-CRD file that happens to contain the marker is filed as a CRD.
pub fn classify_file_name(file_name: &str) -> ManifestClass {
    if file_name.contains(CRD_FILE_MARKER) {
        ManifestClass::CustomResourceDefinition
    } else {
        ManifestClass::Template
    }
}

/// Output of the overlay renderer: concatenated YAML documents, opaque bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedManifests {
    bytes: Vec<u8>,
}

impl RenderedManifests {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Split the stream at `---` document boundaries.
    ///
    /// Blank documents are dropped. Each document keeps its original text.
    pub fn documents(&self) -> Result<Vec<ManifestDocument>, DomainError> {
        let text =
            std::str::from_utf8(&self.bytes).map_err(|e| DomainError::InvalidManifestStream {
                reason: e.to_string(),
            })?;

        Ok(split_documents(text)
            .into_iter()
            .map(ManifestDocument::new)
            .collect())
    }
}

/// A single YAML document taken from the rendered stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    content: String,
    file_name: Option<String>,
}

impl ManifestDocument {
    fn new(content: String) -> Self {
        let file_name = resource_file_name(&content);
        Self { content, file_name }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// kustomize-style file name, when the document identifies a resource.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

fn split_documents(text: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if is_document_separator(line) {
            push_document(&mut documents, std::mem::take(&mut current));
        } else {
            current.push_str(line);
        }
    }
    push_document(&mut documents, current);

    documents
}

fn is_document_separator(line: &str) -> bool {
    let line = line.trim_end();
    line == "---" || line.starts_with("--- ") || line.starts_with("---\t")
}

fn push_document(documents: &mut Vec<String>, mut doc: String) {
    let meaningful = doc
        .lines()
        .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'));
    if !meaningful {
        return;
    }
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    documents.push(doc);
}

#[derive(Deserialize)]
struct ResourceHeader {
    #[serde(default, rename = "apiVersion")]
    api_version: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: Option<ResourceMetadata>,
}

#[derive(Deserialize)]
struct ResourceMetadata {
    #[serde(default)]
    name: Option<String>,
}

/// `<group>_<version>_<kind>_<name>.yaml`, lowercased, empty parts skipped.
fn resource_file_name(document: &str) -> Option<String> {
    let header: ResourceHeader = serde_yaml::from_str(document).ok()?;
    let kind = header.kind.filter(|k| !k.is_empty())?;
    let name = header
        .metadata
        .and_then(|m| m.name)
        .filter(|n| !n.is_empty())?;

    let mut parts: Vec<String> = header
        .api_version
        .unwrap_or_default()
        .split('/')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    parts.push(kind);
    parts.push(name);

    Some(format!("{}.yaml", parts.join("_").to_lowercase()))
}
