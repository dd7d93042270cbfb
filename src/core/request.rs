//! Generation requests.
//!
//! A [`GenerationRequest`] is everything the generator needs to produce one
//! file. It is assembled by the caller (usually from build properties or a
//! request TOML file) and never mutated during generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Full input to one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerationRequest {
    /// Target syntax identifier (e.g. "c#", "vb", "fsharp").
    pub language: String,

    /// Explicit namespace for the constants class.
    pub namespace: Option<String>,

    /// Ambient root namespace of the project.
    pub root_namespace: Option<String>,

    /// Emit title/product/company/copyright attributes.
    pub emit_non_version_attributes: bool,

    /// Emit the `ThisAssembly` constants class.
    pub emit_this_assembly_class: bool,

    /// Built-in build facts.
    pub build: BuildInfo,

    /// Caller-supplied extra fields.
    #[serde(rename = "field")]
    pub additional_fields: Vec<AdditionalField>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            language: String::new(),
            namespace: None,
            root_namespace: None,
            emit_non_version_attributes: false,
            emit_this_assembly_class: true,
            build: BuildInfo::default(),
            additional_fields: Vec::new(),
        }
    }
}

impl GenerationRequest {
    /// Create a request for the given language with no facts.
    pub fn new(language: impl Into<String>) -> Self {
        GenerationRequest {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Load a request from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse request file: {}", path.display()))
    }

    /// Set the explicit namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the ambient root namespace.
    pub fn with_root_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.root_namespace = Some(namespace.into());
        self
    }

    /// Replace the built-in build facts.
    pub fn with_build(mut self, build: BuildInfo) -> Self {
        self.build = build;
        self
    }

    /// Append an additional field.
    pub fn with_field(mut self, field: AdditionalField) -> Self {
        self.additional_fields.push(field);
        self
    }
}

/// Built-in facts about the build.
///
/// Timestamps are raw tick strings; a value that does not parse as an
/// integer simply omits the corresponding field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildInfo {
    pub assembly_version: Option<String>,
    pub assembly_file_version: Option<String>,
    pub assembly_informational_version: Option<String>,
    pub assembly_name: Option<String>,
    pub assembly_title: Option<String>,
    pub assembly_product: Option<String>,
    pub assembly_copyright: Option<String>,
    pub assembly_company: Option<String>,
    pub assembly_configuration: Option<String>,
    pub git_commit_id: Option<String>,
    pub git_commit_date: Option<String>,
    pub git_commit_author_date: Option<String>,
    pub public_release: bool,
    pub prerelease_version: Option<String>,

    /// Strong-name key file used to derive the public key fields.
    pub key_file: Option<PathBuf>,

    /// Key container name, used when no key file is set.
    pub key_container: Option<String>,
}

impl BuildInfo {
    /// The key to resolve for public key fields, if any.
    pub fn key_reference(&self) -> Option<KeyReference> {
        if let Some(path) = self.key_file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            return Some(KeyReference::File(path.clone()));
        }
        self.key_container
            .as_ref()
            .filter(|name| !name.is_empty())
            .map(|name| KeyReference::Container(name.clone()))
    }
}

/// Where a signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyReference {
    File(PathBuf),
    Container(String),
}

/// A caller-supplied field.
///
/// Exactly one of `string`, `boolean` and `ticks` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdditionalField {
    pub name: String,
    pub string: Option<String>,
    pub boolean: Option<String>,
    pub ticks: Option<String>,
    pub emit_if_empty: bool,
}

impl AdditionalField {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        AdditionalField {
            name: name.into(),
            string: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn boolean(name: impl Into<String>, value: impl Into<String>) -> Self {
        AdditionalField {
            name: name.into(),
            boolean: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn ticks(name: impl Into<String>, value: impl Into<String>) -> Self {
        AdditionalField {
            name: name.into(),
            ticks: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_emit_if_empty(mut self, emit_if_empty: bool) -> Self {
        self.emit_if_empty = emit_if_empty;
        self
    }

    /// Parse a `NAME=KIND:VALUE` command-line spec.
    ///
    /// `KIND` is one of `string`, `bool`/`boolean` or `ticks`; without a kind
    /// prefix the value is a string.
    pub fn parse_spec(spec: &str) -> Result<Self, String> {
        let (name, rest) = spec
            .split_once('=')
            .ok_or_else(|| format!("invalid field '{}', expected NAME=[KIND:]VALUE", spec))?;

        let field = match rest.split_once(':') {
            Some(("string", value)) => AdditionalField::string(name, value),
            Some(("bool" | "boolean", value)) => AdditionalField::boolean(name, value),
            Some(("ticks", value)) => AdditionalField::ticks(name, value),
            _ => AdditionalField::string(name, rest),
        };
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_toml() {
        let toml_src = r#"
language = "c#"
namespace = "Contoso"
emit-non-version-attributes = true

[build]
assembly-version = "1.2"
public-release = true
git-commit-date = "637450560000000000"

[[field]]
name = "BuildMachine"
string = "ci-01"

[[field]]
name = "IsNightly"
boolean = "true"
"#;
        let req: GenerationRequest = toml::from_str(toml_src).unwrap();
        assert_eq!(req.language, "c#");
        assert_eq!(req.namespace.as_deref(), Some("Contoso"));
        assert!(req.emit_non_version_attributes);
        assert!(req.emit_this_assembly_class);
        assert_eq!(req.build.assembly_version.as_deref(), Some("1.2"));
        assert!(req.build.public_release);
        assert_eq!(req.additional_fields.len(), 2);
        assert_eq!(req.additional_fields[1].boolean.as_deref(), Some("true"));
    }

    #[test]
    fn test_parse_field_spec() {
        assert_eq!(
            AdditionalField::parse_spec("Machine=ci-01").unwrap(),
            AdditionalField::string("Machine", "ci-01")
        );
        assert_eq!(
            AdditionalField::parse_spec("Nightly=bool:true").unwrap(),
            AdditionalField::boolean("Nightly", "true")
        );
        assert_eq!(
            AdditionalField::parse_spec("Built=ticks:42").unwrap(),
            AdditionalField::ticks("Built", "42")
        );
        assert_eq!(
            AdditionalField::parse_spec("Url=http://example.com").unwrap(),
            AdditionalField::string("Url", "http://example.com")
        );
        assert!(AdditionalField::parse_spec("NoValue").is_err());
    }

    #[test]
    fn test_key_reference_prefers_file() {
        let mut build = BuildInfo {
            key_container: Some("MyContainer".into()),
            ..Default::default()
        };
        assert_eq!(
            build.key_reference(),
            Some(KeyReference::Container("MyContainer".into()))
        );

        build.key_file = Some(PathBuf::from("key.snk"));
        assert_eq!(
            build.key_reference(),
            Some(KeyReference::File(PathBuf::from("key.snk")))
        );

        assert_eq!(BuildInfo::default().key_reference(), None);
    }
}
