//! Implementation of `verinfo generate`.
//!
//! [`Generator`] turns a [`GenerationRequest`] into source text. It does no
//! I/O of its own apart from asking its [`KeySource`] for public key
//! material; [`generate_to_file`] layers the write on top.

use std::path::Path;

use anyhow::{Context, Result};
use miette::Diagnostic as MietteDiagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::field::{is_identifier, AttributeKind, Field};
use crate::core::language::TargetLanguage;
use crate::core::request::GenerationRequest;
use crate::emit::{header_text, EmitterOptions, EmitterRegistry, SyntaxEmitter};
use crate::key::{KeySource, StrongNameKeySource};
use crate::model::{build_fields, FieldDiagnostics};
use crate::util::fs::{write_atomic_with_retry, RetryPolicy, WriteOutcome};

/// Error that prevents any output from being produced.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GenerateError {
    #[error("no generator for language `{language}`")]
    #[diagnostic(
        code(verinfo::generate::no_generator),
        help("supported languages: c# (cs, csharp), vb (visualbasic, vbnet), f# (fs, fsharp)")
    )]
    NoGenerator { language: String },

    #[error("`{namespace}` is not a valid {language} namespace")]
    #[diagnostic(
        code(verinfo::generate::invalid_namespace),
        help("a namespace is one or more identifiers joined by `.`, none of them a keyword")
    )]
    InvalidNamespace {
        namespace: String,
        language: TargetLanguage,
    },
}

/// Result of a successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCode {
    /// Language the text is written in
    pub language: TargetLanguage,

    /// Generated source text
    pub text: String,

    /// Fields emitted into the constants class, in emission order
    pub fields: Vec<Field>,

    /// Non-fatal problems found while building the field set
    pub diagnostics: FieldDiagnostics,
}

/// The generation driver.
pub struct Generator {
    tool_name: String,
    tool_version: String,
    key_source: Box<dyn KeySource>,
    registry: EmitterRegistry,
}

impl Generator {
    /// Create a generator identifying itself as `tool_name tool_version` in
    /// generated files.
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Generator {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            key_source: Box::new(StrongNameKeySource::new()),
            registry: EmitterRegistry::new(),
        }
    }

    /// Replace the key source.
    pub fn with_key_source(mut self, key_source: Box<dyn KeySource>) -> Self {
        self.key_source = key_source;
        self
    }

    /// Registered backends.
    pub fn registry(&self) -> &EmitterRegistry {
        &self.registry
    }

    /// Generate source text for a request.
    ///
    /// Per-field problems are returned in [`GeneratedCode::diagnostics`];
    /// only an unsupported language prevents output.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedCode, GenerateError> {
        let backend =
            self.registry
                .select(&request.language)
                .ok_or_else(|| GenerateError::NoGenerator {
                    language: request.language.clone(),
                })?;

        let namespace = non_empty(request.namespace.as_deref()).map(String::from).or_else(|| {
            backend.default_namespace.map(|default| {
                non_empty(request.root_namespace.as_deref())
                    .unwrap_or(default)
                    .to_string()
            })
        });

        if let Some(ns) = namespace.as_deref() {
            if !is_namespace(backend.language, ns) {
                return Err(GenerateError::InvalidNamespace {
                    namespace: ns.to_string(),
                    language: backend.language,
                });
            }
        }

        tracing::debug!(
            "generating {} (namespace: {})",
            backend.language,
            namespace.as_deref().unwrap_or("<none>")
        );

        let (fields, diagnostics) = build_fields(request, self.key_source.as_ref()).into_parts();

        let options = EmitterOptions::new(&self.tool_name, &self.tool_version)
            .with_namespace(namespace);
        let mut emitter = backend.create(options);
        emit(
            emitter.as_mut(),
            request,
            &fields,
            &header_text(&self.tool_name, &self.tool_version),
        );

        Ok(GeneratedCode {
            language: backend.language,
            text: emitter.code().to_string(),
            fields,
            diagnostics,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_namespace(language: TargetLanguage, namespace: &str) -> bool {
    namespace
        .split('.')
        .all(|segment| is_identifier(segment) && !language.is_reserved_word(segment))
}

/// Module-level attributes for a request, in declaration order.
pub fn assembly_attributes(request: &GenerationRequest) -> Vec<(AttributeKind, String)> {
    let build = &request.build;
    let mut attributes = vec![
        (AttributeKind::Version, build.assembly_version.as_deref()),
        (AttributeKind::FileVersion, build.assembly_file_version.as_deref()),
        (
            AttributeKind::InformationalVersion,
            build.assembly_informational_version.as_deref(),
        ),
    ];

    if request.emit_non_version_attributes {
        attributes.extend([
            (AttributeKind::Title, build.assembly_title.as_deref()),
            (AttributeKind::Product, build.assembly_product.as_deref()),
            (AttributeKind::Company, build.assembly_company.as_deref()),
            (AttributeKind::Copyright, build.assembly_copyright.as_deref()),
        ]);
    }

    attributes
        .into_iter()
        .filter(|(kind, value)| kind.is_version() || non_empty(*value).is_some())
        .map(|(kind, value)| (kind, value.unwrap_or_default().to_string()))
        .collect()
}

/// Drive an emitter through the full call sequence.
pub fn emit(
    emitter: &mut dyn SyntaxEmitter,
    request: &GenerationRequest,
    fields: &[Field],
    header: &str,
) {
    emitter.add_comment(header);
    emitter.add_blank_line();
    emitter.add_analysis_suppressions();
    emitter.add_blank_line();

    emitter.start_assembly_attributes();
    for (kind, value) in assembly_attributes(request) {
        emitter.declare_attribute(kind, &value);
    }
    emitter.end_assembly_attributes();

    if request.emit_this_assembly_class {
        emitter.start_this_assembly_class();
        for field in fields {
            emitter.add_member(field);
        }
        emitter.end_this_assembly_class();
    }
}

/// Outcome of [`generate_to_file`].
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub code: GeneratedCode,
    pub outcome: WriteOutcome,
}

/// Generate and write the result to `path`.
pub fn generate_to_file(
    generator: &Generator,
    request: &GenerationRequest,
    path: &Path,
    retry: &RetryPolicy,
) -> Result<GenerateResult> {
    let code = generator.generate(request)?;
    let outcome = write_atomic_with_retry(path, &code.text, retry)
        .with_context(|| format!("failed to write generated file: {}", path.display()))?;

    Ok(GenerateResult { code, outcome })
}
