//! Field set construction.
//!
//! Built-in fields are registered first, so they always win name collisions.
//! Additional fields are validated one by one; a bad entry is dropped and
//! recorded without affecting the others.

use std::collections::{BTreeMap, HashSet};

use crate::core::field::{is_identifier, Field, FieldValue};
use crate::core::language::TargetLanguage;
use crate::core::request::{AdditionalField, GenerationRequest};
use crate::core::ticks::Ticks;
use crate::key::KeySource;
use crate::model::errors::{FieldDiagnostics, FieldError, FieldWarning};

/// Names of the built-in fields.
pub mod names {
    pub const ASSEMBLY_VERSION: &str = "AssemblyVersion";
    pub const ASSEMBLY_FILE_VERSION: &str = "AssemblyFileVersion";
    pub const ASSEMBLY_INFORMATIONAL_VERSION: &str = "AssemblyInformationalVersion";
    pub const ASSEMBLY_NAME: &str = "AssemblyName";
    pub const ASSEMBLY_TITLE: &str = "AssemblyTitle";
    pub const ASSEMBLY_PRODUCT: &str = "AssemblyProduct";
    pub const ASSEMBLY_COPYRIGHT: &str = "AssemblyCopyright";
    pub const ASSEMBLY_COMPANY: &str = "AssemblyCompany";
    pub const ASSEMBLY_CONFIGURATION: &str = "AssemblyConfiguration";
    pub const GIT_COMMIT_ID: &str = "GitCommitId";
    pub const GIT_COMMIT_DATE: &str = "GitCommitDate";
    pub const GIT_COMMIT_AUTHOR_DATE: &str = "GitCommitAuthorDate";
    pub const ROOT_NAMESPACE: &str = "RootNamespace";
    pub const IS_PUBLIC_RELEASE: &str = "IsPublicRelease";
    pub const IS_PRERELEASE: &str = "IsPrerelease";
    pub const PUBLIC_KEY: &str = "PublicKey";
    pub const PUBLIC_KEY_TOKEN: &str = "PublicKeyToken";

    /// Every built-in name. These are reserved even when the field itself
    /// is omitted.
    pub const ALL: [&str; 17] = [
        ASSEMBLY_VERSION,
        ASSEMBLY_FILE_VERSION,
        ASSEMBLY_INFORMATIONAL_VERSION,
        ASSEMBLY_NAME,
        ASSEMBLY_TITLE,
        ASSEMBLY_PRODUCT,
        ASSEMBLY_COPYRIGHT,
        ASSEMBLY_COMPANY,
        ASSEMBLY_CONFIGURATION,
        GIT_COMMIT_ID,
        GIT_COMMIT_DATE,
        GIT_COMMIT_AUTHOR_DATE,
        ROOT_NAMESPACE,
        IS_PUBLIC_RELEASE,
        IS_PRERELEASE,
        PUBLIC_KEY,
        PUBLIC_KEY_TOKEN,
    ];
}

/// The resolved, ordered set of fields for one request.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
    diagnostics: FieldDiagnostics,
}

impl FieldSet {
    /// Fields in ordinal name order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .binary_search_by(|f| f.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.fields[i].value)
    }

    /// Field names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn diagnostics(&self) -> &FieldDiagnostics {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Vec<Field>, FieldDiagnostics) {
        (self.fields, self.diagnostics)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Accumulates fields and diagnostics during construction.
#[derive(Default)]
struct FieldCollector {
    language: Option<TargetLanguage>,
    fields: BTreeMap<String, FieldValue>,
    claimed: HashSet<String>,
    diagnostics: FieldDiagnostics,
}

impl FieldCollector {
    fn string(&mut self, name: &str, value: Option<&str>, emit_if_empty: bool) {
        let value = value.unwrap_or_default();
        if value.is_empty() && !emit_if_empty {
            tracing::debug!("omitting empty built-in field `{}`", name);
            return;
        }
        self.insert(name, FieldValue::String(value.to_string()));
    }

    fn boolean(&mut self, name: &str, value: bool) {
        self.insert(name, FieldValue::Bool(value));
    }

    fn ticks(&mut self, name: &str, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.parse::<Ticks>() {
            Ok(ticks) => self.insert(name, FieldValue::Timestamp(ticks)),
            Err(e) => tracing::debug!("omitting built-in field `{}`: {}", name, e),
        }
    }

    fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    fn additional(&mut self, field: &AdditionalField) {
        let name = field.name.as_str();

        if !is_identifier(name) {
            self.reject(FieldError::InvalidName {
                name: name.to_string(),
            });
            return;
        }

        if let Some(language) = self.language.filter(|l| l.is_reserved_word(name)) {
            self.reject(FieldError::ReservedName {
                name: name.to_string(),
                language,
            });
            return;
        }

        let kinds: Vec<&'static str> = [
            ("string", field.string.is_some()),
            ("boolean", field.boolean.is_some()),
            ("ticks", field.ticks.is_some()),
        ]
        .into_iter()
        .filter_map(|(kind, present)| present.then_some(kind))
        .collect();

        match kinds.len() {
            0 => {
                self.reject(FieldError::MissingKind {
                    name: name.to_string(),
                });
                return;
            }
            1 => {}
            _ => {
                self.reject(FieldError::AmbiguousKind {
                    name: name.to_string(),
                    kinds,
                });
                return;
            }
        }

        if self.claimed.contains(name) {
            self.reject(FieldError::DuplicateName {
                name: name.to_string(),
            });
            return;
        }

        // Only an emitted entry claims its name.
        match resolve_additional(field) {
            Ok(Some(value)) => {
                self.claimed.insert(name.to_string());
                self.insert(name, value);
            }
            Ok(None) => {
                tracing::warn!("field `{}` has an empty value and was not emitted", name);
                self.diagnostics.warnings.push(FieldWarning::EmptyValueDropped {
                    name: name.to_string(),
                });
            }
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, error: FieldError) {
        tracing::warn!("{}", error);
        self.diagnostics.errors.push(error);
    }

    fn finish(self) -> FieldSet {
        // BTreeMap<String, _> iterates in byte order, which is ordinal order.
        let fields = self
            .fields
            .into_iter()
            .map(|(name, value)| Field { name, value })
            .collect();
        FieldSet {
            fields,
            diagnostics: self.diagnostics,
        }
    }
}

/// Resolve the value of an additional field with exactly one kind set.
///
/// `Ok(None)` means the value is empty and `emit_if_empty` is off.
fn resolve_additional(field: &AdditionalField) -> Result<Option<FieldValue>, FieldError> {
    let name = &field.name;

    if let Some(s) = &field.string {
        if s.is_empty() && !field.emit_if_empty {
            return Ok(None);
        }
        return Ok(Some(FieldValue::String(s.clone())));
    }

    if let Some(raw) = &field.boolean {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(field.emit_if_empty.then_some(FieldValue::Bool(false)));
        }
        return match trimmed.to_ascii_lowercase().as_str() {
            "true" => Ok(Some(FieldValue::Bool(true))),
            "false" => Ok(Some(FieldValue::Bool(false))),
            _ => Err(FieldError::InvalidBoolean {
                name: name.clone(),
                value: raw.clone(),
            }),
        };
    }

    if let Some(raw) = &field.ticks {
        if raw.trim().is_empty() && !field.emit_if_empty {
            return Ok(None);
        }
        return raw
            .parse::<Ticks>()
            .map(|t| Some(FieldValue::Timestamp(t)))
            .map_err(|_| FieldError::InvalidTicks {
                name: name.clone(),
                value: raw.clone(),
            });
    }

    Ok(None)
}

/// Build the ordered field set for a request.
pub fn build_fields(request: &GenerationRequest, keys: &dyn KeySource) -> FieldSet {
    let build = &request.build;
    let mut collector = FieldCollector {
        language: request.language.parse().ok(),
        ..Default::default()
    };
    collector
        .claimed
        .extend(names::ALL.iter().map(|n| n.to_string()));

    collector.string(names::ASSEMBLY_VERSION, build.assembly_version.as_deref(), false);
    collector.string(
        names::ASSEMBLY_FILE_VERSION,
        build.assembly_file_version.as_deref(),
        false,
    );
    collector.string(
        names::ASSEMBLY_INFORMATIONAL_VERSION,
        build.assembly_informational_version.as_deref(),
        false,
    );
    collector.string(names::ASSEMBLY_NAME, build.assembly_name.as_deref(), false);
    collector.string(names::ASSEMBLY_TITLE, build.assembly_title.as_deref(), false);
    collector.string(names::ASSEMBLY_PRODUCT, build.assembly_product.as_deref(), false);
    collector.string(
        names::ASSEMBLY_COPYRIGHT,
        build.assembly_copyright.as_deref(),
        false,
    );
    collector.string(names::ASSEMBLY_COMPANY, build.assembly_company.as_deref(), false);
    collector.string(
        names::ASSEMBLY_CONFIGURATION,
        build.assembly_configuration.as_deref(),
        false,
    );
    collector.string(names::GIT_COMMIT_ID, build.git_commit_id.as_deref(), false);
    collector.string(
        names::ROOT_NAMESPACE,
        request.root_namespace.as_deref(),
        true,
    );
    collector.boolean(names::IS_PUBLIC_RELEASE, build.public_release);
    collector.boolean(
        names::IS_PRERELEASE,
        build
            .prerelease_version
            .as_deref()
            .is_some_and(|p| !p.is_empty()),
    );
    collector.ticks(names::GIT_COMMIT_DATE, build.git_commit_date.as_deref());
    collector.ticks(
        names::GIT_COMMIT_AUTHOR_DATE,
        build.git_commit_author_date.as_deref(),
    );

    if let Some(reference) = build.key_reference() {
        match keys.resolve(&reference) {
            Some(info) => {
                collector.string(names::PUBLIC_KEY, Some(&info.public_key), false);
                collector.string(names::PUBLIC_KEY_TOKEN, Some(&info.public_key_token), false);
            }
            None => tracing::debug!("signing key unavailable, omitting public key fields"),
        }
    }

    for field in &request.additional_fields {
        collector.additional(field);
    }

    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::{AdditionalField, BuildInfo};
    use crate::key::NoKeySource;
    use crate::test_support::{sample_request, FixedKeySource};

    fn names_of(set: &FieldSet) -> Vec<&str> {
        set.names().collect()
    }

    #[test]
    fn test_minimal_request_has_structural_fields() {
        let set = build_fields(&GenerationRequest::new("c#"), &NoKeySource);

        assert_eq!(
            names_of(&set),
            vec!["IsPrerelease", "IsPublicRelease", "RootNamespace"]
        );
        assert_eq!(set.get("RootNamespace"), Some(&FieldValue::String(String::new())));
        assert_eq!(set.get("IsPublicRelease"), Some(&FieldValue::Bool(false)));
        assert!(set.diagnostics().is_empty());
    }

    #[test]
    fn test_fields_sorted_ordinally() {
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField::string("alpha", "lower"))
            .with_field(AdditionalField::string("Zulu", "upper"))
            .with_field(AdditionalField::string("_under", "x"));
        let set = build_fields(&request, &NoKeySource);

        // Ordinal: uppercase < underscore < lowercase
        assert_eq!(
            names_of(&set),
            vec![
                "IsPrerelease",
                "IsPublicRelease",
                "RootNamespace",
                "Zulu",
                "_under",
                "alpha"
            ]
        );
    }

    #[test]
    fn test_built_ins_from_sample() {
        let set = build_fields(&sample_request("c#"), &NoKeySource);

        assert_eq!(
            set.get("AssemblyVersion"),
            Some(&FieldValue::String("1.2.3".into()))
        );
        assert_eq!(set.get("IsPublicRelease"), Some(&FieldValue::Bool(true)));
        assert_eq!(set.get("IsPrerelease"), Some(&FieldValue::Bool(true)));
        assert_eq!(
            set.get("GitCommitDate"),
            Some(&FieldValue::Timestamp(Ticks(637_450_560_000_000_000)))
        );
        assert!(set.get("PublicKey").is_none());
    }

    #[test]
    fn test_unparsable_ticks_omit_only_that_field() {
        let request = GenerationRequest::new("c#").with_build(BuildInfo {
            assembly_version: Some("1.0".into()),
            git_commit_date: Some("yesterday".into()),
            git_commit_author_date: Some("637450560000000000".into()),
            ..Default::default()
        });
        let set = build_fields(&request, &NoKeySource);

        assert!(set.get("GitCommitDate").is_none());
        assert!(set.get("GitCommitAuthorDate").is_some());
        assert!(set.get("AssemblyVersion").is_some());
        assert!(set.diagnostics().is_empty());
    }

    #[test]
    fn test_key_fields_from_key_source() {
        let request = GenerationRequest::new("c#").with_build(BuildInfo {
            key_file: Some("key.snk".into()),
            ..Default::default()
        });

        let set = build_fields(&request, &FixedKeySource::sample());
        assert_eq!(
            set.get("PublicKeyToken"),
            Some(&FieldValue::String(FixedKeySource::TOKEN.into()))
        );
        assert!(set.get("PublicKey").is_some());

        let set = build_fields(&request, &NoKeySource);
        assert!(set.get("PublicKey").is_none());
        assert!(set.get("PublicKeyToken").is_none());
        assert!(set.diagnostics().is_empty());
    }

    #[test]
    fn test_duplicate_additional_field_rejected() {
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField::string("Foo", "first"))
            .with_field(AdditionalField::string("Foo", "second"));
        let set = build_fields(&request, &NoKeySource);

        assert_eq!(set.get("Foo"), Some(&FieldValue::String("first".into())));
        assert_eq!(set.names().filter(|n| *n == "Foo").count(), 1);
        assert_eq!(
            set.diagnostics().errors,
            vec![FieldError::DuplicateName { name: "Foo".into() }]
        );
    }

    #[test]
    fn test_built_in_names_are_reserved() {
        // GitCommitId is omitted here, but the name still belongs to the built-in.
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField::string("GitCommitId", "spoofed"))
            .with_field(AdditionalField::boolean("IsPublicRelease", "true"));
        let set = build_fields(&request, &NoKeySource);

        assert!(set.get("GitCommitId").is_none());
        assert_eq!(set.get("IsPublicRelease"), Some(&FieldValue::Bool(false)));
        assert_eq!(set.diagnostics().errors.len(), 2);
    }

    #[test]
    fn test_ambiguous_kind_rejected() {
        let field = AdditionalField {
            name: "Both".into(),
            string: Some("x".into()),
            boolean: Some("true".into()),
            ..Default::default()
        };
        let set = build_fields(&GenerationRequest::new("c#").with_field(field), &NoKeySource);

        assert!(set.get("Both").is_none());
        assert_eq!(
            set.diagnostics().errors,
            vec![FieldError::AmbiguousKind {
                name: "Both".into(),
                kinds: vec!["string", "boolean"],
            }]
        );
    }

    #[test]
    fn test_missing_kind_and_bad_names() {
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField {
                name: "Nothing".into(),
                ..Default::default()
            })
            .with_field(AdditionalField::string("", "x"))
            .with_field(AdditionalField::string("has space", "x"))
            .with_field(AdditionalField::string("Good", "x"));
        let set = build_fields(&request, &NoKeySource);

        assert!(set.get("Good").is_some());
        let errors = &set.diagnostics().errors;
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], FieldError::MissingKind { .. }));
        assert!(matches!(errors[1], FieldError::InvalidName { .. }));
        assert!(matches!(errors[2], FieldError::InvalidName { .. }));
    }

    #[test]
    fn test_additional_value_kinds() {
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField::boolean("Nightly", "True"))
            .with_field(AdditionalField::ticks("BuiltAt", "637450560000000000"))
            .with_field(AdditionalField::boolean("Broken", "yes"))
            .with_field(AdditionalField::ticks("When", "noon"));
        let set = build_fields(&request, &NoKeySource);

        assert_eq!(set.get("Nightly"), Some(&FieldValue::Bool(true)));
        assert_eq!(
            set.get("BuiltAt"),
            Some(&FieldValue::Timestamp(Ticks(637_450_560_000_000_000)))
        );
        assert!(set.get("Broken").is_none());
        assert!(set.get("When").is_none());
        assert_eq!(
            set.diagnostics().errors,
            vec![
                FieldError::InvalidBoolean {
                    name: "Broken".into(),
                    value: "yes".into()
                },
                FieldError::InvalidTicks {
                    name: "When".into(),
                    value: "noon".into()
                },
            ]
        );
    }

    #[test]
    fn test_empty_values() {
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField::string("Dropped", ""))
            .with_field(AdditionalField::string("Kept", "").with_emit_if_empty(true))
            .with_field(AdditionalField::boolean("Flag", "").with_emit_if_empty(true));
        let set = build_fields(&request, &NoKeySource);

        assert!(set.get("Dropped").is_none());
        assert_eq!(set.get("Kept"), Some(&FieldValue::String(String::new())));
        assert_eq!(set.get("Flag"), Some(&FieldValue::Bool(false)));
        assert!(set.diagnostics().errors.is_empty());
        assert_eq!(
            set.diagnostics().warnings,
            vec![FieldWarning::EmptyValueDropped {
                name: "Dropped".into()
            }]
        );
    }

    #[test]
    fn test_dropped_entry_does_not_claim_name() {
        let request = GenerationRequest::new("c#")
            .with_field(AdditionalField::boolean("Foo", "yes"))
            .with_field(AdditionalField::string("Foo", "ok"))
            .with_field(AdditionalField::string("Bar", ""))
            .with_field(AdditionalField::string("Bar", "x"));
        let set = build_fields(&request, &NoKeySource);

        assert_eq!(set.get("Foo"), Some(&FieldValue::String("ok".into())));
        assert_eq!(set.get("Bar"), Some(&FieldValue::String("x".into())));
        assert_eq!(
            set.diagnostics().errors,
            vec![FieldError::InvalidBoolean {
                name: "Foo".into(),
                value: "yes".into()
            }]
        );
        assert_eq!(
            set.diagnostics().warnings,
            vec![FieldWarning::EmptyValueDropped { name: "Bar".into() }]
        );
    }

    #[test]
    fn test_reserved_words_rejected_for_target_language() {
        let fields = || {
            [
                AdditionalField::string("class", "k"),
                AdditionalField::string("End", "k"),
                AdditionalField::string("type", "k"),
            ]
        };
        let build = |language: &str| {
            let mut request = GenerationRequest::new(language);
            request.additional_fields.extend(fields());
            build_fields(&request, &NoKeySource)
        };

        let cs = build("c#");
        assert!(cs.get("class").is_none());
        assert!(cs.get("End").is_some());
        assert!(cs.get("type").is_some());
        assert_eq!(
            cs.diagnostics().errors,
            vec![FieldError::ReservedName {
                name: "class".into(),
                language: TargetLanguage::CSharp,
            }]
        );

        // VB keywords are case-insensitive
        let vb = build("vb");
        assert!(vb.get("class").is_none());
        assert!(vb.get("End").is_none());
        assert!(vb.get("type").is_some());
        assert_eq!(vb.diagnostics().errors.len(), 2);

        let fs = build("f#");
        assert!(fs.get("class").is_none());
        assert!(fs.get("End").is_some());
        assert!(fs.get("type").is_none());
        assert_eq!(fs.diagnostics().errors.len(), 2);
    }

    #[test]
    fn test_out_of_range_ticks() {
        let request = GenerationRequest::new("c#")
            .with_build(BuildInfo {
                git_commit_date: Some("-5".into()),
                git_commit_author_date: Some("3155378976000000000".into()),
                ..Default::default()
            })
            .with_field(AdditionalField::ticks("Earliest", "0"))
            .with_field(AdditionalField::ticks("Latest", "3155378975999999999"))
            .with_field(AdditionalField::ticks("Negative", "-1"));
        let set = build_fields(&request, &NoKeySource);

        assert!(set.get("GitCommitDate").is_none());
        assert!(set.get("GitCommitAuthorDate").is_none());
        assert_eq!(set.get("Earliest"), Some(&FieldValue::Timestamp(Ticks(0))));
        assert_eq!(
            set.get("Latest"),
            Some(&FieldValue::Timestamp(Ticks(3_155_378_975_999_999_999)))
        );
        assert!(set.get("Negative").is_none());
        assert_eq!(
            set.diagnostics().errors,
            vec![FieldError::InvalidTicks {
                name: "Negative".into(),
                value: "-1".into()
            }]
        );
    }

    #[test]
    fn test_deterministic() {
        let request = sample_request("c#");
        let a = build_fields(&request, &NoKeySource);
        let b = build_fields(&request, &NoKeySource);
        assert_eq!(a.fields(), b.fields());
    }
}
