//! Emitter registry - maps language identifiers to backends.
//!
//! Construction never fails and does no work beyond filling a table.
//! Emitters themselves are created fresh for every generation.

use std::collections::HashMap;

use crate::core::language::TargetLanguage;
use crate::emit::{
    fsharp, CSharpEmitter, EmitterOptions, FSharpEmitter, SyntaxEmitter, VisualBasicEmitter,
};

type EmitterFactory = fn(EmitterOptions) -> Box<dyn SyntaxEmitter>;

/// Description of a registered backend.
#[derive(Clone, Copy)]
pub struct BackendInfo {
    /// Language rendered by this backend
    pub language: TargetLanguage,

    /// Brief description
    pub description: &'static str,

    /// Namespace used when the request supplies none. Backends whose grammar
    /// works without a namespace leave this unset.
    pub default_namespace: Option<&'static str>,

    factory: EmitterFactory,
}

impl BackendInfo {
    /// Whether the target grammar requires a namespace declaration.
    pub fn requires_namespace(&self) -> bool {
        self.default_namespace.is_some()
    }

    /// Create a new emitter for this backend.
    pub fn create(&self, options: EmitterOptions) -> Box<dyn SyntaxEmitter> {
        (self.factory)(options)
    }
}

impl std::fmt::Debug for BackendInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendInfo")
            .field("language", &self.language)
            .field("description", &self.description)
            .field("default_namespace", &self.default_namespace)
            .finish()
    }
}

/// Registry of available emitters.
pub struct EmitterRegistry {
    backends: HashMap<TargetLanguage, BackendInfo>,
}

impl EmitterRegistry {
    /// Create a new registry with all built-in backends.
    pub fn new() -> Self {
        let mut registry = EmitterRegistry {
            backends: HashMap::new(),
        };

        registry.register(BackendInfo {
            language: TargetLanguage::CSharp,
            description: "C# constants class and assembly attributes",
            default_namespace: None,
            factory: |opts| Box::new(CSharpEmitter::new(opts)),
        });
        registry.register(BackendInfo {
            language: TargetLanguage::VisualBasic,
            description: "Visual Basic constants class and assembly attributes",
            default_namespace: None,
            factory: |opts| Box::new(VisualBasicEmitter::new(opts)),
        });
        registry.register(BackendInfo {
            language: TargetLanguage::FSharp,
            description: "F# static members and assembly attributes",
            default_namespace: Some(fsharp::DEFAULT_NAMESPACE),
            factory: |opts| Box::new(FSharpEmitter::new(opts)),
        });

        registry
    }

    /// Register a backend, replacing any previous one for the same language.
    pub fn register(&mut self, info: BackendInfo) {
        self.backends.insert(info.language, info);
    }

    /// Get a backend by language.
    pub fn get(&self, language: TargetLanguage) -> Option<&BackendInfo> {
        self.backends.get(&language)
    }

    /// Select a backend by a case-insensitive language identifier.
    pub fn select(&self, identifier: &str) -> Option<&BackendInfo> {
        let language = identifier.parse::<TargetLanguage>().ok()?;
        self.get(language)
    }

    /// All registered backends, in a stable order.
    pub fn all(&self) -> impl Iterator<Item = &BackendInfo> + '_ {
        TargetLanguage::ALL
            .into_iter()
            .filter_map(|lang| self.backends.get(&lang))
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
