//! Sample requests and collaborators.

use crate::core::request::{BuildInfo, GenerationRequest, KeyReference};
use crate::key::{KeyInfo, KeySource};

/// Tick count of 2021-01-01T00:00:00Z.
pub const SAMPLE_COMMIT_TICKS: &str = "637450560000000000";

/// A request with version strings, a public release flag and a commit date.
pub fn sample_request(language: &str) -> GenerationRequest {
    GenerationRequest::new(language).with_build(BuildInfo {
        assembly_version: Some("1.2.3".into()),
        assembly_file_version: Some("1.2.3.4".into()),
        assembly_informational_version: Some("1.2.3-beta+a1b2c3d".into()),
        git_commit_id: Some("a1b2c3d4e5f60718293a4b5c6d7e8f9012345678".into()),
        git_commit_date: Some(SAMPLE_COMMIT_TICKS.into()),
        public_release: true,
        prerelease_version: Some("-beta".into()),
        ..Default::default()
    })
}

/// Key source that resolves every reference to the same key.
#[derive(Debug, Clone)]
pub struct FixedKeySource {
    info: KeyInfo,
}

impl FixedKeySource {
    pub const PUBLIC_KEY: &'static str = "0024000004800000940000000602000000240000525341310004000001000100";
    pub const TOKEN: &'static str = "b03f5f7f11d50a3a";

    pub fn sample() -> Self {
        FixedKeySource {
            info: KeyInfo {
                public_key: Self::PUBLIC_KEY.to_string(),
                public_key_token: Self::TOKEN.to_string(),
            },
        }
    }
}

impl KeySource for FixedKeySource {
    fn resolve(&self, _key: &KeyReference) -> Option<KeyInfo> {
        Some(self.info.clone())
    }
}
