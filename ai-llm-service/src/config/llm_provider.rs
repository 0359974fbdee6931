/// Represents the backend used for chat and embedding inference.
///
/// The storefront assistant runs against a local Ollama runtime. New backends
/// are added by extending this enum and the match arms in
/// [`crate::service_profiles::LlmServiceProfiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
}
