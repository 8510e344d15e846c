//! Mux configuration

use grove_router::ParamNames;

/// Mux configuration
#[derive(Debug, Clone)]
pub struct MuxConfig {
    /// Policy for different parameter names at one trie position
    pub param_names: ParamNames,
    /// Body of the response sent when no route matches
    pub not_found_body: String,
    /// Content type of that response
    pub not_found_content_type: String,
}

impl MuxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail registrations that rename a parameter at a shared position
    pub fn strict_params(mut self) -> Self {
        self.param_names = ParamNames::Reject;
        self
    }

    pub fn param_names(mut self, policy: ParamNames) -> Self {
        self.param_names = policy;
        self
    }

    pub fn not_found_body(mut self, body: impl Into<String>) -> Self {
        self.not_found_body = body.into();
        self
    }

    pub fn not_found_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.not_found_content_type = content_type.into();
        self
    }
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            param_names: ParamNames::LastWins,
            not_found_body: "Not Found".to_string(),
            not_found_content_type: "text/plain; charset=utf-8".to_string(),
        }
    }
}
