use crate::errors::AgentError;

/// Agent loop settings.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Name reported in every reply.
    pub name: String,
    /// Maximum tool calls per request.
    pub max_steps: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "ProductConsultant".into(),
            max_steps: 4,
        }
    }
}

impl AgentConfig {
    /// Reads `AGENT_MAX_STEPS` (default 4, must be > 0).
    pub fn from_env() -> Result<Self, AgentError> {
        let mut cfg = Self::default();
        if let Ok(raw) = std::env::var("AGENT_MAX_STEPS") {
            if !raw.trim().is_empty() {
                cfg.max_steps = raw
                    .trim()
                    .parse()
                    .map_err(|e| AgentError::Config(format!("AGENT_MAX_STEPS: {e}")))?;
            }
        }
        if cfg.max_steps == 0 {
            return Err(AgentError::Config("AGENT_MAX_STEPS must be > 0".into()));
        }
        Ok(cfg)
    }
}
