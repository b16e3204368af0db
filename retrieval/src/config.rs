use serde::{Deserialize, Serialize};

/// Configuration for context retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest documents requested from the vector index
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Hard cap on the assembled context, in characters
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

fn default_top_k() -> usize {
    5
}

fn default_max_context_chars() -> usize {
    5000
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

impl RetrievalConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k == 0 {
            return Err("top_k must be > 0".to_string());
        }

        if self.max_context_chars == 0 {
            return Err("max_context_chars must be > 0".to_string());
        }

        Ok(())
    }
}

/// Configuration for hypothetical-answer query expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Output cap for the hypothetical answer
    #[serde(default = "default_expansion_tokens")]
    pub max_output_tokens: u32,
}

fn default_expansion_tokens() -> u32 {
    200
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: default_expansion_tokens(),
        }
    }
}

impl ExpansionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_output_tokens == 0 {
            return Err("expansion max_output_tokens must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_valid() {
        let config = RetrievalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_k, 5);
        assert_eq!(config.max_context_chars, 5000);
        assert!(ExpansionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = RetrievalConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = RetrievalConfig::default();
        config.max_context_chars = 0;
        assert!(config.validate().is_err());

        let expansion = ExpansionConfig {
            max_output_tokens: 0,
        };
        assert!(expansion.validate().is_err());
    }
}
