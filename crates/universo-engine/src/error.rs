/// Errors raised while loading a [`UniverseConfig`](crate::UniverseConfig).
///
/// Configuration is the only fallible input of the engine; everything the
/// render loop does afterwards is infallible by construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected exactly {expected} planets, found {found}")]
    BodyCount { expected: usize, found: usize },

    #[error("planet {index} is invalid: {reason}")]
    InvalidPlanet { index: usize, reason: &'static str },
}
