/// Errors raised when a drone configuration is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("'{field}' must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("'{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("pitch range is inverted: min {min} > max {max}")]
    InvertedPitchRange { min: f32, max: f32 },

    #[error("walkable floor normal Z must be within (0, 1], got {0}")]
    FloorNormalOutOfRange(f32),
}
