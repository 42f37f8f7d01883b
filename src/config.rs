//! Encoder configuration

/// Switches for encoding behavior beyond the baseline field dispatch
///
/// The defaults reproduce the baseline encoder: bool, byte and integer fields
/// are recorded but write no bytes, and top-level structs carry no stop byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Encode bool/byte/i16/i32/i64 fields through the writer's scalar writes.
    ///
    /// When set, double, set and map fields fail with
    /// [`Error::Unsupported`](crate::Error::Unsupported) instead of being
    /// skipped.
    pub scalar_fields: bool,
    /// Append a stop byte when a top-level instance is finished
    pub terminate_top_level: bool,
}

impl EncodeConfig {
    /// Baseline configuration
    #[inline]
    pub const fn new() -> Self {
        Self {
            scalar_fields: false,
            terminate_top_level: false,
        }
    }

    /// Set [`scalar_fields`](Self::scalar_fields)
    #[inline]
    pub const fn with_scalar_fields(mut self, enabled: bool) -> Self {
        self.scalar_fields = enabled;
        self
    }

    /// Set [`terminate_top_level`](Self::terminate_top_level)
    #[inline]
    pub const fn with_terminate_top_level(mut self, enabled: bool) -> Self {
        self.terminate_top_level = enabled;
        self
    }
}
