//! Mapping configuration.
//!
//! [`MappingConfig`] holds the tunables of the type-driven mapping
//! ([`map_dataset_channels`](crate::mapping::map_dataset_channels)).

/// Configuration for type-driven channel mapping.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use chanmap::MappingConfig;
///
/// let cfg = MappingConfig {
///     exclude_stim: false,   // keep the trigger channel as the last extra
///     ..MappingConfig::default()
/// };
/// assert!(!cfg.exclude_stim);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// Drop channels declared as STIM.
    ///
    /// When `false`, a stim channel is kept as an EXTRA channel and pinned
    /// to the last EXTRA slot (`EX5`), whatever its position in the input.
    /// An ordinary extra channel that reaches that slot later still takes
    /// it, and a diagnostic reports the overwrite.
    ///
    /// Default: `true`.
    pub exclude_stim: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self { exclude_stim: true }
    }
}
