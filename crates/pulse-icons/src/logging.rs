//! Logging targets for icon resolution.
//!
//! The crate logs through `tracing` and never installs a subscriber itself.
//! Install one in the application to see output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("pulse_icons::matcher=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Catalog scanning target.
    pub const CATALOG: &str = "pulse_icons::catalog";
    /// Device name matching target.
    pub const MATCHER: &str = "pulse_icons::matcher";
    /// Device icon resolution target.
    pub const RESOLVER: &str = "pulse_icons::resolver";
    /// Platform icon resolution target.
    pub const PLATFORM: &str = "pulse_icons::platform";
    /// Asset hot-reload target.
    pub const HOT_RELOAD: &str = "pulse_icons::hot_reload";
}
