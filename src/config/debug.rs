//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. Only compiled into debug builds.

pub struct DebugFlags {
    /// Emit one line per annotation dropped during overlay validation.
    pub print_skipped_annotations: bool,
    /// Emit compose/rasterize timings for every render pass.
    pub print_render_timings: bool,
    /// Emit image load lifecycle events (begin, stale result discarded, ready).
    pub print_load_events: bool,
    /// Emit UI interaction logs (toggle, download, load clicks).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization logs.
    pub print_state_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_skipped_annotations: false,
    print_render_timings: false,
    print_load_events: true,
    print_ui_interactions: true,
    print_state_serde: false,
};
