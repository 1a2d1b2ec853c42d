//! File persistence configuration

pub struct ExportConfig {
    /// Exported PNGs are named `<prefix>-<epoch-ms>.png`
    pub file_prefix: &'static str,
    /// Directory used when the caller does not pick one
    pub default_directory: &'static str,
}

pub struct AppStateConfig {
    /// Path for saving/loading the viewer UI state
    pub path: &'static str,
}

pub struct PersistenceConfig {
    pub export: ExportConfig,
    pub app: AppStateConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    export: ExportConfig {
        file_prefix: "chart-analysis",
        default_directory: "exports",
    },
    app: AppStateConfig {
        path: ".states.json",
    },
};

/// Generate the export filename for a moment in time
/// Example: "chart-analysis-1718035200000.png"
pub fn export_file_name(epoch_ms: i64) -> String {
    format!("{}-{}.png", PERSISTENCE.export.file_prefix, epoch_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_name_uses_epoch_millis() {
        assert_eq!(
            export_file_name(1_718_035_200_123),
            "chart-analysis-1718035200123.png"
        );
    }
}
