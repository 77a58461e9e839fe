//! Build configuration.

/// Configuration shared by every fragment render and by the workspace.
///
/// All fields have conservative defaults; use the fluent setters to
/// override individual options.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Prefix for the temporary workspace directory name.
    pub temp_prefix: String,

    /// Default embedded image width in millimeters.
    pub default_image_width_mm: u32,

    /// Default header-column label for native tables.
    pub default_table_header: String,

    /// Default index-column label for native tables.
    pub default_index_label: String,
}

impl BuildConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the temporary directory name prefix.
    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Set the default image width in millimeters.
    pub fn with_image_width_mm(mut self, width_mm: u32) -> Self {
        self.default_image_width_mm = width_mm;
        self
    }

    /// Set the default header-column label for native tables.
    pub fn with_table_header(mut self, label: impl Into<String>) -> Self {
        self.default_table_header = label.into();
        self
    }

    /// Set the default index-column label for native tables.
    pub fn with_index_label(mut self, label: impl Into<String>) -> Self {
        self.default_index_label = label.into();
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            temp_prefix: "dw_".to_string(),
            default_image_width_mm: 150,
            default_table_header: String::new(),
            default_index_label: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.temp_prefix, "dw_");
        assert_eq!(config.default_image_width_mm, 150);
        assert!(config.default_table_header.is_empty());
        assert!(config.default_index_label.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = BuildConfig::new()
            .with_temp_prefix("report_")
            .with_image_width_mm(120)
            .with_index_label("sample");

        assert_eq!(config.temp_prefix, "report_");
        assert_eq!(config.default_image_width_mm, 120);
        assert_eq!(config.default_index_label, "sample");
    }
}
