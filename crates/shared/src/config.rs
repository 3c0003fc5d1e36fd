//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Local persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Listing configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Local persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the local cache files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// File name of the record cache inside `data_dir`.
    #[serde(default = "default_records_file")]
    pub records_file: String,
    /// File name of the column settings inside `data_dir`.
    #[serde(default = "default_columns_file")]
    pub columns_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_records_file() -> String {
    "records.json".to_string()
}

fn default_columns_file() -> String {
    "columns.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            records_file: default_records_file(),
            columns_file: default_columns_file(),
        }
    }
}

impl StorageConfig {
    /// Full path of the record cache file.
    #[must_use]
    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(&self.records_file)
    }

    /// Full path of the column settings file.
    #[must_use]
    pub fn columns_path(&self) -> PathBuf {
        self.data_dir.join(&self.columns_file)
    }
}

/// Listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Rows per page when listing records.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to when no explicit path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Title printed on the HTML/PDF report.
    #[serde(default = "default_report_title")]
    pub report_title: String,
    /// School name printed under the report title.
    #[serde(default)]
    pub school_name: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_report_title() -> String {
    "Kertas Kerja Perubahan".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            report_title: default_report_title(),
            school_name: String::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("RKAS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = temp_env::with_var_unset("RUN_MODE", AppConfig::load);
        let config = config.unwrap();

        assert_eq!(config.storage.records_path(), PathBuf::from("data/records.json"));
        assert_eq!(config.storage.columns_path(), PathBuf::from("data/columns.json"));
        assert_eq!(config.display.page_size, 10);
        assert_eq!(config.export.report_title, "Kertas Kerja Perubahan");
    }

    #[test]
    fn test_env_overrides() {
        let config = temp_env::with_vars(
            [
                ("RKAS__STORAGE__DATA_DIR", Some("/tmp/rkas")),
                ("RKAS__DISPLAY__PAGE_SIZE", Some("25")),
                ("RKAS__EXPORT__SCHOOL_NAME", Some("SD Negeri 1")),
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(
            config.storage.records_path(),
            PathBuf::from("/tmp/rkas/records.json")
        );
        assert_eq!(config.display.page_size, 25);
        assert_eq!(config.export.school_name, "SD Negeri 1");
    }
}
