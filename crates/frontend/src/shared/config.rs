use contracts::shared::export::ExportFormat;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub deletion: DeletionConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    /// 0 выключает автообновление
    #[serde(default)]
    pub auto_refresh_secs: u32,
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DeletionConfig {
    pub confirm_phrase: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    pub formats: Vec<ExportFormat>,
}

fn default_search_min_chars() -> usize {
    3
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Конфигурация по умолчанию, встроенная в сборку
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[list]
default_page_size = 50
page_size_options = [25, 50, 100, 200]
auto_refresh_secs = 0
search_min_chars = 3

[deletion]
confirm_phrase = "УДАЛИТЬ"

[export]
formats = ["csv", "xlsx", "json"]
"#;

/// Ключ localStorage с переопределением конфигурации (TOML целиком)
const STORAGE_KEY: &str = "app_config";

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.list.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "list.default_page_size must be positive".to_string(),
            ));
        }
        if self.list.page_size_options.iter().any(|&size| size == 0) {
            return Err(ConfigError::Invalid(
                "list.page_size_options must be positive".to_string(),
            ));
        }
        if self.deletion.confirm_phrase.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "deletion.confirm_phrase must not be empty".to_string(),
            ));
        }
        if self.export.formats.is_empty() {
            return Err(ConfigError::Invalid(
                "export.formats must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Загрузка конфигурации
    ///
    /// Порядок поиска:
    /// 1. localStorage[`app_config`]
    /// 2. Встроенная конфигурация
    pub fn load() -> Self {
        if let Some(contents) = read_storage_override() {
            match Self::parse(&contents) {
                Ok(config) => {
                    log::info!(target: "config", "Loaded config override from localStorage");
                    return config;
                }
                Err(e) => {
                    log::warn!(target: "config", "Ignoring config override: {}", e);
                }
            }
        }
        Self::default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        match Self::parse(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                // Встроенная конфигурация покрыта тестом, сюда попадать не должны
                log::error!(target: "config", "Embedded config is broken: {}", e);
                Self {
                    api: ApiConfig { port: 3000 },
                    list: ListConfig {
                        default_page_size: 50,
                        page_size_options: vec![25, 50, 100, 200],
                        auto_refresh_secs: 0,
                        search_min_chars: default_search_min_chars(),
                    },
                    deletion: DeletionConfig {
                        confirm_phrase: "УДАЛИТЬ".to_string(),
                    },
                    export: ExportConfig {
                        formats: ExportFormat::ALL.to_vec(),
                    },
                }
            }
        }
    }
}

fn read_storage_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(STORAGE_KEY)
        .ok()?
}
