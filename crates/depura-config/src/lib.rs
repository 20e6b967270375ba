use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use depura_core::export::{DEFAULT_EXPORT_FILE_NAME, DEFAULT_SHEET_NAME};
use depura_core::rules::{
    ExtractOptions, NamePolicy, NamePolicyKind, DEFAULT_MIN_LETTERS, DEFAULT_MIN_TOKENS,
    DEFAULT_MIN_TOKEN_CHARS,
};
use depura_core::suggest::{DEFAULT_NAME_KEYWORDS, DEFAULT_PHONE_KEYWORDS};
use depura_core::{CoreError, DEFAULT_FALLBACK_NAME};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "depura";
const CONFIG_FILENAME: &str = "config.toml";

pub const MAX_SHEET_NAME_CHARS: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub extract: ExtractConfig,
    pub columns: ColumnsConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub policy: NamePolicyKind,
    pub fallback_name: String,
    pub min_token_chars: usize,
    pub min_tokens: usize,
    pub min_letters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnsConfig {
    pub phone_keywords: Vec<String>,
    pub name_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub sheet_name: String,
    pub file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            columns: ColumnsConfig {
                phone_keywords: DEFAULT_PHONE_KEYWORDS.map(String::from).to_vec(),
                name_keywords: DEFAULT_NAME_KEYWORDS.map(String::from).to_vec(),
            },
            export: ExportConfig {
                sheet_name: DEFAULT_SHEET_NAME.to_string(),
                file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            },
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            policy: NamePolicyKind::Permissive,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
            min_tokens: DEFAULT_MIN_TOKENS,
            min_letters: DEFAULT_MIN_LETTERS,
        }
    }
}

impl ExtractConfig {
    /// Builds extraction options for `kind`, using this config's thresholds.
    pub fn options_for(&self, kind: NamePolicyKind) -> Result<ExtractOptions> {
        let policy = match kind {
            NamePolicyKind::Permissive => NamePolicy::permissive(self.min_token_chars)?,
            NamePolicyKind::Strict => NamePolicy::strict(self.min_tokens, self.min_letters)?,
        };
        Ok(ExtractOptions::new(policy, &self.fallback_name)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid extract settings: {0}")]
    InvalidExtract(#[from] CoreError),
    #[error("invalid sheet name: {0:?}")]
    InvalidSheetName(String),
    #[error("invalid export file name: {0:?}")]
    InvalidFileName(String),
    #[error("{field} must list at least one keyword")]
    EmptyKeywords { field: &'static str },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    extract: Option<ExtractFile>,
    columns: Option<ColumnsFile>,
    export: Option<ExportFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExtractFile {
    policy: Option<NamePolicyKind>,
    fallback_name: Option<String>,
    min_token_chars: Option<usize>,
    min_tokens: Option<usize>,
    min_letters: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnsFile {
    phone_keywords: Option<Vec<String>>,
    name_keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportFile {
    sheet_name: Option<String>,
    file_name: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(extract) = parsed.extract {
        if let Some(policy) = extract.policy {
            config.extract.policy = policy;
        }
        if let Some(name) = extract.fallback_name {
            config.extract.fallback_name = name;
        }
        if let Some(value) = extract.min_token_chars {
            config.extract.min_token_chars = value;
        }
        if let Some(value) = extract.min_tokens {
            config.extract.min_tokens = value;
        }
        if let Some(value) = extract.min_letters {
            config.extract.min_letters = value;
        }
        // --policy can pick either variant at run time, so both must be valid.
        config.extract.options_for(NamePolicyKind::Permissive)?;
        let options = config.extract.options_for(NamePolicyKind::Strict)?;
        config.extract.fallback_name = options.fallback_name().to_string();
    }

    if let Some(columns) = parsed.columns {
        if let Some(keywords) = columns.phone_keywords {
            config.columns.phone_keywords = normalize_keywords(keywords, "phone_keywords")?;
        }
        if let Some(keywords) = columns.name_keywords {
            config.columns.name_keywords = normalize_keywords(keywords, "name_keywords")?;
        }
    }

    if let Some(export) = parsed.export {
        if let Some(sheet_name) = export.sheet_name {
            config.export.sheet_name = validate_sheet_name(&sheet_name)?;
        }
        if let Some(file_name) = export.file_name {
            let trimmed = file_name.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidFileName(file_name));
            }
            config.export.file_name = trimmed.to_string();
        }
    }

    Ok(config)
}

fn normalize_keywords(raw: Vec<String>, field: &'static str) -> Result<Vec<String>> {
    let keywords: Vec<String> = raw
        .into_iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(ConfigError::EmptyKeywords { field });
    }
    Ok(keywords)
}

/// Checks a worksheet name against the limits spreadsheet applications
/// enforce: 1 to 31 characters, none of `[ ] : * ? / \`.
pub fn validate_sheet_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length == 0
        || length > MAX_SHEET_NAME_CHARS
        || trimmed.contains(FORBIDDEN_SHEET_CHARS.as_slice())
        || trimmed.starts_with('\'')
        || trimmed.ends_with('\'')
    {
        return Err(ConfigError::InvalidSheetName(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
