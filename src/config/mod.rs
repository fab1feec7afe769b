use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::PlannerError,
    export::{ExportSettings, DEFAULT_FILE_PREFIX},
    planner::AcknowledgementPolicy,
    schedule::FrequencyPattern,
};

const DEFAULT_DIR_NAME: &str = ".microdose_planner";
const HOME_ENV: &str = "MICRODOSE_PLANNER_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences for schedule defaults and export labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub summary: String,
    pub product_id: String,
    pub uid_domain: String,
    pub file_prefix: String,
    pub default_pattern: FrequencyPattern,
    pub acknowledgement_policy: AcknowledgementPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let labels = ExportSettings::default();
        Self {
            summary: labels.summary,
            product_id: labels.product_id,
            uid_domain: labels.uid_domain,
            file_prefix: DEFAULT_FILE_PREFIX.into(),
            default_pattern: FrequencyPattern::default(),
            acknowledgement_policy: AcknowledgementPolicy::default(),
            export_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 7] = [
        "summary",
        "product_id",
        "uid_domain",
        "file_prefix",
        "default_pattern",
        "acknowledgement_policy",
        "export_dir",
    ];

    /// Updates a single field from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        match key {
            "summary" => self.summary = value.to_string(),
            "product_id" => self.product_id = value.to_string(),
            "uid_domain" => self.uid_domain = value.to_string(),
            "file_prefix" => self.file_prefix = value.to_string(),
            "default_pattern" => self.default_pattern = value.parse()?,
            "acknowledgement_policy" => self.acknowledgement_policy = value.parse()?,
            "export_dir" => {
                self.export_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            other => {
                return Err(PlannerError::InvalidConfig(format!(
                    "unknown key `{}`",
                    other
                )))
            }
        }
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.microdose_planner`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, PlannerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, PlannerError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, PlannerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), PlannerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<(), PlannerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
