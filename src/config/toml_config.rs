use crate::utils::error::{QrGenError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    pub organization: Organization,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// vCard FN
    pub name: String,
    /// vCard ORG
    pub organization: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("qr_codes"),
            prefix: "ffo".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 靜區寬度（模組數）
    pub border: u32,
    pub plain_module_size: u32,
    pub styled_module_size: u32,
    pub logo_module_size: u32,
    /// 中央標誌邊長（像素）
    pub logo_size: u32,
    pub colors: ColorConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            border: 4,
            plain_module_size: 10,
            styled_module_size: 10,
            logo_module_size: 15,
            logo_size: 60,
            colors: ColorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub gradient_center: [u8; 3],
    pub gradient_edge: [u8; 3],
    pub logo_dark: [u8; 3],
    pub logo_fill: [u8; 3],
    pub logo_outline: [u8; 3],
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            gradient_center: [74, 124, 89],
            gradient_edge: [45, 90, 39],
            logo_dark: [74, 124, 89],
            logo_fill: [74, 124, 89],
            logo_outline: [45, 90, 39],
        }
    }
}

impl QrConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| QrGenError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QrGenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FFO_PHONE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QrGenError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let org = &self.organization;
        validation::validate_non_empty_string("organization.name", &org.name)?;
        validation::validate_non_empty_string("organization.organization", &org.organization)?;
        validation::validate_url("organization.website", &org.website)?;
        validation::validate_email("organization.email", &org.email)?;
        validation::validate_phone("organization.phone", &org.phone)?;

        match (org.address.latitude, org.address.longitude) {
            (Some(lat), Some(lon)) => {
                validation::validate_range("organization.address.latitude", lat, -90.0, 90.0)?;
                validation::validate_range("organization.address.longitude", lon, -180.0, 180.0)?;
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(QrGenError::MissingConfigError {
                    field: "organization.address.longitude".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(QrGenError::MissingConfigError {
                    field: "organization.address.latitude".to_string(),
                })
            }
        }

        validation::validate_path(
            "output.directory",
            &self.output.directory.to_string_lossy(),
        )?;
        validation::validate_file_prefix("output.prefix", &self.output.prefix)?;

        let render = &self.render;
        validation::validate_range("render.border", render.border, 0, 20)?;
        validation::validate_range("render.plain_module_size", render.plain_module_size, 1, 100)?;
        validation::validate_range("render.styled_module_size", render.styled_module_size, 1, 100)?;
        validation::validate_range("render.logo_module_size", render.logo_module_size, 1, 100)?;
        validation::validate_range("render.logo_size", render.logo_size, 8, 1000)?;

        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output.directory
    }

    pub fn prefix(&self) -> &str {
        &self.output.prefix
    }
}

impl Validate for QrConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
