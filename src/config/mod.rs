pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::QrConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ffo-qr")]
#[command(about = "Generate contact QR codes (web, email, phone, location, vCard) as PNG images")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "qr-config.toml")]
    pub config: PathBuf,

    /// Override the output directory from the config
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Override the file name prefix from the config
    #[arg(long)]
    pub prefix: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Show payloads and planned files without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut QrConfig) {
        if let Some(dir) = &self.output_dir {
            tracing::info!("🔧 Output directory overridden to: {}", dir.display());
            config.output.directory = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            tracing::info!("🔧 File prefix overridden to: {}", prefix);
            config.output.prefix = prefix.clone();
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = CliConfig::parse_from(["ffo-qr"]);
        assert_eq!(cli.config, PathBuf::from("qr-config.toml"));
        assert!(cli.output_dir.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = CliConfig::parse_from(["ffo-qr", "--output-dir", "/tmp/out", "--prefix", "acme"]);
        let mut config = QrConfig::from_toml_str(
            r#"
[organization]
name = "ACME"
organization = "ACME Corp"
website = "https://acme.test"
email = "hi@acme.test"
phone = "+1 555 0100"
"#,
        )
        .unwrap();

        cli.apply_overrides(&mut config);
        assert_eq!(config.output_dir(), std::path::Path::new("/tmp/out"));
        assert_eq!(config.prefix(), "acme");
    }
}
