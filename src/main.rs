use clap::Parser;
use ffo_qr::utils::{logger, validation::Validate};
use ffo_qr::{CliConfig, ContactPipeline, LocalStorage, QrConfig, QrEngine, QrGenError};

fn report_failure(stage: &str, e: &QrGenError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🌱 ffo-qr contact QR generator");
    tracing::info!("📁 Loading configuration from: {}", cli.config.display());

    let mut config = match QrConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => report_failure("Loading configuration", &e),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        report_failure("Configuration validation", &e);
    }

    let storage = LocalStorage::new(config.output_dir().to_path_buf());
    let pipeline = ContactPipeline::new(storage, config);

    if cli.dry_run {
        tracing::info!("🔍 Dry run: nothing will be written");
        let preview = match pipeline.dry_run_preview().await {
            Ok(preview) => preview,
            Err(e) => report_failure("Building payloads", &e),
        };
        match serde_json::to_string_pretty(&preview) {
            Ok(json) => println!("{}", json),
            Err(e) => report_failure("Dry run output", &QrGenError::from(e)),
        }
        return Ok(());
    }

    let engine = QrEngine::new(pipeline);
    match engine.run().await {
        Ok(report) => {
            println!("✅ All QR codes were generated in '{}'", report.output_dir);
            println!();
            println!("Generated files:");
            for artifact in &report.artifacts {
                println!("  {} - {}", artifact.path, artifact.description);
            }
        }
        Err(e) => report_failure("QR generation", &e),
    }

    Ok(())
}
