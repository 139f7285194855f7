use anyhow::Result;
use ffo_qr::core::payload::build_payload;
use ffo_qr::core::render;
use ffo_qr::{ContactPipeline, LocalStorage, PayloadKind, QrConfig, QrEngine, QrGenError};
use std::path::Path;
use tempfile::TempDir;

const EXPECTED_FILES: [&str; 7] = [
    "ffo_web.png",
    "ffo_web_estilizado.png",
    "ffo_web_con_logo.png",
    "ffo_email.png",
    "ffo_telefono.png",
    "ffo_ubicacion.png",
    "ffo_contacto_completo.png",
];

fn config_for(output_dir: &Path) -> QrConfig {
    let mut config = QrConfig::from_file(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("qr-config.toml"),
    )
    .unwrap();
    config.output.directory = output_dir.to_path_buf();
    config
}

fn engine_for(config: QrConfig) -> QrEngine<ContactPipeline<LocalStorage>> {
    let storage = LocalStorage::new(config.output_dir().to_path_buf());
    QrEngine::new(ContactPipeline::new(storage, config))
}

/// 以 rqrr 解碼 PNG，回傳第一個找到的 QR 內容
fn decode_png(path: &Path) -> Result<String> {
    let img = image::open(path)?.to_luma8();
    let (width, height) = img.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            img.get_pixel(x as u32, y as u32).0[0]
        });
    let grids = prepared.detect_grids();
    let grid = grids
        .first()
        .ok_or_else(|| anyhow::anyhow!("no QR code found in {}", path.display()))?;
    let (_meta, content) = grid.decode()?;
    Ok(content)
}

#[tokio::test]
async fn test_end_to_end_generates_every_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("qr_codes");

    let report = engine_for(config_for(&output_dir)).run().await?;

    assert_eq!(report.artifacts.len(), EXPECTED_FILES.len());
    for name in EXPECTED_FILES {
        let path = output_dir.join(name);
        assert!(path.is_file(), "missing {}", path.display());
    }

    let reported: Vec<String> = report
        .artifacts
        .iter()
        .map(|a| {
            Path::new(&a.path)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(reported, EXPECTED_FILES);
    Ok(())
}

#[tokio::test]
async fn test_existing_output_directory_is_reused() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("qr_codes");
    std::fs::create_dir_all(&output_dir)?;

    engine_for(config_for(&output_dir)).run().await?;
    let first = std::fs::read(output_dir.join("ffo_web.png"))?;

    // 第二次執行覆寫同樣的檔案，內容完全相同
    engine_for(config_for(&output_dir)).run().await?;
    let second = std::fs::read(output_dir.join("ffo_web.png"))?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_every_code_decodes_to_its_payload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("qr_codes");
    let config = config_for(&output_dir);
    let payload = build_payload(&config.organization);

    engine_for(config).run().await?;

    assert_eq!(decode_png(&output_dir.join("ffo_web.png"))?, "https://ffo-sa.com");
    // 圓角漸層與中央標誌都不能影響掃描
    assert_eq!(
        decode_png(&output_dir.join("ffo_web_estilizado.png"))?,
        "https://ffo-sa.com"
    );
    assert_eq!(
        decode_png(&output_dir.join("ffo_web_con_logo.png"))?,
        "https://ffo-sa.com"
    );
    assert_eq!(
        decode_png(&output_dir.join("ffo_email.png"))?,
        "mailto:info@ffo.com.ar"
    );
    assert_eq!(
        decode_png(&output_dir.join("ffo_telefono.png"))?,
        payload.get(PayloadKind::Phone)
    );
    assert_eq!(
        decode_png(&output_dir.join("ffo_ubicacion.png"))?,
        payload.get(PayloadKind::Location)
    );
    assert_eq!(
        decode_png(&output_dir.join("ffo_contacto_completo.png"))?,
        payload.get(PayloadKind::FullCard)
    );
    Ok(())
}

#[tokio::test]
async fn test_plain_web_code_is_black_and_white() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("qr_codes");

    engine_for(config_for(&output_dir)).run().await?;

    let img = image::open(output_dir.join("ffo_web.png"))?.to_luma8();
    assert!(img.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    Ok(())
}

#[tokio::test]
async fn test_logo_output_matches_carrier_size() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("qr_codes");
    let config = config_for(&output_dir);

    let carrier = render::render_carrier(
        &config.organization.website,
        config.render.logo_module_size,
        config.render.border,
        config.render.colors.logo_dark,
    )?;

    engine_for(config).run().await?;

    let logo = image::open(output_dir.join("ffo_web_con_logo.png"))?;
    assert_eq!((logo.width(), logo.height()), carrier.dimensions());
    Ok(())
}

#[tokio::test]
async fn test_prefix_changes_file_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = config_for(temp_dir.path());
    config.output.prefix = "acme".to_string();

    engine_for(config).run().await?;

    assert!(temp_dir.path().join("acme_web_con_logo.png").is_file());
    assert!(!temp_dir.path().join("ffo_web.png").exists());
    Ok(())
}

#[tokio::test]
async fn test_oversized_payload_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("qr_codes");
    let mut config = config_for(&output_dir);
    config.organization.note = Some("Enmienda ".repeat(400));

    let result = engine_for(config).run().await;

    assert!(matches!(result, Err(QrGenError::PayloadTooLong { .. })));
    assert_eq!(std::fs::read_dir(&output_dir)?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_oversized_logo_fails_loudly() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = config_for(temp_dir.path());
    config.render.logo_size = 1000;

    let err = engine_for(config).run().await.unwrap_err();

    assert!(matches!(err, QrGenError::LogoTooLarge { logo: 1000, .. }));
    assert_eq!(err.exit_code(), 2);
    // 失敗前已產生的檔案保留
    assert!(temp_dir.path().join("ffo_web.png").is_file());
    Ok(())
}
