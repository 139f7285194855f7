use crate::config::toml_config::QrConfig;
use crate::core::emblem::EmblemColors;
use crate::core::{payload, render};
use crate::core::{ContactPayload, Pipeline, RenderJob, RenderStyle, RenderedImage, Storage};
use crate::domain::model::RENDER_PLAN;
use crate::utils::error::Result;
use image::DynamicImage;

pub struct ContactPipeline<S: Storage> {
    storage: S,
    config: QrConfig,
}

impl<S: Storage> ContactPipeline<S> {
    pub fn new(storage: S, config: QrConfig) -> Self {
        Self { storage, config }
    }

    /// `--dry-run` 的預覽：payload 與預計輸出的檔名，不會碰到儲存端
    pub async fn dry_run_preview(&self) -> Result<serde_json::Value> {
        let contact = self.build().await?;
        let files: Vec<String> = self
            .plan()
            .iter()
            .map(|job| job.file_name(self.config.prefix()))
            .collect();

        Ok(serde_json::json!({
            "output_dir": self.output_location(),
            "payloads": serde_json::to_value(&contact)?,
            "files": files,
        }))
    }

    fn draw(&self, job: RenderJob, text: &str) -> Result<DynamicImage> {
        let render = &self.config.render;
        let colors = &render.colors;

        let image = match job.style {
            RenderStyle::Plain => DynamicImage::ImageLuma8(render::render_plain(
                text,
                render.plain_module_size,
                render.border,
            )?),
            RenderStyle::Styled => DynamicImage::ImageRgba8(render::render_styled(
                text,
                render.styled_module_size,
                render.border,
                colors.gradient_center,
                colors.gradient_edge,
            )?),
            RenderStyle::Logo => DynamicImage::ImageRgba8(render::render_with_logo(
                text,
                render.logo_module_size,
                render.border,
                render.logo_size,
                colors.logo_dark,
                EmblemColors {
                    fill: colors.logo_fill,
                    outline: colors.logo_outline,
                    ..EmblemColors::default()
                },
            )?),
        };

        Ok(image)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ContactPipeline<S> {
    async fn prepare(&self) -> Result<()> {
        tracing::debug!("Preparing output location: {}", self.storage.location());
        self.storage.prepare().await
    }

    async fn build(&self) -> Result<ContactPayload> {
        let contact = payload::build_payload(&self.config.organization);

        // 在寫入任何檔案之前，先確認每個 payload 都放得進對應的錯誤修正等級
        for job in self.plan() {
            let text = contact.get(job.kind);
            payload::check_capacity(job.kind, text, job.style.ec_level())?;
        }

        for (kind, text) in contact.iter() {
            tracing::debug!("Payload {} ({} bytes)", kind, text.len());
        }

        Ok(contact)
    }

    fn plan(&self) -> Vec<RenderJob> {
        RENDER_PLAN.to_vec()
    }

    async fn render(&self, job: RenderJob, payload: &ContactPayload) -> Result<RenderedImage> {
        let image = self.draw(job, payload.get(job.kind))?;
        let png = render::encode_png(&image)?;

        Ok(RenderedImage {
            job,
            file_name: job.file_name(self.config.prefix()),
            width: image.width(),
            height: image.height(),
            png,
        })
    }

    async fn store(&self, image: &RenderedImage) -> Result<String> {
        self.storage.write_file(&image.file_name, &image.png).await
    }

    fn output_location(&self) -> String {
        self.storage.location()
    }
}
