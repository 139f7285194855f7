use crate::core::Pipeline;
use crate::domain::model::{Artifact, RunReport};
use crate::utils::error::Result;

pub struct QrEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> QrEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序產生所有 QR 圖檔；第一個錯誤即中止，已寫出的檔案保留
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🌱 Generating QR codes...");

        self.pipeline.prepare().await?;
        let payload = self.pipeline.build().await?;

        let plan = self.pipeline.plan();
        let mut artifacts = Vec::with_capacity(plan.len());

        for job in plan {
            let image = self.pipeline.render(job, &payload).await?;
            let path = self.pipeline.store(&image).await?;
            tracing::info!("✅ QR generated: {} ({}x{})", image.file_name, image.width, image.height);

            artifacts.push(Artifact {
                path,
                description: job.description(),
                width: image.width,
                height: image.height,
            });
        }

        let output_dir = self.pipeline.output_location();
        tracing::info!(
            "📁 {} QR codes written to '{}'",
            artifacts.len(),
            output_dir
        );

        Ok(RunReport {
            output_dir,
            artifacts,
        })
    }
}
