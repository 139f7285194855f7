use crate::domain::model::{ContactPayload, RenderJob, RenderedImage};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// 建立輸出位置；重複呼叫不可失敗
    fn prepare(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
    fn location(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn prepare(&self) -> Result<()>;
    async fn build(&self) -> Result<ContactPayload>;
    fn plan(&self) -> Vec<RenderJob>;
    async fn render(&self, job: RenderJob, payload: &ContactPayload) -> Result<RenderedImage>;
    async fn store(&self, image: &RenderedImage) -> Result<String>;
    fn output_location(&self) -> String;
}
