use crate::{
    generation::batch::BatchRunner,
    generation::dimensions::resolve_dimensions,
    generation::executor::TaskExecutor,
    models::{BatchRequest, GeneratedImage, GenerationTask, TaskOutcome},
};
use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::future::Future;
use std::sync::Arc;

/// SeedDream 4.0 MCP service: one single-task tool, one batch tool.
#[derive(Clone)]
pub struct SeedreamService {
    executor: Arc<TaskExecutor>,
    tool_router: ToolRouter<Self>,
}

impl SeedreamService {
    pub fn new(executor: TaskExecutor) -> Self {
        Self {
            executor: Arc::new(executor),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for SeedreamService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Generates images with SeedDream 4.0 via the Volcengine Ark API. Use 'generate_image' for a single prompt and 'batch_generate_images' to run up to 20 prompts concurrently under a concurrency cap.".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

#[tool_router]
impl SeedreamService {
    #[tool(
        description = "Generate a single or multiple images from a text prompt using SeedDream 4.0 via the Volcengine Ark API. Supports bilingual prompts (English and Chinese), multiple aspect ratios, reference images (local paths or URLs), and optionally saving results to disk."
    )]
    pub async fn generate_image(
        &self,
        Parameters(task): Parameters<GenerationTask>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.executor.run(0, &task).await;
        if outcome.success {
            Ok(CallToolResult::success(vec![Content::text(
                render_single_report(&task, &outcome),
            )]))
        } else {
            let message = outcome
                .error_message
                .unwrap_or_else(|| "unknown error".to_string());
            Ok(CallToolResult::error(vec![Content::text(format!(
                "❌ Failed to generate image: {}",
                message
            ))]))
        }
    }

    #[tool(
        description = "Generate images for up to 20 independent tasks concurrently, capped by max_concurrent. Tasks succeed or fail independently; the report lists every task's outcome in submission order."
    )]
    pub async fn batch_generate_images(
        &self,
        Parameters(request): Parameters<BatchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let runner = match BatchRunner::new(request.max_concurrent) {
            Ok(runner) => runner,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };

        let tasks = request.tasks;
        let executor = self.executor.clone();
        let outcomes = runner
            .run_all(tasks.clone(), move |index, task| {
                let executor = executor.clone();
                async move { executor.run(index, &task).await }
            })
            .await;

        match outcomes {
            Ok(outcomes) => Ok(CallToolResult::success(vec![Content::text(
                render_batch_report(&tasks, &outcomes),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }
}

fn render_single_report(task: &GenerationTask, outcome: &TaskOutcome) -> String {
    let mut report = format!(
        "✅ Successfully generated {} image(s) using SeedDream 4.0:\n\n",
        outcome.images.len()
    );
    report.push_str(&format!("📝 Prompt: \"{}\"\n", task.prompt));
    report.push_str(&format!("📐 Aspect Ratio: {}\n", task.aspect_ratio));
    if let Ok(dims) = resolve_dimensions(&task.aspect_ratio, task.size, task.width, task.height) {
        report.push_str(&format!("📏 Size: {}\n", dims.size_token()));
    }
    report.push_str(&format!("🎯 Guidance Scale: {}\n", task.guidance_scale));
    if let Some(seed) = task.seed {
        report.push_str(&format!("🌱 Seed: {}\n", seed));
    }
    report.push_str("\n🖼️  Generated Images:\n");
    report.push_str(&render_images(&outcome.images));
    report
}

fn render_batch_report(tasks: &[GenerationTask], outcomes: &[TaskOutcome]) -> String {
    let succeeded = outcomes.iter().filter(|o| o.success).count();
    let failed = outcomes.len() - succeeded;
    let mut report = format!(
        "📦 Batch complete: {} task(s), {} succeeded, {} failed\n",
        outcomes.len(),
        succeeded,
        failed
    );

    for outcome in outcomes {
        let prompt = tasks
            .get(outcome.task_index)
            .map(|t| t.prompt.as_str())
            .unwrap_or("");
        report.push_str(&format!("\n--- Task {} ---\n", outcome.task_index + 1));
        report.push_str(&format!("📝 Prompt: \"{}\"\n", prompt));
        if outcome.success {
            report.push_str(&format!("✅ Generated {} image(s):\n", outcome.images.len()));
            report.push_str(&render_images(&outcome.images));
        } else {
            report.push_str(&format!(
                "❌ {}\n",
                outcome.error_message.as_deref().unwrap_or("unknown error")
            ));
        }
    }
    report
}

fn render_images(images: &[GeneratedImage]) -> String {
    let mut out = String::new();
    for (index, image) in images.iter().enumerate() {
        out.push_str(&format!("\nImage {}: {}\n", index + 1, image.url));
        if let Some(revised) = &image.revised_prompt {
            out.push_str(&format!("  Revised Prompt: {}\n", revised));
        }
        if let Some(path) = &image.saved_path {
            out.push_str(&format!("  Saved to: {}\n", path.display()));
        }
        if let Some(save_error) = &image.save_error {
            out.push_str(&format!("  ⚠️ Not saved: {}\n", save_error));
        }
    }
    out
}
