use crate::{
    ark::ArkClient,
    config::ArkConfig,
    error::{Result, SeedreamError},
    generation::dimensions::{resolve_dimensions, Dimensions},
    generation::reference::ReferenceImageProcessor,
    generation::store::ImageStore,
    models::{
        ArkImageRequest, GeneratedImage, GenerationTask, TaskOutcome, MAX_GUIDANCE_SCALE,
        MAX_IMAGES_PER_TASK, MIN_GUIDANCE_SCALE, MIN_IMAGES_PER_TASK,
    },
};

/// Runs one generation task end to end: validate, resolve dimensions,
/// normalize references, call the Ark API, persist when requested.
pub struct TaskExecutor {
    client: ArkClient,
    references: ReferenceImageProcessor,
    store: ImageStore,
}

impl TaskExecutor {
    pub fn new(config: &ArkConfig) -> Result<Self> {
        Ok(Self {
            client: ArkClient::new(config)?,
            references: ReferenceImageProcessor::new(),
            store: ImageStore::new()?,
        })
    }

    pub fn with_parts(
        client: ArkClient,
        references: ReferenceImageProcessor,
        store: ImageStore,
    ) -> Self {
        Self {
            client,
            references,
            store,
        }
    }

    pub async fn execute(&self, task: &GenerationTask) -> Result<Vec<GeneratedImage>> {
        validate_task(task)?;

        let dimensions =
            resolve_dimensions(&task.aspect_ratio, task.size, task.width, task.height)?;

        log::info!(
            "🎨 Generating {} image(s) at {} ({})",
            task.num_images,
            dimensions.size_token(),
            task.aspect_ratio
        );

        let reference_images = if task.reference_images.is_empty() {
            None
        } else {
            Some(self.references.process(&task.reference_images).await?)
        };

        let request = self.build_request(task, &dimensions, reference_images);
        let data = self.client.image().generate(request).await?;

        let mut images: Vec<GeneratedImage> = data
            .into_iter()
            .map(|row| GeneratedImage::new(row.url, row.revised_prompt))
            .collect();

        if let Some(dir) = ImageStore::resolve_output_dir(task.output_directory.as_deref()) {
            self.store
                .save_all(&dir, &mut images, task.filename.as_deref())
                .await;
        }

        log::info!("✅ Generation complete: {} image(s)", images.len());
        Ok(images)
    }

    /// Batch entry point: every failure is captured in the outcome so one
    /// task can never poison the batch.
    pub async fn run(&self, task_index: usize, task: &GenerationTask) -> TaskOutcome {
        match self.execute(task).await {
            Ok(images) => TaskOutcome::succeeded(task_index, images),
            Err(e) => {
                log::error!("❌ Task {} failed: {}", task_index + 1, e);
                TaskOutcome::failed(task_index, e.to_string())
            }
        }
    }

    fn build_request(
        &self,
        task: &GenerationTask,
        dimensions: &Dimensions,
        reference_images: Option<Vec<String>>,
    ) -> ArkImageRequest {
        let mut request = ArkImageRequest::new(
            self.client.image().model_id(),
            task.prompt.clone(),
            dimensions.size_token(),
        );
        if task.num_images > 1 {
            request.n = Some(task.num_images);
        }
        request.seed = task.seed;
        request.image = reference_images;
        request
    }
}

pub fn validate_task(task: &GenerationTask) -> Result<()> {
    if task.prompt.trim().is_empty() {
        return Err(SeedreamError::ValidationError(
            "prompt must not be empty".to_string(),
        ));
    }
    if !(MIN_GUIDANCE_SCALE..=MAX_GUIDANCE_SCALE).contains(&task.guidance_scale) {
        return Err(SeedreamError::ValidationError(format!(
            "guidance_scale must be between {} and {}",
            MIN_GUIDANCE_SCALE, MAX_GUIDANCE_SCALE
        )));
    }
    if !(MIN_IMAGES_PER_TASK..=MAX_IMAGES_PER_TASK).contains(&task.num_images) {
        return Err(SeedreamError::ValidationError(format!(
            "num_images must be between {} and {}",
            MIN_IMAGES_PER_TASK, MAX_IMAGES_PER_TASK
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(prompt: &str) -> GenerationTask {
        serde_json::from_value(serde_json::json!({ "prompt": prompt })).unwrap()
    }

    fn executor() -> TaskExecutor {
        // No API key: anything that reaches the remote call fails fast with a
        // configuration error, which is enough to test everything up to it.
        TaskExecutor::new(&ArkConfig::new()).unwrap()
    }

    #[test]
    fn test_validate_task_accepts_defaults() {
        assert!(validate_task(&task("a red fox")).is_ok());
    }

    #[test]
    fn test_validate_task_rejects_bad_inputs() {
        assert!(validate_task(&task("   ")).is_err());

        let mut bad_guidance = task("x");
        bad_guidance.guidance_scale = 0.5;
        assert!(validate_task(&bad_guidance).is_err());
        bad_guidance.guidance_scale = 10.5;
        assert!(validate_task(&bad_guidance).is_err());

        let mut bad_count = task("x");
        bad_count.num_images = 0;
        assert!(validate_task(&bad_count).is_err());
        bad_count.num_images = 5;
        assert!(validate_task(&bad_count).is_err());
    }

    #[test]
    fn test_build_request_shape() {
        let executor = executor();
        let mut t = task("a red fox");
        t.seed = Some(7);
        let dims = Dimensions {
            width: 1024,
            height: 1024,
        };

        let request = executor.build_request(&t, &dims, None);
        assert_eq!(request.size, "1024x1024");
        assert_eq!(request.seed, Some(7));
        // A single image omits n entirely.
        assert!(request.n.is_none());
        assert!(request.image.is_none());

        t.num_images = 3;
        let refs = vec!["data:image/png;base64,AAAA".to_string()];
        let request = executor.build_request(&t, &dims, Some(refs.clone()));
        assert_eq!(request.n, Some(3));
        assert_eq!(request.image, Some(refs));
    }

    #[tokio::test]
    async fn test_validation_precedes_the_remote_call() {
        let executor = executor();
        let mut t = task("a red fox");
        t.aspect_ratio = "custom".to_string();
        t.width = Some(600);
        t.height = Some(3000);
        // The missing API key would be a ConfigError; the ValidationError
        // proves the task was rejected before any call was attempted.
        let err = executor.execute(&t).await.unwrap_err();
        assert!(matches!(err, SeedreamError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_run_captures_failures_as_outcomes() {
        let executor = executor();
        let outcome = executor.run(4, &task("a red fox")).await;
        assert_eq!(outcome.task_index, 4);
        assert!(!outcome.success);
        assert!(outcome
            .error_message
            .as_deref()
            .unwrap()
            .contains("VOLCENGINE_API_KEY"));
    }
}
