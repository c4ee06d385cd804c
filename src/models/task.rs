use rmcp::schemars;
use serde::{Deserialize, Serialize};

pub const MIN_GUIDANCE_SCALE: f32 = 1.0;
pub const MAX_GUIDANCE_SCALE: f32 = 10.0;
pub const MIN_IMAGES_PER_TASK: u32 = 1;
pub const MAX_IMAGES_PER_TASK: u32 = 4;
pub const MAX_BATCH_TASKS: usize = 20;
pub const MIN_BATCH_CONCURRENCY: usize = 1;
pub const MAX_BATCH_CONCURRENCY: usize = 10;

pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
pub const DEFAULT_GUIDANCE_SCALE: f32 = 2.5;
pub const DEFAULT_NUM_IMAGES: u32 = 1;
pub const DEFAULT_BATCH_CONCURRENCY: usize = 3;

/// Coarse target-resolution preset, resolved against the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    #[default]
    Regular,
    Big,
}

/// One independent generation request; also the full input of the
/// `generate_image` tool.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct GenerationTask {
    #[schemars(description = "Text description of the image to generate (supports English and Chinese)")]
    pub prompt: String,

    #[serde(default = "default_aspect_ratio")]
    #[schemars(
        description = "Image aspect ratio: 1:1, 3:4, 4:3, 16:9, 9:16, 2:3, 3:2, 21:9, or 'custom' (default: 16:9)"
    )]
    pub aspect_ratio: String,

    #[serde(default)]
    #[schemars(
        description = "Image size preset: small (shortest dim 512px), regular (1 megapixel), big (longest dim 2048px). Ignored if aspect_ratio is 'custom' (default: regular)"
    )]
    pub size: SizeClass,

    #[schemars(description = "Image width in pixels (512-2048, only used when aspect_ratio is 'custom')")]
    pub width: Option<u32>,

    #[schemars(description = "Image height in pixels (512-2048, only used when aspect_ratio is 'custom')")]
    pub height: Option<u32>,

    #[serde(default = "default_guidance_scale")]
    #[schemars(
        description = "Prompt adherence strength, higher values follow the prompt more literally (1.0-10.0, default: 2.5)"
    )]
    pub guidance_scale: f32,

    #[schemars(description = "Random seed for reproducible results (0-2147483647)")]
    pub seed: Option<u32>,

    #[serde(default = "default_num_images")]
    #[schemars(description = "Number of images to generate (1-4, default: 1)")]
    pub num_images: u32,

    #[schemars(
        description = "Directory to save the generated images into. Omit to return URLs only; pass an empty string for the default temp directory"
    )]
    pub output_directory: Option<String>,

    #[serde(default)]
    #[schemars(
        description = "Reference images to guide generation: local file paths or http(s) URLs, in order"
    )]
    pub reference_images: Vec<String>,

    #[schemars(description = "Base filename for saved images (extension defaults to .png)")]
    pub filename: Option<String>,
}

/// Input of the `batch_generate_images` tool.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct BatchRequest {
    #[schemars(description = "Generation tasks to run (1-20)")]
    pub tasks: Vec<GenerationTask>,

    #[serde(default = "default_batch_concurrency")]
    #[schemars(description = "Maximum number of tasks running at once (1-10, default: 3)")]
    pub max_concurrent: usize,
}

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

fn default_guidance_scale() -> f32 {
    DEFAULT_GUIDANCE_SCALE
}

fn default_num_images() -> u32 {
    DEFAULT_NUM_IMAGES
}

fn default_batch_concurrency() -> usize {
    DEFAULT_BATCH_CONCURRENCY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults_from_json() {
        let task: GenerationTask =
            serde_json::from_str(r#"{ "prompt": "a quiet harbor at dawn" }"#).unwrap();
        assert_eq!(task.prompt, "a quiet harbor at dawn");
        assert_eq!(task.aspect_ratio, "16:9");
        assert_eq!(task.size, SizeClass::Regular);
        assert_eq!(task.guidance_scale, 2.5);
        assert_eq!(task.num_images, 1);
        assert!(task.seed.is_none());
        assert!(task.output_directory.is_none());
        assert!(task.reference_images.is_empty());
    }

    #[test]
    fn test_size_class_parsing() {
        let task: GenerationTask =
            serde_json::from_str(r#"{ "prompt": "x", "size": "big" }"#).unwrap();
        assert_eq!(task.size, SizeClass::Big);
        let task: GenerationTask =
            serde_json::from_str(r#"{ "prompt": "x", "size": "small" }"#).unwrap();
        assert_eq!(task.size, SizeClass::Small);
        assert!(serde_json::from_str::<GenerationTask>(r#"{ "prompt": "x", "size": "huge" }"#)
            .is_err());
    }

    #[test]
    fn test_batch_request_default_concurrency() {
        let request: BatchRequest =
            serde_json::from_str(r#"{ "tasks": [{ "prompt": "x" }] }"#).unwrap();
        assert_eq!(request.max_concurrent, 3);
        assert_eq!(request.tasks.len(), 1);
    }
}
