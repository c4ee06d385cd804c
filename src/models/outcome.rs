use std::path::PathBuf;

/// One generated image as reported to the caller.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub url: String,
    pub revised_prompt: Option<String>,
    /// Where the image was written, when persistence was requested and succeeded.
    pub saved_path: Option<PathBuf>,
    /// Why this particular image could not be saved. Never fails the task.
    pub save_error: Option<String>,
}

impl GeneratedImage {
    pub fn new(url: impl Into<String>, revised_prompt: Option<String>) -> Self {
        Self {
            url: url.into(),
            revised_prompt,
            saved_path: None,
            save_error: None,
        }
    }
}

/// Immutable result of executing one task, keyed by submission position.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub task_index: usize,
    pub success: bool,
    pub images: Vec<GeneratedImage>,
    pub error_message: Option<String>,
}

impl TaskOutcome {
    pub fn succeeded(task_index: usize, images: Vec<GeneratedImage>) -> Self {
        Self {
            task_index,
            success: true,
            images,
            error_message: None,
        }
    }

    pub fn failed(task_index: usize, error_message: impl Into<String>) -> Self {
        Self {
            task_index,
            success: false,
            images: Vec::new(),
            error_message: Some(error_message.into()),
        }
    }
}
