pub mod image;
pub mod outcome;
pub mod task;

pub use image::*;
pub use outcome::*;
pub use task::*;
