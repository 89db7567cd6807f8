//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileConfig, FilePuzzleConfig, FileRecommendationConfig, FileServiceConfig,
};
pub use loader::ConfigLoader;
