use std::io;
use texel_pipeline_image_api::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: ImageError,
    },
}

impl CliError {
    /// Attaches the file being processed to an image error.
    pub fn in_file(path: &std::path::Path, source: ImageError) -> Self {
        Self::File {
            path: path.display().to_string(),
            source,
        }
    }
}
