use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct MediaConfig {
    /// Directory published media files are stored under.
    pub root: PathBuf,
    /// Public base URL media keys are resolved against.
    pub base_url: String,
    pub max_upload_bytes: usize,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        Self {
            root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/media")),
            base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/media".to_string()),
            max_upload_bytes: env::var("MEDIA_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024), // 5 MiB
        }
    }
}
