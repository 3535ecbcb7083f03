use std::env;
use std::path::PathBuf;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bucket holding saved checklist records.
    pub bucket: String,
    /// Directory of checklist schema JSON files. Unset means the schemas
    /// compiled into the binary.
    pub checklist_dir: Option<PathBuf>,
    pub region: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            bucket: env::var("CARENAV_BUCKET").unwrap_or_else(|_| "carenav".to_string()),
            checklist_dir: env::var_os("CARENAV_CHECKLIST_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            region: env::var("AWS_REGION").ok().filter(|r| !r.is_empty()),
        }
    }
}
