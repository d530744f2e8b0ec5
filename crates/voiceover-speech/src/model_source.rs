use std::path::{Path, PathBuf};

/// Source for loading a model file from disk or HuggingFace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    kind: ModelSourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ModelSourceKind {
    File {
        path: PathBuf,
    },
    HuggingFace {
        repo_id: String,
        filename: String,
        revision: Option<String>,
        cache_dir: Option<PathBuf>,
    },
}

impl ModelSource {
    /// Create a source backed by a local model file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ModelSourceKind::File { path: path.into() },
        }
    }

    /// Create a source backed by a HuggingFace repo + filename.
    pub fn from_hf(repo_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            kind: ModelSourceKind::HuggingFace {
                repo_id: repo_id.into(),
                filename: filename.into(),
                revision: None,
                cache_dir: None,
            },
        }
    }

    /// Set the HuggingFace revision (branch, tag, or commit SHA).
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        if let ModelSourceKind::HuggingFace { revision: slot, .. } = &mut self.kind {
            *slot = Some(revision.into());
        }
        self
    }

    /// Root the HuggingFace download cache at `dir` instead of the default
    /// `HF_HOME` location.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if let ModelSourceKind::HuggingFace { cache_dir, .. } = &mut self.kind {
            *cache_dir = Some(dir.into());
        }
        self
    }

    /// Resolve the model path, downloading if necessary.
    pub fn resolve(&self) -> Result<PathBuf, ModelSourceError> {
        match &self.kind {
            ModelSourceKind::File { path } => {
                if path.is_file() {
                    Ok(path.clone())
                } else {
                    Err(ModelSourceError::MissingLocalFile(path.clone()))
                }
            }
            ModelSourceKind::HuggingFace {
                repo_id,
                filename,
                revision,
                cache_dir,
            } => resolve_hf(
                repo_id,
                filename,
                revision.as_deref(),
                cache_dir.as_deref(),
            ),
        }
    }

    /// Path of the file when it is available without a download.
    ///
    /// For HuggingFace sources this consults the local hub cache only.
    pub fn cached(&self) -> Option<PathBuf> {
        match &self.kind {
            ModelSourceKind::File { path } => path.is_file().then(|| path.clone()),
            ModelSourceKind::HuggingFace {
                repo_id,
                filename,
                revision,
                cache_dir,
            } => cached_hf(
                repo_id,
                filename,
                revision.as_deref(),
                cache_dir.as_deref(),
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelSourceError {
    #[error("Model file not found: {0}")]
    MissingLocalFile(PathBuf),
    #[error("HuggingFace support is not enabled; enable the `model-hf` feature")]
    HuggingFaceDisabled,
    #[error("HuggingFace download failed: {0}")]
    HuggingFaceDownload(String),
}

#[cfg(feature = "model-hf")]
fn resolve_hf(
    repo_id: &str,
    filename: &str,
    revision: Option<&str>,
    cache_dir: Option<&Path>,
) -> Result<PathBuf, ModelSourceError> {
    use hf_hub::api::sync::ApiBuilder;
    use hf_hub::{Repo, RepoType};

    let mut api_builder = ApiBuilder::from_cache(hf_cache(cache_dir));
    if let Ok(endpoint) = std::env::var("HF_ENDPOINT") {
        api_builder = api_builder.with_endpoint(endpoint);
    }
    if let Some(token) = hf_token() {
        api_builder = api_builder.with_token(Some(token));
    }
    let api = api_builder
        .build()
        .map_err(|err| ModelSourceError::HuggingFaceDownload(err.to_string()))?;
    let revision = revision.unwrap_or("main");
    let repo = Repo::with_revision(repo_id.to_string(), RepoType::Model, revision.to_string());
    log::debug!("Fetching {} from {}@{}", filename, repo_id, revision);
    let path = api
        .repo(repo)
        .get(filename)
        .map_err(|err| ModelSourceError::HuggingFaceDownload(err.to_string()))?;
    Ok(path)
}

#[cfg(feature = "model-hf")]
fn hf_cache(cache_dir: Option<&Path>) -> hf_hub::Cache {
    match cache_dir {
        Some(dir) => hf_hub::Cache::new(dir.to_path_buf()),
        None => hf_hub::Cache::from_env(),
    }
}

#[cfg(feature = "model-hf")]
fn cached_hf(
    repo_id: &str,
    filename: &str,
    revision: Option<&str>,
    cache_dir: Option<&Path>,
) -> Option<PathBuf> {
    use hf_hub::{Repo, RepoType};

    let repo = Repo::with_revision(
        repo_id.to_string(),
        RepoType::Model,
        revision.unwrap_or("main").to_string(),
    );
    hf_cache(cache_dir).repo(repo).get(filename)
}

#[cfg(not(feature = "model-hf"))]
fn cached_hf(
    _repo_id: &str,
    _filename: &str,
    _revision: Option<&str>,
    _cache_dir: Option<&Path>,
) -> Option<PathBuf> {
    None
}

#[cfg(not(feature = "model-hf"))]
fn resolve_hf(
    _repo_id: &str,
    _filename: &str,
    _revision: Option<&str>,
    _cache_dir: Option<&Path>,
) -> Result<PathBuf, ModelSourceError> {
    Err(ModelSourceError::HuggingFaceDisabled)
}

#[cfg(feature = "model-hf")]
fn hf_token() -> Option<String> {
    std::env::var("HUGGINGFACE_HUB_TOKEN")
        .ok()
        .or_else(|| std::env::var("HF_TOKEN").ok())
        .or_else(|| std::env::var("HUGGINGFACE_TOKEN").ok())
}
