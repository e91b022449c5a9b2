//! Local store of Model2Vec models downloaded from the Hugging Face hub

use crate::error::{CareerMatcherError, Result};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_MODEL_ID: &str = "potion-base-8M";

/// Files a model directory must hold before model2vec-rs can load it
const REQUIRED_FILES: [&str; 3] = ["tokenizer.json", "model.safetensors", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: BTreeSet<String>,
}

fn known_models() -> BTreeMap<String, EmbeddingModelInfo> {
    let entries = [
        (
            "potion-base-8M",
            "Potion Base 8M",
            "minishlab/potion-base-8M",
            33,
            "Compact static embeddings, good default for job titles",
            256,
        ),
        (
            "m2v-base",
            "Model2Vec Base",
            "minishlab/M2V_base_output",
            90,
            "Original Model2Vec base output model",
            256,
        ),
        (
            "m2v-large",
            "Model2Vec Large",
            "minishlab/M2V_large_output",
            250,
            "Larger Model2Vec model for higher accuracy",
            512,
        ),
    ];

    entries
        .into_iter()
        .map(|(id, name, repo_id, size_mb, description, dimensions)| {
            (
                id.to_string(),
                EmbeddingModelInfo {
                    name: name.to_string(),
                    repo_id: repo_id.to_string(),
                    size_mb,
                    description: description.to_string(),
                    dimensions,
                },
            )
        })
        .collect()
}

impl EmbeddingModelManager {
    /// Open the store, creating the directory and scanning what is already there
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&models_dir).await.map_err(|e| {
            CareerMatcherError::ModelError(format!("Failed to create models directory: {}", e))
        })?;

        let mut manager = Self {
            models_dir,
            available_models: known_models(),
            downloaded_models: BTreeSet::new(),
        };
        manager.scan_downloaded_models().await?;
        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            CareerMatcherError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && Self::is_complete_model_dir(&entry.path()).await
            {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(())
    }

    async fn is_complete_model_dir(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Download a registered model into the store. A model that is already
    /// present is not fetched again.
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .cloned()
            .ok_or_else(|| {
                CareerMatcherError::ModelError(format!("Unknown embedding model: {}", model_id))
            })?;

        let model_dir = self.models_dir.join(model_id);
        if self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        let api = Api::new().map_err(|e| {
            CareerMatcherError::ModelError(format!("Failed to initialize HF API: {}", e))
        })?;
        let repo = api.model(model_info.repo_id.clone());

        fs::create_dir_all(&model_dir).await?;

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                CareerMatcherError::ModelError(format!(
                    "Failed to download required file {}: {}",
                    file, e
                ))
            })?;
            fs::copy(&cached, model_dir.join(file)).await?;
            info!("Downloaded {}", file);
        }

        for file in OPTIONAL_FILES {
            match repo.get(file).await {
                Ok(cached) => {
                    fs::copy(&cached, model_dir.join(file)).await?;
                }
                Err(e) => warn!("Optional file {} not found: {}", file, e),
            }
        }

        self.downloaded_models.insert(model_id.to_string());
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        self.downloaded_models
            .contains(model_id)
            .then(|| self.models_dir.join(model_id))
    }

    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        match self.get_model_path(model_id) {
            Some(path) => Ok(path),
            None => self.download_model(model_id).await,
        }
    }

    pub fn list_available_models(&self) -> Vec<(&str, &EmbeddingModelInfo)> {
        self.available_models
            .iter()
            .map(|(id, info)| (id.as_str(), info))
            .collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        self.downloaded_models.iter().cloned().collect()
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    /// Prefer a model that is already on disk, in registry preference order
    pub fn auto_select_model(&self) -> String {
        ["potion-base-8M", "m2v-base", "m2v-large"]
            .into_iter()
            .find(|id| self.downloaded_models.contains(*id))
            .unwrap_or(DEFAULT_MODEL_ID)
            .to_string()
    }

    /// Accepts a model id, a hub repo id, or a display name (any case)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        self.available_models
            .iter()
            .find(|(_, info)| info.repo_id == input || info.name.eq_ignore_ascii_case(input))
            .map(|(id, _)| id.clone())
    }
}
