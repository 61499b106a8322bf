use crate::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use crate::image_classifier::interface::ModelHandle;
use crate::image_classifier::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use crate::model_loader::interface::ModelLoader;
use std::sync::Arc;
use std::time::Instant;

pub struct ModelLoaderTractOnnx {
    logger: Arc<dyn Logger + Send + Sync>,
    config: ModelConfig,
}

impl ModelLoaderTractOnnx {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, config: ModelConfig) -> Self {
        Self {
            logger: logger.with_namespace("model_loader").with_namespace("tract_onnx"),
            config,
        }
    }
}

impl ModelLoader for ModelLoaderTractOnnx {
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>> {
        let started = Instant::now();

        self.logger
            .info(&format!("Reading labels from {}", self.config.labels_path))?;
        let labels = parse_labels(&std::fs::read_to_string(&self.config.labels_path)?);
        if labels.is_empty() {
            return Err(format!("no labels found in {}", self.config.labels_path).into());
        }

        self.logger
            .info(&format!("Loading model from {}", self.config.onnx_model_path))?;
        let classifier = ImageClassifierTractOnnx::new(self.config.clone(), labels)?;

        self.logger.info(&format!(
            "Model ready in {}ms",
            started.elapsed().as_millis()
        ))?;

        Ok(ModelHandle::new(
            &self.config.onnx_model_path,
            Arc::new(classifier),
        ))
    }
}

/// One label per line. A leading WordNet id (`n01440764 tench, Tinca tinca`)
/// is dropped so the label reads like the class name alone.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((id, rest)) if is_wordnet_id(id) => rest.trim().to_string(),
            _ => line.to_string(),
        })
        .collect()
}

fn is_wordnet_id(token: &str) -> bool {
    token.len() == 9
        && token.starts_with('n')
        && token[1..].chars().all(|c| c.is_ascii_digit())
}
