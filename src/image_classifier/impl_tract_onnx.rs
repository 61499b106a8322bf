use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::model_config::ModelConfig;
use crate::image_classifier::tract::image::image_to_tensor;
use image::DynamicImage;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    labels: Vec<String>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        labels: Vec<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = config.input_shape;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self {
            model,
            config,
            labels,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;
        let input = image_to_tensor(image, width, height, self.config.mean, self.config.std)?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no outputs")?
            .to_array_view::<f32>()?;

        let mut scores: Vec<f32> = output.iter().copied().collect();

        // Some MobileNet exports prepend a background class.
        if scores.len() == self.labels.len() + 1 {
            scores.remove(0);
        }

        if self.config.apply_softmax {
            scores = softmax(&scores);
        }

        Ok(top_k(&scores, &self.labels, self.config.top_k))
    }
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max_logit).exp()).collect();
    let sum: f32 = exps.iter().sum();

    if sum == 0.0 || !sum.is_finite() {
        return exps;
    }

    exps.iter().map(|e| e / sum).collect()
}

pub fn top_k(probabilities: &[f32], labels: &[String], k: usize) -> Vec<Classification> {
    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(k);

    indexed
        .into_iter()
        .map(|(idx, probability)| Classification {
            label: labels
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("class_{}", idx)),
            probability,
        })
        .collect()
}
