use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use rand::seq::SliceRandom;
use std::sync::Arc;

const LABELS: [&str; 12] = [
    "tabby, tabby cat",
    "golden retriever",
    "Egyptian cat",
    "sports car, sport car",
    "studio couch, day bed",
    "laptop, laptop computer",
    "coffee mug",
    "goldfish, Carassius auratus",
    "mountain bike, all-terrain bike, off-roader",
    "daisy",
    "pizza, pizza pie",
    "tiger cat",
];

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    fixed: Option<Result<Vec<Classification>, String>>,
}

impl ImageClassifierFake {
    /// Random top-3 predictions drawn from a small label set.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            fixed: None,
        }
    }

    pub fn with_results(
        logger: Arc<dyn Logger + Send + Sync>,
        results: Vec<Classification>,
    ) -> Self {
        Self {
            fixed: Some(Ok(results)),
            ..Self::new(logger)
        }
    }

    #[allow(dead_code)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self {
            fixed: Some(Err(message.to_string())),
            ..Self::new(logger)
        }
    }

    fn random_classifications(
        &self,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();

        let mut labels = LABELS.to_vec();
        labels.shuffle(&mut rng);

        let weight_dist = Uniform::new(0.0f32, 1.0f32)?;
        let mut weights: Vec<f32> = (0..3).map(|_| weight_dist.sample(&mut rng)).collect();
        weights.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        // Leave some mass for the classes that did not make the cut.
        let rest = weight_dist.sample(&mut rng);
        let total: f32 = weights.iter().sum::<f32>() + rest;

        Ok(labels
            .into_iter()
            .zip(weights)
            .map(|(label, weight)| Classification {
                label: label.to_string(),
                probability: if total > 0.0 { weight / total } else { 0.0 },
            })
            .collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Classifying {}x{} image...",
            image.width(),
            image.height()
        ))?;

        match &self.fixed {
            Some(Ok(results)) => Ok(results.clone()),
            Some(Err(message)) => Err(message.clone().into()),
            None => self.random_classifications(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    #[test]
    fn test_random_classifications_are_ranked_probabilities() {
        let classifier = ImageClassifierFake::new(logger());

        let result = classifier.classify(&DynamicImage::new_rgb8(4, 4)).unwrap();

        assert_eq!(result.len(), 3);
        let total: f32 = result.iter().map(|c| c.probability).sum();
        assert!(total <= 1.0 + 1e-6);
        assert!(result
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
        assert!(result
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.probability)));
    }

    #[test]
    fn test_failing_classifier_returns_error() {
        let classifier = ImageClassifierFake::failing(logger(), "out of memory");

        let error = classifier
            .classify(&DynamicImage::new_rgb8(1, 1))
            .unwrap_err();

        assert_eq!(error.to_string(), "out of memory");
    }
}
