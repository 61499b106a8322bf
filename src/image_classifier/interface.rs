use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub probability: f32,
}

pub trait ImageClassifier {
    /// Ranked predictions for one image, most probable first.
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Shared reference to a classifier that finished loading. Lives for the
/// whole session and is never reloaded.
#[derive(Clone)]
pub struct ModelHandle {
    name: String,
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

impl ModelHandle {
    pub fn new(name: &str, classifier: Arc<dyn ImageClassifier + Send + Sync>) -> Self {
        Self {
            name: name.to_string(),
            classifier,
        }
    }

    pub fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.classifier.classify(image)
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelHandle({})", self.name)
    }
}

impl PartialEq for ModelHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.classifier, &other.classifier)
    }
}
