use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::interface::{Classification, ModelHandle};
use crate::library::logger::interface::Logger;
use crate::model_loader::interface::ModelLoader;
use std::sync::Arc;
use std::time::Duration;

pub struct ModelLoaderFake {
    logger: Arc<dyn Logger + Send + Sync>,
    delay: Duration,
    results: Option<Vec<Classification>>,
    failure: Option<String>,
}

impl ModelLoaderFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("model_loader").with_namespace("fake"),
            delay: Duration::from_millis(500),
            results: None,
            failure: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The loaded model always answers with `results`.
    #[allow(dead_code)]
    pub fn with_results(mut self, results: Vec<Classification>) -> Self {
        self.results = Some(results);
        self
    }

    #[allow(dead_code)]
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Loading model...")?;
        std::thread::sleep(self.delay);

        if let Some(message) = &self.failure {
            self.logger.error(&format!("Model failed to load: {}", message))?;
            return Err(message.clone().into());
        }

        let classifier = match &self.results {
            Some(results) => ImageClassifierFake::with_results(self.logger.clone(), results.clone()),
            None => ImageClassifierFake::new(self.logger.clone()),
        };

        self.logger.info("Model loaded")?;
        Ok(ModelHandle::new("fake", Arc::new(classifier)))
    }
}
