use crate::image_source::interface::ImageSource;
use crate::library::logger::interface::Logger;
use crate::model_loader::interface::ModelLoader;
use crate::page::core::{Effect, Event};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    image_source: Arc<dyn ImageSource + Send + Sync>,
    model_loader: Arc<dyn ModelLoader + Send + Sync>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_source: Arc<dyn ImageSource + Send + Sync>,
        model_loader: Arc<dyn ModelLoader + Send + Sync>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            image_source,
            model_loader,
        }
    }

    pub fn run_effect(&self, effect: Effect, event_sender: Sender<Event>) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        let event = match effect {
            Effect::LoadModel => Event::ModelLoadDone(self.model_loader.load()),
            Effect::LoadImage {
                generation,
                request,
            } => Event::ImageLoadDone {
                generation,
                result: self.image_source.fetch(&request),
            },
            Effect::Classify {
                generation,
                model,
                frame,
            } => Event::ClassifyDone {
                generation,
                result: model.classify(frame.image()),
            },
        };

        if event_sender.send(event).is_err() {
            let _ = self
                .logger
                .error("Page stopped before the effect finished, result dropped");
        }
    }
}
