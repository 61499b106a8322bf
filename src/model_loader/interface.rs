use crate::image_classifier::interface::ModelHandle;

pub trait ModelLoader {
    /// Acquires the classification model. Called once per session.
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>>;
}
