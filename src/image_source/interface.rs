use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossOrigin {
    /// Fetch without cookies or credentials so the pixels stay readable.
    Anonymous,
}

impl CrossOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "anonymous",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub url: String,
    pub cross_origin: CrossOrigin,
}

impl ImageRequest {
    pub fn anonymous(url: &str) -> Self {
        Self {
            url: url.to_string(),
            cross_origin: CrossOrigin::Anonymous,
        }
    }
}

/// Decoded pixels of the current image. Cheap to clone.
#[derive(Clone)]
pub struct ImageFrame(Arc<DynamicImage>);

impl ImageFrame {
    pub fn new(image: DynamicImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.0
    }
}

impl std::fmt::Debug for ImageFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImageFrame({}x{})", self.0.width(), self.0.height())
    }
}

impl PartialEq for ImageFrame {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

pub trait ImageSource {
    fn fetch(
        &self,
        request: &ImageRequest,
    ) -> Result<ImageFrame, Box<dyn std::error::Error + Send + Sync>>;
}
