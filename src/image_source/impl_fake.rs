use crate::image_source::interface::{ImageFrame, ImageRequest, ImageSource};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::sync::Arc;

/// Serves a solid grey image for any URL, except URLs containing
/// "invalid", which fail like a broken link would.
pub struct ImageSourceFake {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageSourceFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_source").with_namespace("fake"),
        }
    }
}

impl ImageSource for ImageSourceFake {
    fn fetch(
        &self,
        request: &ImageRequest,
    ) -> Result<ImageFrame, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Fetching {}", request.url))?;

        if request.url.contains("invalid") {
            return Err(format!("failed to load image from {}", request.url).into());
        }

        let buffer = ImageBuffer::from_pixel(64, 48, Rgb([128u8, 128, 128]));
        Ok(ImageFrame::new(DynamicImage::ImageRgb8(buffer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    #[test]
    fn test_fake_fetch() {
        let source = ImageSourceFake::new(Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
        )));

        let frame = source
            .fetch(&ImageRequest::anonymous("https://i.imgur.com/YPx3pRi.jpg"))
            .unwrap();
        assert_eq!(frame.image().width(), 64);

        assert!(source
            .fetch(&ImageRequest::anonymous("https://example.com/invalid.png"))
            .is_err());
    }
}
