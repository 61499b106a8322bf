use crate::image_source::interface::{CrossOrigin, ImageFrame, ImageRequest, ImageSource};
use crate::library::logger::interface::Logger;
use reqwest::blocking::Client;
use reqwest::Url;
use std::sync::Arc;

pub struct ImageSourceHttp {
    logger: Arc<dyn Logger + Send + Sync>,
    client: Client,
}

impl ImageSourceHttp {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        user_agent: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // The blocking client never stores cookies, which matches an
        // anonymous cross-origin fetch.
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            logger: logger.with_namespace("image_source").with_namespace("http"),
            client,
        })
    }

    fn fetch_bytes(
        &self,
        request: &ImageRequest,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse(&request.url)?;

        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| format!("not a local file path: {}", request.url))?;
            return Ok(std::fs::read(path)?);
        }

        let builder = match request.cross_origin {
            CrossOrigin::Anonymous => self.client.get(url),
        };

        let response = builder.send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

impl ImageSource for ImageSourceHttp {
    fn fetch(
        &self,
        request: &ImageRequest,
    ) -> Result<ImageFrame, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Fetching {} (crossOrigin={})",
            request.url,
            request.cross_origin.as_str()
        ))?;

        let bytes = self.fetch_bytes(request)?;
        let image = image::load_from_memory(&bytes)?;

        self.logger.info(&format!(
            "Decoded {}x{} image from {}",
            image.width(),
            image.height(),
            request.url
        ))?;

        Ok(ImageFrame::new(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

    fn source() -> ImageSourceHttp {
        ImageSourceHttp::new(
            Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap())),
            "image-url-classifier-test",
        )
        .unwrap()
    }

    #[test]
    fn test_fetch_decodes_file_url() {
        let path = std::env::temp_dir().join(format!(
            "image-url-classifier-{}.png",
            std::process::id()
        ));
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(7, 5, Rgb([10u8, 20, 30])))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let url = format!("file://{}", path.display());
        let frame = source().fetch(&ImageRequest::anonymous(&url)).unwrap();

        assert_eq!(frame.image().width(), 7);
        assert_eq!(frame.image().height(), 5);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_fetch_decodes_percent_encoded_file_url() {
        let dir = std::env::temp_dir().join(format!(
            "image-url-classifier-{} dir",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("my cat.png");
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(3, 2, Rgb([1u8, 2, 3])))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let url = Url::from_file_path(&path).unwrap();
        assert!(url.as_str().contains("%20"));

        let frame = source()
            .fetch(&ImageRequest::anonymous(url.as_str()))
            .unwrap();

        assert_eq!(frame.image().width(), 3);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_fetch_rejects_relative_url() {
        assert!(source()
            .fetch(&ImageRequest::anonymous("cat.jpg"))
            .is_err());
    }

    #[test]
    fn test_fetch_rejects_undecodable_bytes() {
        let path = std::env::temp_dir().join(format!(
            "image-url-classifier-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, b"not an image").unwrap();

        let url = format!("file://{}", path.display());
        assert!(source().fetch(&ImageRequest::anonymous(&url)).is_err());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_fetch_missing_file_fails() {
        let result = source().fetch(&ImageRequest::anonymous(
            "file:///definitely/not/here/cat.jpg",
        ));

        assert!(result.is_err());
    }
}
