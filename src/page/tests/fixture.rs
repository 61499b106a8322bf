use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::interface::{Classification, ModelHandle};
use crate::image_source::impl_fake::ImageSourceFake;
use crate::image_source::interface::{ImageFrame, ImageSource};
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::model_loader::impl_fake::ModelLoaderFake;
use crate::model_loader::interface::ModelLoader;
use crate::page::runtime::Page;
use crate::page_display::impl_fake::PageDisplayFake;
use crate::page_display::interface::View;
use crate::url_validator::impl_noop::UrlValidatorNoop;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const CAT_URL: &str = "https://i.imgur.com/YPx3pRi.jpg";

pub fn logger() -> Arc<dyn Logger + Send + Sync> {
    Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
}

pub fn cat() -> Vec<Classification> {
    vec![Classification {
        label: "cat".to_string(),
        probability: 0.9123,
    }]
}

pub fn frame() -> ImageFrame {
    ImageFrame::new(DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
        8,
        8,
        Rgb([200u8, 100, 50]),
    )))
}

pub fn model(results: Vec<Classification>) -> ModelHandle {
    ModelHandle::new(
        "fake",
        Arc::new(ImageClassifierFake::with_results(logger(), results)),
    )
}

pub fn error(message: &str) -> Box<dyn std::error::Error + Send + Sync> {
    message.into()
}

pub struct Fixture {
    pub display: Arc<PageDisplayFake>,
    pub page: Arc<Page>,
}

impl Fixture {
    pub fn new(model_loader: ModelLoaderFake) -> Self {
        let logger = logger();
        let display = Arc::new(PageDisplayFake::new());
        let image_source: Arc<dyn ImageSource + Send + Sync> =
            Arc::new(ImageSourceFake::new(logger.clone()));
        let model_loader: Arc<dyn ModelLoader + Send + Sync> = Arc::new(model_loader);

        let page = Arc::new(Page::new(
            logger,
            Arc::new(UrlValidatorNoop::new()),
            image_source,
            model_loader,
            display.clone(),
        ));

        let running = page.clone();
        std::thread::spawn(move || running.run());

        Self { display, page }
    }

    /// Polls the display until a view matching `predicate` shows up.
    pub fn wait_for(&self, predicate: impl Fn(&View) -> bool) -> View {
        let deadline = Instant::now() + Duration::from_secs(5);

        loop {
            if let Some(view) = self.display.last() {
                if predicate(&view) {
                    return view;
                }
            }
            if Instant::now() > deadline {
                panic!("timed out, last view: {:?}", self.display.last());
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    pub fn wait_for_status(&self, status: &str) -> View {
        self.wait_for(|view| view.status == status)
    }
}
