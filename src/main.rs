use clap::Parser;
use config::{Args, Config};
use image_source::impl_http::ImageSourceHttp;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use model_loader::{
    impl_fake::ModelLoaderFake, impl_tract_onnx::ModelLoaderTractOnnx, interface::ModelLoader,
};
use page::runtime::Page;
use page_display::impl_gui::PageDisplayGui;
use std::sync::Arc;
use url_validator::impl_noop::UrlValidatorNoop;

mod config;
mod image_classifier;
mod image_source;
mod library;
mod model_loader;
mod page;
mod page_display;
mod url_validator;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_args(Args::parse())?;

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let validator = Arc::new(UrlValidatorNoop::new());

    let image_source = Arc::new(ImageSourceHttp::new(logger.clone(), &config.user_agent)?);

    let model_loader: Arc<dyn ModelLoader + Send + Sync> = if config.fake_model {
        Arc::new(ModelLoaderFake::new(logger.clone()))
    } else {
        Arc::new(ModelLoaderTractOnnx::new(logger.clone(), config.model.clone()))
    };

    let display = PageDisplayGui::new(config.window.clone());

    let page = Page::new(
        logger.clone(),
        validator,
        image_source,
        model_loader,
        Arc::new(display.clone()),
    );

    let event_sender = page.event_sender();

    let page_logger = logger.clone();
    std::thread::spawn(move || {
        if let Err(e) = page.run() {
            let _ = page_logger.error(&format!("Page stopped: {}", e));
        }
    });

    // The window owns the main thread until it is closed.
    display.run(event_sender, config.initial_url.clone())?;

    logger.info("Window closed")?;

    Ok(())
}
