use crate::image_source::interface::ImageFrame;

/// Everything the host window needs to draw the page.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub status: String,
    /// Why the image or the model failed, if either did.
    pub error: Option<String>,
    pub image_url: Option<String>,
    pub cross_origin: Option<&'static str>,
    /// Decoded image tagged with its generation so the window only
    /// re-uploads the texture when the image actually changed.
    pub frame: Option<(u64, ImageFrame)>,
    pub button_enabled: bool,
    pub button_loading: bool,
    pub rows: Vec<[String; 2]>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            status: String::new(),
            error: None,
            image_url: None,
            cross_origin: None,
            frame: None,
            button_enabled: false,
            button_loading: false,
            rows: vec![],
        }
    }
}

pub trait PageDisplay: Send + Sync {
    /// Replace what is on screen with `view`.
    fn show(&self, view: View) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
