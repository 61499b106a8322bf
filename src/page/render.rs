use crate::library::logger::interface::Logger;
use crate::page::core::{ImageState, ModelState, State};
use crate::page_display::interface::{PageDisplay, View};
use std::sync::Arc;

#[derive(Clone)]
pub struct Render {
    display: Arc<dyn PageDisplay + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Render {
    pub fn new(
        display: Arc<dyn PageDisplay + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            display,
            logger: logger.with_namespace("render"),
        }
    }

    pub fn render(&self, state: &State) {
        if let Err(e) = self.display.show(to_view(state)) {
            let _ = self.logger.error(&format!("Failed to show view: {}", e));
        }
    }
}

pub fn to_view(state: &State) -> View {
    let (request, frame) = match &state.image {
        ImageState::Idle => (None, None),
        ImageState::Loading { request, .. } | ImageState::Error { request, .. } => {
            (Some(request), None)
        }
        ImageState::Loaded {
            generation,
            request,
            frame,
        } => (Some(request), Some((*generation, frame.clone()))),
    };

    let error = match (&state.model, &state.image) {
        (ModelState::Failed { message }, _) => Some(message.clone()),
        (_, ImageState::Error { message, .. }) => Some(message.clone()),
        _ => None,
    };

    View {
        status: state.status.clone(),
        error,
        image_url: request.map(|r| r.url.clone()),
        cross_origin: request.map(|r| r.cross_origin.as_str()),
        frame,
        // A click during a reload is dropped, so the button is not offered.
        button_enabled: !state.button.disabled && !state.button.loading,
        button_loading: state.button.loading,
        rows: state
            .predictions
            .iter()
            .map(|c| [c.label.clone(), format_probability(c.probability)])
            .collect(),
    }
}

pub fn format_probability(probability: f32) -> String {
    format!("{:.4}", probability)
}
