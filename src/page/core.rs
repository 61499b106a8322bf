use crate::image_classifier::interface::{Classification, ModelHandle};
use crate::image_source::interface::{ImageFrame, ImageRequest};
use crate::url_validator::interface::UrlValidator;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageState {
    Idle,
    Loading {
        generation: u64,
        request: ImageRequest,
    },
    Loaded {
        generation: u64,
        request: ImageRequest,
        frame: ImageFrame,
    },
    Error {
        request: ImageRequest,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    NotLoaded,
    Loading,
    Ready(ModelHandle),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub disabled: bool,
    pub loading: bool,
    /// Set once the model is ready; a click before that does nothing.
    pub click_armed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub status: String,
    pub image: ImageState,
    pub model: ModelState,
    pub button: ButtonState,
    pub predictions: Vec<Classification>,
    /// Bumped on every accepted URL. Results tagged with an older
    /// generation belong to a superseded image and are dropped.
    pub generation: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            status: String::new(),
            image: ImageState::Idle,
            model: ModelState::NotLoaded,
            button: ButtonState {
                disabled: true,
                loading: false,
                click_armed: false,
            },
            predictions: vec![],
            generation: 0,
        }
    }
}

#[derive(Debug)]
pub enum Event {
    UrlChanged(String),
    ImageLoadDone {
        generation: u64,
        result: Result<ImageFrame, Box<dyn std::error::Error + Send + Sync>>,
    },
    ModelLoadDone(Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>>),
    PredictClicked,
    ClassifyDone {
        generation: u64,
        result: Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    LoadImage {
        generation: u64,
        request: ImageRequest,
    },
    Classify {
        generation: u64,
        model: ModelHandle,
        frame: ImageFrame,
    },
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State {
            status: "Loading model".to_string(),
            model: ModelState::Loading,
            ..State::default()
        },
        vec![Effect::LoadModel],
    )
}

pub fn transition(
    validator: &dyn UrlValidator,
    state: State,
    event: Event,
) -> (State, Vec<Effect>) {
    match event {
        Event::UrlChanged(url) => url_changed(validator, state, url),
        Event::ImageLoadDone { generation, result } => image_load_done(state, generation, result),
        Event::ModelLoadDone(result) => model_load_done(state, result),
        Event::PredictClicked => predict_clicked(state),
        Event::ClassifyDone { generation, result } => classify_done(state, generation, result),
    }
}

fn url_changed(validator: &dyn UrlValidator, state: State, url: String) -> (State, Vec<Effect>) {
    if !validator.is_valid(&url) {
        return (state, vec![]);
    }

    let generation = state.generation + 1;
    let request = ImageRequest::anonymous(&url);

    (
        State {
            image: ImageState::Loading {
                generation,
                request: request.clone(),
            },
            button: ButtonState {
                loading: true,
                ..state.button
            },
            generation,
            ..state
        },
        vec![Effect::LoadImage {
            generation,
            request,
        }],
    )
}

fn image_load_done(
    state: State,
    generation: u64,
    result: Result<ImageFrame, Box<dyn std::error::Error + Send + Sync>>,
) -> (State, Vec<Effect>) {
    let request = match &state.image {
        ImageState::Loading {
            generation: current,
            request,
        } if *current == generation => request.clone(),
        _ => return (state, vec![]),
    };

    match result {
        Ok(frame) => (
            State {
                status: "Image Loaded".to_string(),
                image: ImageState::Loaded {
                    generation,
                    request,
                    frame,
                },
                button: ButtonState {
                    disabled: false,
                    loading: false,
                    ..state.button
                },
                ..state
            },
            vec![],
        ),
        Err(e) => (
            State {
                status: "Invalid Image".to_string(),
                image: ImageState::Error {
                    request,
                    message: e.to_string(),
                },
                button: ButtonState {
                    disabled: true,
                    loading: false,
                    ..state.button
                },
                ..state
            },
            vec![],
        ),
    }
}

fn model_load_done(
    state: State,
    result: Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>>,
) -> (State, Vec<Effect>) {
    if !matches!(state.model, ModelState::Loading) {
        return (state, vec![]);
    }

    match result {
        Ok(model) => (
            State {
                status: "Model loaded.".to_string(),
                model: ModelState::Ready(model),
                button: ButtonState {
                    click_armed: true,
                    ..state.button
                },
                ..state
            },
            vec![],
        ),
        Err(e) => (
            State {
                status: format!("Failed to load model: {}", e),
                model: ModelState::Failed {
                    message: e.to_string(),
                },
                ..state
            },
            vec![],
        ),
    }
}

fn predict_clicked(state: State) -> (State, Vec<Effect>) {
    if !state.button.click_armed || state.button.disabled {
        return (state, vec![]);
    }

    let effect = match (&state.model, &state.image) {
        (
            ModelState::Ready(model),
            ImageState::Loaded {
                generation, frame, ..
            },
        ) => Effect::Classify {
            generation: *generation,
            model: model.clone(),
            frame: frame.clone(),
        },
        _ => return (state, vec![]),
    };

    (state, vec![effect])
}

fn classify_done(
    state: State,
    generation: u64,
    result: Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>,
) -> (State, Vec<Effect>) {
    if generation != state.generation {
        return (state, vec![]);
    }

    match result {
        Ok(predictions) => (
            State {
                status: "Image predicted.".to_string(),
                predictions,
                ..state
            },
            vec![],
        ),
        Err(e) => (
            State {
                status: format!("Prediction failed: {}", e),
                ..state
            },
            vec![],
        ),
    }
}
