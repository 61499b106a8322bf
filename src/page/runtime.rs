use crate::image_source::interface::ImageSource;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::model_loader::interface::ModelLoader;
use crate::page::core::{init, transition, Effect, Event, State};
use crate::page::render::Render;
use crate::page::run_effect::RunEffect;
use crate::page_display::interface::PageDisplay;
use crate::url_validator::interface::UrlValidator;
use std::sync::mpsc::Sender;
use std::sync::Arc;

type InitFn = Box<dyn Fn() -> (State, Vec<Effect>) + Send + Sync>;
type TransitionFn = Box<dyn Fn(State, Event) -> (State, Vec<Effect>) + Send + Sync>;
type RenderFn = Box<dyn Fn(&State) + Send + Sync>;
type RunEffectFn = Box<dyn Fn(Effect, Sender<Event>) + Send + Sync>;

/// One page session, from window open to window close.
pub struct Page {
    machine: StateMachine<State, Event, Effect, InitFn, TransitionFn, RenderFn, RunEffectFn>,
}

impl Page {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        validator: Arc<dyn UrlValidator + Send + Sync>,
        image_source: Arc<dyn ImageSource + Send + Sync>,
        model_loader: Arc<dyn ModelLoader + Send + Sync>,
        display: Arc<dyn PageDisplay + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("page");
        let render = Render::new(display, logger.clone());
        let run_effect = RunEffect::new(logger.clone(), image_source, model_loader);

        let machine = StateMachine::new(
            logger,
            Box::new(init) as InitFn,
            Box::new(move |state: State, event: Event| {
                transition(validator.as_ref(), state, event)
            }) as TransitionFn,
            Box::new(move |state: &State| render.render(state)) as RenderFn,
            Box::new(move |effect: Effect, sender: Sender<Event>| {
                run_effect.run_effect(effect, sender)
            }) as RunEffectFn,
        );

        Self { machine }
    }

    pub fn event_sender(&self) -> Sender<Event> {
        self.machine.event_sender()
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.machine.run()
    }
}
