use crate::library::logger::interface::Logger;
use std::fmt::Debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Elm-style runtime: one thread owns the state and applies `transition_fn`
/// to each event in arrival order, effects run on their own threads and
/// report back through the event channel.
pub struct StateMachine<TState, TEvent, TEffect, I, T, R, E>
where
    I: Fn() -> (TState, Vec<TEffect>) + Send + Sync,
    T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync,
    R: Fn(&TState) + Send + Sync,
    E: Fn(TEffect, Sender<TEvent>) + Send + Sync,
{
    init_fn: I,
    transition_fn: T,
    render_fn: R,
    run_effect_fn: Arc<E>,
    logger: Arc<dyn Logger + Send + Sync>,
    event_sender: Sender<TEvent>,
    event_receiver: Mutex<Receiver<TEvent>>,
    _marker: std::marker::PhantomData<fn() -> (TState, TEffect)>,
}

impl<TState, TEvent, TEffect, I, T, R, E> StateMachine<TState, TEvent, TEffect, I, T, R, E>
where
    TState: Debug,
    TEvent: Debug + Send + 'static,
    TEffect: Debug + Send + 'static,
    I: Fn() -> (TState, Vec<TEffect>) + Send + Sync,
    T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync,
    R: Fn(&TState) + Send + Sync,
    E: Fn(TEffect, Sender<TEvent>) + Send + Sync + 'static,
{
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        init_fn: I,
        transition_fn: T,
        render_fn: R,
        run_effect_fn: E,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            init_fn,
            transition_fn,
            render_fn,
            run_effect_fn: Arc::new(run_effect_fn),
            logger: logger.with_namespace("state_machine"),
            event_sender,
            event_receiver: Mutex::new(event_receiver),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn event_sender(&self) -> Sender<TEvent> {
        self.event_sender.clone()
    }

    pub fn start(&self) -> TState {
        let (state, effects) = (self.init_fn)();

        let _ = self.logger.info(&format!(
            "\ninit state:\n\t{:?}\n\neffects:\n\t{:?}",
            state, effects
        ));

        (self.render_fn)(&state);
        self.spawn_effects(effects);

        state
    }

    pub fn step(&self, state: TState, event: TEvent) -> TState {
        let _ = self.logger.info(&format!(
            "\nold state:\n\t{:?}\n\nevent:\n\t{:?}",
            state, event
        ));

        let (new_state, effects) = (self.transition_fn)(state, event);

        let _ = self.logger.info(&format!(
            "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
            new_state, effects
        ));

        (self.render_fn)(&new_state);
        self.spawn_effects(effects);

        new_state
    }

    pub fn next_event(&self) -> Result<TEvent, Box<dyn std::error::Error + Send + Sync>> {
        let receiver = self
            .event_receiver
            .lock()
            .map_err(|e| format!("event receiver poisoned: {}", e))?;

        Ok(receiver.recv()?)
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.start();

        loop {
            let event = self.next_event()?;
            state = self.step(state, event);
        }
    }

    fn spawn_effects(&self, effects: Vec<TEffect>) {
        for effect in effects {
            let effect_sender = self.event_sender.clone();
            let run_effect_fn = Arc::clone(&self.run_effect_fn);
            std::thread::spawn(move || run_effect_fn(effect, effect_sender));
        }
    }
}
