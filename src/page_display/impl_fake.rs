use crate::page_display::interface::{PageDisplay, View};
use std::sync::Mutex;

/// Records every view it is asked to show.
#[derive(Default)]
pub struct PageDisplayFake {
    views: Mutex<Vec<View>>,
}

impl PageDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<View> {
        self.views
            .lock()
            .ok()
            .and_then(|views| views.last().cloned())
    }

    pub fn count(&self) -> usize {
        self.views.lock().map(|views| views.len()).unwrap_or(0)
    }
}

impl PageDisplay for PageDisplayFake {
    fn show(&self, view: View) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.views
            .lock()
            .map_err(|e| format!("display poisoned: {}", e))?
            .push(view);
        Ok(())
    }
}
