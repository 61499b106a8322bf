use crate::config::WindowConfig;
use crate::page::core::Event;
use crate::page_display::interface::{PageDisplay, View};
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

struct PageWindow {
    view: Arc<Mutex<View>>,
    event_sender: Sender<Event>,
    url_input: String,
    submitted_url: String,
    texture: Option<(u64, egui::TextureHandle)>,
}

impl PageWindow {
    /// Mirrors an `<input>` change event: fires when the edit is committed
    /// and the value differs from the last committed one.
    fn commit_url(&mut self) {
        if self.url_input == self.submitted_url {
            return;
        }
        self.submitted_url = self.url_input.clone();
        let _ = self
            .event_sender
            .send(Event::UrlChanged(self.submitted_url.clone()));
    }

    fn sync_texture(&mut self, ctx: &egui::Context, view: &View) {
        let Some((generation, frame)) = &view.frame else {
            self.texture = None;
            return;
        };

        if matches!(&self.texture, Some((current, _)) if current == generation) {
            return;
        }

        let rgba = frame.image().to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        let texture = ctx.load_texture(
            "image-to-classify",
            color_image,
            egui::TextureOptions::default(),
        );
        self.texture = Some((*generation, texture));
    }
}

impl eframe::App for PageWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = match self.view.lock() {
            Ok(view) => view.clone(),
            Err(_) => return,
        };

        self.sync_texture(ctx, &view);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Image URL");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.url_input)
                        .hint_text("https://i.imgur.com/YPx3pRi.jpg")
                        .desired_width(f32::INFINITY),
                );
                if response.lost_focus() {
                    self.commit_url();
                }
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let button = ui.add_enabled(view.button_enabled, egui::Button::new("Classify"));
                if view.button_loading {
                    ui.spinner();
                }
                if button.clicked() {
                    let _ = self.event_sender.send(Event::PredictClicked);
                }
                ui.label(view.status.as_str());
            });

            if let Some(error) = &view.error {
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error.as_str());
            }

            ui.add_space(8.0);

            if let Some(url) = &view.image_url {
                ui.weak(url.as_str()).on_hover_text(format!(
                    "crossOrigin={}",
                    view.cross_origin.unwrap_or_default()
                ));
            }

            if let Some((_, texture)) = &self.texture {
                ui.add(egui::Image::new(texture).max_size(egui::vec2(480.0, 320.0)));
            }

            ui.add_space(8.0);

            egui::Grid::new("classes-table")
                .striped(true)
                .num_columns(2)
                .show(ui, |ui| {
                    ui.strong("Class");
                    ui.strong("Probability");
                    ui.end_row();

                    for [label, probability] in &view.rows {
                        ui.label(label.as_str());
                        ui.monospace(probability.as_str());
                        ui.end_row();
                    }
                });
        });
    }
}

#[derive(Clone)]
pub struct PageDisplayGui {
    view: Arc<Mutex<View>>,
    context: Arc<Mutex<Option<egui::Context>>>,
    config: WindowConfig,
}

impl PageDisplayGui {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            view: Arc::new(Mutex::new(View::default())),
            context: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// Blocks on the calling thread until the window is closed.
    pub fn run(
        &self,
        event_sender: Sender<Event>,
        initial_url: Option<String>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([self.config.width, self.config.height]),
            ..Default::default()
        };

        let mut window = PageWindow {
            view: self.view.clone(),
            event_sender,
            url_input: initial_url.unwrap_or_default(),
            submitted_url: String::new(),
            texture: None,
        };
        window.commit_url();

        let context = self.context.clone();

        eframe::run_native(
            &self.config.title,
            options,
            Box::new(move |cc| {
                if let Ok(mut slot) = context.lock() {
                    *slot = Some(cc.egui_ctx.clone());
                }
                Box::new(window)
            }),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl PageDisplay for PageDisplayGui {
    fn show(&self, view: View) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self
            .view
            .lock()
            .map_err(|e| format!("view poisoned: {}", e))? = view;

        if let Some(ctx) = self
            .context
            .lock()
            .map_err(|e| format!("context poisoned: {}", e))?
            .as_ref()
        {
            ctx.request_repaint();
        }

        Ok(())
    }
}
