use crate::device_display::interface::DeviceDisplay;
use crate::report::{Bar, RenderedReport, Tone};
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct PageModel {
    drop_target_visible: bool,
    drop_highlight: bool,
    preview: Option<String>,
    submit_enabled: bool,
    loading_visible: bool,
    result: Option<RenderedReport>,
    notification: Option<String>,
}

#[derive(Clone)]
struct PageWindow {
    page: Arc<Mutex<PageModel>>,
}

impl eframe::App for PageWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let page = self.page.lock().unwrap();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Infrastructure Quality Check");
            ui.add_space(8.0);

            if page.drop_target_visible {
                let text = if page.drop_highlight {
                    "Drop the image to classify it"
                } else {
                    "Drag an image here, or use the picker"
                };
                ui.label(egui::RichText::new(text).italics());
                ui.add_space(4.0);
            }

            if let Some(preview) = &page.preview {
                ui.label(format!("Preview loaded ({} KB encoded)", preview.len() / 1024));
                ui.add_space(4.0);
            }

            // Mirror of the submit trigger; input arrives via DeviceInput.
            ui.add_enabled(page.submit_enabled, egui::Button::new("Classify Image"));

            if page.loading_visible {
                ui.add_space(4.0);
                ui.spinner();
                ui.label("Classifying image...");
            }

            if let Some(result) = &page.result {
                ui.separator();
                ui.heading(format!(
                    "Analysis Results ({} Confidence)",
                    result.overall_confidence
                ));
                ui.label(egui::RichText::new(&result.verdict).strong());
                ui.add_space(4.0);
                for bar in &result.quality_bars {
                    bar_widget(ui, bar);
                }
                ui.add_space(4.0);
                ui.label(format!(
                    "Specific Classification: {} ({})",
                    result.specific_class, result.class_confidence
                ));
                ui.add_space(4.0);
                for bar in &result.class_bars {
                    bar_widget(ui, bar);
                }
            }

            if let Some(notification) = &page.notification {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(200, 60, 50), notification);
            }
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn bar_widget(ui: &mut egui::Ui, bar: &Bar) {
    let color = match bar.tone {
        Tone::Good => egui::Color32::from_rgb(70, 160, 90),
        Tone::Bad => egui::Color32::from_rgb(200, 90, 70),
    };
    ui.add(
        egui::ProgressBar::new(bar.fill as f32)
            .fill(color)
            .text(format!("{}: {}", bar.label, bar.percent_text)),
    );
}

pub struct DeviceDisplayGui {
    page: Arc<Mutex<PageModel>>,
}

impl DeviceDisplayGui {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            page: Arc::new(Mutex::new(PageModel {
                drop_target_visible: true,
                ..PageModel::default()
            })),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let page = self.page.clone();

        // Spawn the window in a separate thread
        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([480.0, 560.0])
                    .with_resizable(false),
                ..Default::default()
            };

            let window = PageWindow { page };

            // This will block in the new thread until the window is closed
            let _ = eframe::run_native(
                "Infrastructure Quality Check",
                options,
                Box::new(|_cc| Box::new(window)),
            );
        });

        Ok(())
    }

    fn set_drop_target_visible(
        &mut self,
        visible: bool,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().drop_target_visible = visible;
        Ok(())
    }

    fn set_drop_highlight(
        &mut self,
        highlighted: bool,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().drop_highlight = highlighted;
        Ok(())
    }

    fn show_preview(&mut self, data_uri: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().preview = Some(data_uri.to_string());
        Ok(())
    }

    fn hide_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().preview = None;
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().submit_enabled = enabled;
        Ok(())
    }

    fn set_loading_visible(&mut self, visible: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().loading_visible = visible;
        Ok(())
    }

    fn show_result(
        &mut self,
        report: &RenderedReport,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().result = Some(report.clone());
        Ok(())
    }

    fn hide_result(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().result = None;
        Ok(())
    }

    fn show_notification(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().notification = Some(message.to_string());
        Ok(())
    }

    fn clear_notification(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.page.lock().unwrap().notification = None;
        Ok(())
    }

    fn clear_file_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        // The window mirrors the page; there is no sticky picker widget.
        Ok(())
    }
}
