use crate::device_display::interface::DeviceDisplay;
use crate::report::{Bar, RenderedReport, Tone};
use std::error::Error;

const PAGE_WIDTH: usize = 64;
const BAR_WIDTH: usize = 24;

#[derive(Default)]
struct Page {
    drop_target_visible: bool,
    drop_highlight: bool,
    preview: Option<String>,
    submit_enabled: bool,
    loading_visible: bool,
    result: Option<RenderedReport>,
    notification: Option<String>,
}

/// Paints the whole page as a text box whenever one of its handles changes,
/// the way a browser page would reflow.
pub struct DeviceDisplayConsole {
    page: Page,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            page: Page {
                drop_target_visible: true,
                ..Page::default()
            },
        }
    }

    fn repaint(&self) {
        let page = &self.page;

        println!("┌{}┐", "─".repeat(PAGE_WIDTH));
        if page.drop_target_visible {
            if page.drop_highlight {
                print_line("Drop the image to classify it");
            } else {
                print_line("Drag an image here, or pick one");
            }
        }
        if let Some(preview) = &page.preview {
            print_line(&format!("Preview: {}", preview_summary(preview)));
        }
        print_line(&format!(
            "[ Classify Image ] {}",
            if page.submit_enabled {
                "ready"
            } else {
                "disabled"
            }
        ));
        if page.loading_visible {
            print_line("Classifying image...");
        }
        if let Some(result) = &page.result {
            print_line("");
            print_line(&format!(
                "Analysis Results ({} Confidence)",
                result.overall_confidence
            ));
            print_line(&result.verdict);
            for bar in &result.quality_bars {
                print_line(&bar_line(bar));
            }
            print_line(&format!(
                "Specific Classification: {} ({})",
                result.specific_class, result.class_confidence
            ));
            for bar in &result.class_bars {
                print_line(&bar_line(bar));
            }
        }
        if let Some(notification) = &page.notification {
            print_line("");
            print_line(&format!("(!) {}", notification));
        }
        println!("└{}┘", "─".repeat(PAGE_WIDTH));
    }
}

fn print_line(text: &str) {
    let shown: String = text.chars().take(PAGE_WIDTH).collect();
    let padding = PAGE_WIDTH - shown.chars().count();
    println!("│{}{}│", shown, " ".repeat(padding));
}

fn bar_line(bar: &Bar) -> String {
    let filled = ((bar.fill * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let glyph = match bar.tone {
        Tone::Good => '█',
        Tone::Bad => '▒',
    };
    format!(
        "{:<29}{:>6} {}{}",
        format!("{}:", bar.label),
        bar.percent_text,
        glyph.to_string().repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
    )
}

fn preview_summary(data_uri: &str) -> String {
    let mime = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("unknown");
    let payload_chars = data_uri.split(',').nth(1).map(str::len).unwrap_or(0);
    format!("{} (~{} KB encoded)", mime, payload_chars / 1024)
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.repaint();
        Ok(())
    }

    fn set_drop_target_visible(
        &mut self,
        visible: bool,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.drop_target_visible != visible {
            self.page.drop_target_visible = visible;
            self.repaint();
        }
        Ok(())
    }

    fn set_drop_highlight(
        &mut self,
        highlighted: bool,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.drop_highlight != highlighted {
            self.page.drop_highlight = highlighted;
            self.repaint();
        }
        Ok(())
    }

    fn show_preview(&mut self, data_uri: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.preview.as_deref() != Some(data_uri) {
            self.page.preview = Some(data_uri.to_string());
            self.repaint();
        }
        Ok(())
    }

    fn hide_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.preview.is_some() {
            self.page.preview = None;
            self.repaint();
        }
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.submit_enabled != enabled {
            self.page.submit_enabled = enabled;
            self.repaint();
        }
        Ok(())
    }

    fn set_loading_visible(&mut self, visible: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.loading_visible != visible {
            self.page.loading_visible = visible;
            self.repaint();
        }
        Ok(())
    }

    fn show_result(
        &mut self,
        report: &RenderedReport,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.result.as_ref() != Some(report) {
            self.page.result = Some(report.clone());
            self.repaint();
        }
        Ok(())
    }

    fn hide_result(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.result.is_some() {
            self.page.result = None;
            self.repaint();
        }
        Ok(())
    }

    fn show_notification(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.notification.as_deref() != Some(message) {
            self.page.notification = Some(message.to_string());
            self.repaint();
        }
        Ok(())
    }

    fn clear_notification(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.page.notification.is_some() {
            self.page.notification = None;
            self.repaint();
        }
        Ok(())
    }

    fn clear_file_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        // The console has no sticky picker widget to reset.
        Ok(())
    }
}
