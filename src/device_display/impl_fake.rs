use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use crate::report::RenderedReport;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Last observed value of every page handle; shared so tests can assert on
/// what the renderer left on screen.
#[derive(Debug, Default, Clone)]
pub struct DisplayState {
    pub drop_target_visible: bool,
    pub drop_highlight: bool,
    pub preview: Option<String>,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub result: Option<RenderedReport>,
    pub notification: Option<String>,
    pub file_input_clears: usize,
}

pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    state: Arc<Mutex<DisplayState>>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            state: Arc::new(Mutex::new(DisplayState::default())),
        }
    }

    pub fn state_handle(&self) -> Arc<Mutex<DisplayState>> {
        self.state.clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("init()")?;
        Ok(())
    }

    fn set_drop_target_visible(
        &mut self,
        visible: bool,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("set_drop_target_visible({})", visible))?;
        self.state.lock().unwrap().drop_target_visible = visible;
        Ok(())
    }

    fn set_drop_highlight(
        &mut self,
        highlighted: bool,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("set_drop_highlight({})", highlighted))?;
        self.state.lock().unwrap().drop_highlight = highlighted;
        Ok(())
    }

    fn show_preview(&mut self, data_uri: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("show_preview({} chars)", data_uri.len()))?;
        self.state.lock().unwrap().preview = Some(data_uri.to_string());
        Ok(())
    }

    fn hide_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("hide_preview()")?;
        self.state.lock().unwrap().preview = None;
        Ok(())
    }

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("set_submit_enabled({})", enabled))?;
        self.state.lock().unwrap().submit_enabled = enabled;
        Ok(())
    }

    fn set_loading_visible(&mut self, visible: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("set_loading_visible({})", visible))?;
        self.state.lock().unwrap().loading_visible = visible;
        Ok(())
    }

    fn show_result(
        &mut self,
        report: &RenderedReport,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("show_result({})", report.verdict))?;
        self.state.lock().unwrap().result = Some(report.clone());
        Ok(())
    }

    fn hide_result(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("hide_result()")?;
        self.state.lock().unwrap().result = None;
        Ok(())
    }

    fn show_notification(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("show_notification({})", message))?;
        self.state.lock().unwrap().notification = Some(message.to_string());
        Ok(())
    }

    fn clear_notification(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("clear_notification()")?;
        self.state.lock().unwrap().notification = None;
        Ok(())
    }

    fn clear_file_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("clear_file_input()")?;
        self.state.lock().unwrap().file_input_clears += 1;
        Ok(())
    }
}
