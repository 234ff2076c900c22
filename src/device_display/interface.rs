use crate::report::RenderedReport;
use std::error::Error;

/// The named handles of the page surface: drop target, preview image,
/// submit trigger, loading container, result panel, notification area and
/// the file-input widget. The renderer only toggles and fills these; widget
/// state lives behind the implementation.
pub trait DeviceDisplay: Send + Sync {
    /// Prepare the surface (open the window, paint the first frame).
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_drop_target_visible(&mut self, visible: bool)
        -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Highlight while a drag hovers the drop target.
    fn set_drop_highlight(&mut self, highlighted: bool)
        -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_preview(&mut self, data_uri: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn hide_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_submit_enabled(&mut self, enabled: bool) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_loading_visible(&mut self, visible: bool) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replaces any previously displayed report and makes the panel visible.
    fn show_result(&mut self, report: &RenderedReport)
        -> Result<(), Box<dyn Error + Send + Sync>>;

    fn hide_result(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Transient message; cleared again via `clear_notification`.
    fn show_notification(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn clear_notification(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Reset the file-input widget so re-picking the same file fires again.
    fn clear_file_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
