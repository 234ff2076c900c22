use super::main::InfraCheck;
use crate::infra_check::core::{Model, ModelNotice, ModelSession};
use crate::report::render_report;
use std::error::Error;

impl InfraCheck {
    /// Every handle is driven from the model on every turn, so trigger
    /// enablement and the loading indicator can never be left stale by an
    /// early return somewhere else.
    pub fn render(&self, model: &Model) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut display = self.device_display.lock().unwrap();

        display.set_drop_target_visible(matches!(model.session, ModelSession::Idle))?;
        display.set_drop_highlight(model.drop_hint)?;

        match model
            .candidate()
            .and_then(|candidate| candidate.preview_data_uri.as_deref())
        {
            Some(data_uri) => display.show_preview(data_uri)?,
            None => display.hide_preview()?,
        }

        display.set_submit_enabled(matches!(
            model.session,
            ModelSession::Previewing { .. }
                | ModelSession::ShowingResult { .. }
                | ModelSession::ShowingError { .. }
        ))?;

        display.set_loading_visible(matches!(model.session, ModelSession::Submitting { .. }))?;

        match &model.session {
            ModelSession::ShowingResult { report, .. } => {
                display.show_result(&render_report(report))?;
            }
            _ => display.hide_result()?,
        }

        match &model.notice {
            ModelNotice::Showing { message, .. } => display.show_notification(message)?,
            ModelNotice::Hidden => display.clear_notification()?,
        }

        Ok(())
    }
}
