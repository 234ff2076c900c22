use crate::config::Config;
use crate::device_input::interface::{InputEvent, PickedFile};
use crate::image_classifier::interface::ClassifyError;
use crate::report::ClassificationReport;
use crate::upload::{self, AcquireError, UploadCandidate};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub session: ModelSession,
    pub notice: ModelNotice,
    pub drop_hint: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            session: ModelSession::Idle,
            notice: ModelNotice::Hidden,
            drop_hint: false,
        }
    }
}

impl Model {
    pub fn candidate(&self) -> Option<&UploadCandidate> {
        match &self.session {
            ModelSession::Idle => None,
            ModelSession::Previewing { candidate }
            | ModelSession::Submitting { candidate }
            | ModelSession::ShowingResult { candidate, .. }
            | ModelSession::ShowingError { candidate, .. } => Some(candidate),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModelSession {
    Idle,
    Previewing {
        candidate: UploadCandidate,
    },
    Submitting {
        candidate: UploadCandidate,
    },
    ShowingResult {
        candidate: UploadCandidate,
        report: ClassificationReport,
    },
    ShowingError {
        candidate: UploadCandidate,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModelNotice {
    Hidden,
    Showing { message: String, shown_at: Instant },
}

#[derive(Debug)]
pub enum Event {
    Tick(Instant),
    Input(InputEvent),
    PreviewEncodeDone { file_name: String, data_uri: String },
    ClassifyDone(Result<ClassificationReport, ClassifyError>),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::Input(input) => format!("Input({})", input.to_display_string()),
            Event::PreviewEncodeDone {
                file_name,
                data_uri,
            } => format!("PreviewEncodeDone({}, {} chars)", file_name, data_uri.len()),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeInput,
    SubscribeTick,
    EncodePreview { file: PickedFile },
    Classify { candidate: UploadCandidate },
    ClearFileInput,
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::EncodePreview { file } => format!("EncodePreview({})", file.name),
            Effect::Classify { candidate } => format!(
                "Classify({}, {} bytes)",
                candidate.file_name, candidate.size_bytes
            ),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![Effect::SubscribeInput, Effect::SubscribeTick],
    )
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    match event {
        Event::Tick(now) => transition_tick(config, model, now),
        Event::Input(InputEvent::DragEnter) => (
            Model {
                drop_hint: true,
                ..model
            },
            vec![],
        ),
        Event::Input(InputEvent::DragLeave) => (
            Model {
                drop_hint: false,
                ..model
            },
            vec![],
        ),
        Event::Input(InputEvent::FilesPicked(files))
        | Event::Input(InputEvent::FilesDropped(files)) => on_files_chosen(config, model, files),
        Event::Input(InputEvent::SubmitPressed) => on_submit(model),
        Event::Input(InputEvent::RemovePressed) => on_remove(model),
        Event::PreviewEncodeDone {
            file_name,
            data_uri,
        } => on_preview_ready(model, file_name, data_uri),
        Event::ClassifyDone(result) => on_classify_done(model, result),
    }
}

fn transition_tick(config: &Config, mut model: Model, now: Instant) -> (Model, Vec<Effect>) {
    let expired = match &model.notice {
        ModelNotice::Showing { shown_at, .. } => {
            now.duration_since(*shown_at) >= config.notice_timeout
        }
        ModelNotice::Hidden => false,
    };
    if expired {
        model.notice = ModelNotice::Hidden;
    }
    (model, vec![])
}

fn on_files_chosen(
    config: &Config,
    mut model: Model,
    files: Vec<PickedFile>,
) -> (Model, Vec<Effect>) {
    model.drop_hint = false;

    // A new selection while a submission is pending is ignored; the drop
    // target and picker are off screen in that phase anyway.
    if matches!(model.session, ModelSession::Submitting { .. }) {
        return (model, vec![]);
    }

    match upload::acquire(&files, config.max_upload_bytes) {
        Ok(candidate) => {
            let file = PickedFile {
                name: candidate.file_name.clone(),
                bytes: candidate.bytes.clone(),
            };
            model.session = ModelSession::Previewing { candidate };
            (model, vec![Effect::EncodePreview { file }])
        }
        Err(AcquireError::NoFile) => (model, vec![]),
        Err(error @ AcquireError::FileTooLarge) => {
            model.notice = ModelNotice::Showing {
                message: error.to_string(),
                shown_at: Instant::now(),
            };
            (model, vec![])
        }
    }
}

fn on_submit(model: Model) -> (Model, Vec<Effect>) {
    let Model {
        session,
        notice,
        drop_hint,
    } = model;

    match session {
        ModelSession::Previewing { candidate }
        | ModelSession::ShowingResult { candidate, .. }
        | ModelSession::ShowingError { candidate, .. } => (
            Model {
                session: ModelSession::Submitting {
                    candidate: candidate.clone(),
                },
                notice,
                drop_hint,
            },
            vec![Effect::Classify { candidate }],
        ),
        // Idle has nothing to submit; Submitting enforces at most one
        // in-flight request.
        session => (
            Model {
                session,
                notice,
                drop_hint,
            },
            vec![],
        ),
    }
}

fn on_remove(model: Model) -> (Model, Vec<Effect>) {
    match model.session {
        ModelSession::Idle => (model, vec![]),
        _ => (
            Model {
                session: ModelSession::Idle,
                ..model
            },
            vec![Effect::ClearFileInput],
        ),
    }
}

fn on_preview_ready(mut model: Model, file_name: String, data_uri: String) -> (Model, Vec<Effect>) {
    match &mut model.session {
        ModelSession::Previewing { candidate } | ModelSession::Submitting { candidate }
            if candidate.file_name == file_name && candidate.preview_data_uri.is_none() =>
        {
            candidate.preview_data_uri = Some(data_uri);
        }
        // An encode that finished after its candidate was replaced or
        // removed; drop it.
        _ => {}
    }
    (model, vec![])
}

fn on_classify_done(
    model: Model,
    result: Result<ClassificationReport, ClassifyError>,
) -> (Model, Vec<Effect>) {
    let Model {
        session,
        notice,
        drop_hint,
    } = model;

    match session {
        ModelSession::Submitting { candidate } => match result {
            Ok(report) => (
                Model {
                    session: ModelSession::ShowingResult { candidate, report },
                    notice,
                    drop_hint,
                },
                vec![],
            ),
            Err(error) => {
                let message = error.to_string();
                (
                    Model {
                        session: ModelSession::ShowingError {
                            candidate,
                            message: message.clone(),
                        },
                        notice: ModelNotice::Showing {
                            message,
                            shown_at: Instant::now(),
                        },
                        drop_hint,
                    },
                    vec![],
                )
            }
        },
        // The submission was removed while in flight; the late response is
        // stale and must not resurrect it.
        session => (
            Model {
                session,
                notice,
                drop_hint,
            },
            vec![],
        ),
    }
}
