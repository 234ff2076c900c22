/// A file handed over by the picker or a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    FilesPicked(Vec<PickedFile>),
    FilesDropped(Vec<PickedFile>),
    DragEnter,
    DragLeave,
    SubmitPressed,
    RemovePressed,
}

impl InputEvent {
    /// Log-friendly form; file bytes are summarized instead of dumped.
    pub fn to_display_string(&self) -> String {
        match self {
            InputEvent::FilesPicked(files) => format!("FilesPicked({} file(s))", files.len()),
            InputEvent::FilesDropped(files) => format!("FilesDropped({} file(s))", files.len()),
            event => format!("{:?}", event),
        }
    }
}

pub trait DeviceInput: Send + Sync {
    fn events(&self) -> std::sync::mpsc::Receiver<InputEvent>;
}
