use crate::device_input::interface::{DeviceInput, InputEvent, PickedFile};
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Drives the session from the terminal: `pick`/`drop` read a file from disk
/// and stand in for the picker and the drop gesture.
pub struct DeviceInputStdin {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputStdin {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("stdin"),
        }
    }
}

impl DeviceInput for DeviceInputStdin {
    fn events(&self) -> Receiver<InputEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let _ = logger.info("commands: pick <path> | drop <path> | submit | remove");
            let stdin = std::io::stdin();
            let mut line = String::new();

            loop {
                line.clear();
                match stdin.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }

                let trimmed = line.trim();
                let event = if let Some(path) = trimmed.strip_prefix("pick ") {
                    read_picked(&logger, path.trim()).map(|f| InputEvent::FilesPicked(vec![f]))
                } else if let Some(path) = trimmed.strip_prefix("drop ") {
                    read_picked(&logger, path.trim()).map(|f| InputEvent::FilesDropped(vec![f]))
                } else if trimmed == "submit" {
                    Some(InputEvent::SubmitPressed)
                } else if trimmed == "remove" {
                    Some(InputEvent::RemovePressed)
                } else if trimmed.is_empty() {
                    None
                } else {
                    let _ = logger.info(&format!("unknown command: {}", trimmed));
                    None
                };

                if let Some(event) = event {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        rx
    }
}

fn read_picked(logger: &Arc<dyn Logger + Send + Sync>, path: &str) -> Option<PickedFile> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let name = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
            Some(PickedFile { name, bytes })
        }
        Err(e) => {
            let _ = logger.error(&format!("cannot read {}: {}", path, e));
            None
        }
    }
}
