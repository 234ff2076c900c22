use crate::device_input::interface::{DeviceInput, InputEvent};
use crate::library::logger::interface::Logger;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays a scripted gesture sequence, one event per step delay.
pub struct DeviceInputFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Mutex<Vec<InputEvent>>,
    step_delay: Duration,
}

impl DeviceInputFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, script: Vec<InputEvent>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("fake"),
            script: Mutex::new(script),
            step_delay: Duration::from_secs(1),
        }
    }
}

impl DeviceInput for DeviceInputFake {
    fn events(&self) -> Receiver<InputEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let script = std::mem::take(&mut *self.script.lock().unwrap());
        let logger = self.logger.clone();
        let step_delay = self.step_delay;

        std::thread::spawn(move || {
            for event in script {
                std::thread::sleep(step_delay);
                let _ = logger.info(&format!("replaying {}", event.to_display_string()));
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        rx
    }
}
