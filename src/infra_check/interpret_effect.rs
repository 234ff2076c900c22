use super::main::InfraCheck;
use crate::infra_check::core::{Effect, Event};
use crate::upload;
use std::time::Instant;

impl InfraCheck {
    pub fn interpret_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeInput => {
                let events = self.device_input.events();
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if self.event_sender.send(Event::Input(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Event::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::EncodePreview { file } => {
                let data_uri = upload::encode_preview(&file);
                let _ = self.event_sender.send(Event::PreviewEncodeDone {
                    file_name: file.name,
                    data_uri,
                });
            }
            Effect::Classify { candidate } => {
                let result = self.image_classifier.classify(&candidate);
                let _ = self.event_sender.send(Event::ClassifyDone(result));
            }
            Effect::ClearFileInput => {
                if let Err(e) = self.device_display.lock().unwrap().clear_file_input() {
                    let _ = self
                        .logger
                        .error(&format!("clear_file_input failed: {}", e));
                }
            }
        }
    }
}
