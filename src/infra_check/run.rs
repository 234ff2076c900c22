use super::main::InfraCheck;
use crate::infra_check::core::{init, transition, Event, Model};
use std::error::Error;
use std::io;

impl InfraCheck {
    pub fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.device_display.lock().unwrap().init()?;

        let (initial_model, initial_effects) = init();
        *self.model.lock().unwrap() = initial_model.clone();
        self.spawn_effects(initial_effects);

        let mut current_model = initial_model;

        loop {
            let event = match self.event_receiver.lock().unwrap().recv() {
                Ok(event) => event,
                Err(e) => {
                    return Err(Box::new(io::Error::new(
                        io::ErrorKind::Other,
                        e.to_string(),
                    )));
                }
            };

            current_model = self.step(current_model, event);
        }
    }

    /// One turn of the event loop: transition, publish the model, render,
    /// spawn the produced effects.
    pub fn step(&self, model: Model, event: Event) -> Model {
        let _ = self
            .logger
            .info(&format!("event: {}", event.to_display_string()));

        let (new_model, effects) = transition(&self.config, model, event);

        let _ = self.logger.info(&format!(
            "model: {:?}\neffects: {:?}",
            new_model,
            effects
                .iter()
                .map(|effect| effect.to_display_string())
                .collect::<Vec<_>>()
        ));

        *self.model.lock().unwrap() = new_model.clone();

        if let Err(e) = self.render(&new_model) {
            let _ = self.logger.error(&format!("render failed: {}", e));
        }

        self.spawn_effects(effects);

        new_model
    }
}
