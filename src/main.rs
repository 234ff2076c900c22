use config::Config;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use device_input::impl_stdin::DeviceInputStdin;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_http::ImageClassifierHttp;
use image_classifier::interface::ImageClassifier;
use infra_check::main::InfraCheck;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

mod config;
mod device_display;
mod device_input;
mod image_classifier;
mod infra_check;
mod library;
mod report;
mod upload;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_input = Arc::new(DeviceInputStdin::new(logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
        if args.iter().any(|arg| arg == "--gui") {
            Arc::new(Mutex::new(DeviceDisplayGui::new()))
        } else {
            Arc::new(Mutex::new(DeviceDisplayConsole::new()))
        };

    // `--fake-classifier` runs the whole flow without the service.
    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> =
        if args.iter().any(|arg| arg == "--fake-classifier") {
            Arc::new(ImageClassifierFake::new(logger.clone()))
        } else {
            Arc::new(ImageClassifierHttp::new(&config, logger.clone()))
        };

    let app = InfraCheck::new(
        config,
        logger,
        device_input,
        device_display,
        image_classifier,
    );

    app.run()?;

    Ok(())
}
