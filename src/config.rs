use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub predict_endpoint: String,
    pub max_upload_bytes: u64,
    pub notice_timeout: Duration,
    pub tick_rate: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predict_endpoint: "http://127.0.0.1:5000/predict".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
            notice_timeout: Duration::from_secs(3),
            tick_rate: Duration::from_millis(250),
            logger_timezone: utc(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap()
}
