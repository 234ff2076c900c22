use crate::config::Config;
use crate::image_classifier::interface::{ClassifyError, ImageClassifier};
use crate::library::logger::interface::Logger;
use crate::report::ClassificationReport;
use crate::upload::UploadCandidate;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the real classification service: one multipart POST per
/// candidate, field name `file`, no timeout and no retry.
pub struct ImageClassifierHttp {
    endpoint: String,
    client: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            endpoint: config.predict_endpoint.clone(),
            client: reqwest::blocking::Client::new(),
            logger: logger.with_namespace("classifier").with_namespace("http"),
        }
    }
}

impl ImageClassifier for ImageClassifierHttp {
    fn classify(
        &self,
        candidate: &UploadCandidate,
    ) -> Result<ClassificationReport, ClassifyError> {
        let _ = self.logger.info(&format!(
            "POST {} ({}, {} bytes)",
            self.endpoint, candidate.file_name, candidate.size_bytes
        ));

        let part = Part::bytes(candidate.bytes.clone()).file_name(candidate.file_name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| ClassifyError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| ClassifyError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or_else(|_| "Classification failed".to_string());
            let _ = self.logger.error(&format!("{} -> {}", status, message));
            return Err(ClassifyError::Service { message });
        }

        match ClassificationReport::from_json(&body) {
            Ok(report) => Ok(report),
            Err(parse_error) => {
                // A success status can still carry an error-shaped body.
                if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                    return Err(ClassifyError::Service {
                        message: parsed.error,
                    });
                }
                Err(ClassifyError::MalformedResponse {
                    reason: parse_error.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use std::io::Read;
    use std::sync::mpsc::{channel, Receiver};

    const GOOD_BODY: &str = r#"{
        "is_good": 1,
        "quality_confidence": 0.87,
        "good_infrastructure_prob": 0.87,
        "bad_infrastructure_prob": 0.13,
        "specific_class": 2,
        "class_confidence": 0.81,
        "individual_probs": [0.05, 0.08, 0.81, 0.06]
    }"#;

    fn client_for(endpoint: String) -> ImageClassifierHttp {
        let config = Config {
            predict_endpoint: endpoint,
            ..Config::default()
        };
        let logger = Arc::new(LoggerConsole::new(config.logger_timezone));
        ImageClassifierHttp::new(&config, logger)
    }

    fn candidate() -> UploadCandidate {
        UploadCandidate {
            file_name: "site.png".to_string(),
            bytes: vec![1, 2, 3, 4],
            size_bytes: 4,
            preview_data_uri: None,
        }
    }

    struct CapturedRequest {
        content_type: String,
        body: Vec<u8>,
    }

    /// Serves exactly one canned response and hands the captured request
    /// back through the channel.
    fn serve_once(status: u16, body: &'static str) -> (String, Receiver<CapturedRequest>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = channel();

        std::thread::spawn(move || {
            if let Ok(mut request) = server.recv() {
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string())
                    .unwrap_or_default();
                let mut raw = Vec::new();
                let _ = request.as_reader().read_to_end(&mut raw);
                let _ = tx.send(CapturedRequest {
                    content_type,
                    body: raw,
                });

                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"application/json"[..],
                        )
                        .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        (format!("http://{}/predict", addr), rx)
    }

    fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn posts_multipart_under_the_file_field_and_parses_the_report() {
        let (endpoint, rx) = serve_once(200, GOOD_BODY);

        let report = client_for(endpoint).classify(&candidate()).unwrap();

        assert!(report.is_good);
        assert_eq!(report.specific_class, 2);

        let request = rx.recv().unwrap();
        assert!(request.content_type.starts_with("multipart/form-data"));
        assert!(contains_subslice(&request.body, b"name=\"file\""));
        assert!(contains_subslice(&request.body, b"filename=\"site.png\""));
        assert!(contains_subslice(&request.body, &[1, 2, 3, 4]));
    }

    #[test]
    fn error_status_surfaces_the_service_message() {
        let (endpoint, _rx) = serve_once(415, r#"{"error":"unsupported format"}"#);

        let result = client_for(endpoint).classify(&candidate());

        assert_eq!(
            result,
            Err(ClassifyError::Service {
                message: "unsupported format".to_string()
            })
        );
    }

    #[test]
    fn error_status_without_a_message_falls_back_to_the_generic_line() {
        let (endpoint, _rx) = serve_once(500, "<html>internal error</html>");

        let result = client_for(endpoint).classify(&candidate());

        assert_eq!(
            result,
            Err(ClassifyError::Service {
                message: "Classification failed".to_string()
            })
        );
    }

    #[test]
    fn success_status_with_an_error_shaped_body_is_a_service_error() {
        let (endpoint, _rx) = serve_once(200, r#"{"error":"model not loaded"}"#);

        let result = client_for(endpoint).classify(&candidate());

        assert_eq!(
            result,
            Err(ClassifyError::Service {
                message: "model not loaded".to_string()
            })
        );
    }

    #[test]
    fn success_status_with_an_invalid_body_fails_closed() {
        let (endpoint, _rx) = serve_once(200, r#"{"is_good": 1}"#);

        let result = client_for(endpoint).classify(&candidate());

        assert!(matches!(
            result,
            Err(ClassifyError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn connection_refused_is_a_network_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client_for(format!("http://{}/predict", addr)).classify(&candidate());

        assert!(matches!(result, Err(ClassifyError::Network { .. })));
    }
}
