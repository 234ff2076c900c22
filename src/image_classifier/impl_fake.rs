use crate::image_classifier::interface::{ClassifyError, ImageClassifier};
use crate::library::logger::interface::Logger;
use crate::report::ClassificationReport;
use crate::upload::UploadCandidate;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Stands in for the classification service: draws a random distribution
/// over the four classes and aggregates it exactly the way the service
/// aggregates its softmax output.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    canned: Option<ClassificationReport>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
            canned: None,
        }
    }

    /// Always answers with the given report; used by tests that need a
    /// predictable outcome.
    pub fn fixed(logger: Arc<dyn Logger + Send + Sync>, report: ClassificationReport) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
            canned: Some(report),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        candidate: &UploadCandidate,
    ) -> Result<ClassificationReport, ClassifyError> {
        let _ = self.logger.info(&format!(
            "classifying {} ({} bytes)...",
            candidate.file_name, candidate.size_bytes
        ));
        std::thread::sleep(Duration::from_millis(400));

        if let Some(report) = &self.canned {
            return Ok(report.clone());
        }

        let mut rng = rand::rng();
        let mut probs = [0.0f64; 4];
        for prob in probs.iter_mut() {
            *prob = rng.random_range(0.05..1.0);
        }
        let total: f64 = probs.iter().sum();
        for prob in probs.iter_mut() {
            *prob /= total;
        }

        let bad_prob = probs[0] + probs[1];
        let good_prob = probs[2] + probs[3];
        let specific_class = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(index, _)| index)
            .unwrap_or(0);

        Ok(ClassificationReport {
            is_good: good_prob > bad_prob,
            quality_confidence: good_prob.max(bad_prob),
            good_prob,
            bad_prob,
            specific_class,
            class_confidence: probs[specific_class],
            individual_probs: probs,
        })
    }
}
