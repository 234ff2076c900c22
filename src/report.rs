use serde::Deserialize;
use thiserror::Error;

/// Fixed, order-significant label table for the four infrastructure classes.
/// Indices 0-1 are the bad category, 2-3 the good category; styling and the
/// binary aggregation both key off this partition.
pub const CLASS_LABELS: [&str; 4] = [
    "Bad Infrastructure (Type A)",
    "Bad Infrastructure (Type B)",
    "Good Infrastructure (Type A)",
    "Good Infrastructure (Type B)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Bad,
    Good,
}

pub fn tone_for_class(class_index: usize) -> Tone {
    if class_index < 2 {
        Tone::Bad
    } else {
        Tone::Good
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub is_good: bool,
    pub quality_confidence: f64,
    pub good_prob: f64,
    pub bad_prob: f64,
    pub specific_class: usize,
    pub class_confidence: f64,
    pub individual_probs: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("body is not the expected JSON shape: {0}")]
    Json(String),
    #[error("`is_good` must be 0 or 1, got {0}")]
    BadFlag(i64),
    #[error("`specific_class` {0} is outside the 4-class label table")]
    ClassOutOfRange(i64),
    #[error("`individual_probs` must hold exactly 4 entries, got {0}")]
    ProbCount(usize),
    #[error("probability {0} is outside [0, 1]")]
    ProbRange(f64),
}

#[derive(Debug, Deserialize)]
struct RawReport {
    is_good: i64,
    quality_confidence: f64,
    good_infrastructure_prob: f64,
    bad_infrastructure_prob: f64,
    specific_class: i64,
    class_confidence: f64,
    individual_probs: Vec<f64>,
}

impl ClassificationReport {
    /// Parses a `/predict` success body, failing closed: any structural or
    /// numeric surprise is rejected here so rendering never has to bounds
    /// check. Probabilities are only required to sit in [0, 1]; nothing
    /// enforces that they sum to 1.
    pub fn from_json(body: &str) -> Result<Self, ReportError> {
        let raw: RawReport =
            serde_json::from_str(body).map_err(|e| ReportError::Json(e.to_string()))?;

        let is_good = match raw.is_good {
            0 => false,
            1 => true,
            other => return Err(ReportError::BadFlag(other)),
        };

        if raw.individual_probs.len() != CLASS_LABELS.len() {
            return Err(ReportError::ProbCount(raw.individual_probs.len()));
        }

        let specific_class = usize::try_from(raw.specific_class)
            .ok()
            .filter(|class| *class < CLASS_LABELS.len())
            .ok_or(ReportError::ClassOutOfRange(raw.specific_class))?;

        let mut individual_probs = [0.0; 4];
        individual_probs.copy_from_slice(&raw.individual_probs);

        let all_probs = [
            raw.quality_confidence,
            raw.good_infrastructure_prob,
            raw.bad_infrastructure_prob,
            raw.class_confidence,
        ]
        .into_iter()
        .chain(individual_probs);
        for prob in all_probs {
            if !(0.0..=1.0).contains(&prob) {
                return Err(ReportError::ProbRange(prob));
            }
        }

        Ok(Self {
            is_good,
            quality_confidence: raw.quality_confidence,
            good_prob: raw.good_infrastructure_prob,
            bad_prob: raw.bad_infrastructure_prob,
            specific_class,
            class_confidence: raw.class_confidence,
            individual_probs,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub percent_text: String,
    pub fill: f64,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub verdict: String,
    pub overall_confidence: String,
    pub quality_bars: [Bar; 2],
    pub specific_class: String,
    pub class_confidence: String,
    pub class_bars: [Bar; 4],
}

/// Projects a validated report into display-ready text and bar geometry.
/// Pure; the display impls only lay this out.
pub fn render_report(report: &ClassificationReport) -> RenderedReport {
    RenderedReport {
        verdict: if report.is_good {
            "Good Infrastructure".to_string()
        } else {
            "Poor Infrastructure".to_string()
        },
        overall_confidence: percent(report.quality_confidence),
        quality_bars: [
            Bar {
                label: "Good Infrastructure".to_string(),
                percent_text: percent(report.good_prob),
                fill: report.good_prob,
                tone: Tone::Good,
            },
            Bar {
                label: "Poor Infrastructure".to_string(),
                percent_text: percent(report.bad_prob),
                fill: report.bad_prob,
                tone: Tone::Bad,
            },
        ],
        specific_class: CLASS_LABELS[report.specific_class].to_string(),
        class_confidence: percent(report.class_confidence),
        class_bars: std::array::from_fn(|i| Bar {
            label: CLASS_LABELS[i].to_string(),
            percent_text: percent(report.individual_probs[i]),
            fill: report.individual_probs[i],
            tone: tone_for_class(i),
        }),
    }
}

fn percent(prob: f64) -> String {
    format!("{:.1}%", prob * 100.0)
}
