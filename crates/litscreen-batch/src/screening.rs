//! Hypothesis screening: consensus scoring across evidence paradigms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pipeline::BatchResult;

/// Evidence paradigms every hypothesis is graded against.
pub const PARADIGMS: [&str; 4] = ["allopathy", "naturopathy", "ayurveda", "tcm"];

/// A research hypothesis queued for screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hypothesis {
    pub mineral: String,
    pub hypothesis: String,
    #[serde(default)]
    pub target_outcomes: Vec<String>,
    /// Letter grades (A-F) keyed by paradigm. Paradigms without a grade
    /// default to C during scoring.
    #[serde(default)]
    pub paradigm_grades: BTreeMap<String, String>,
    /// Pre-extracted evidence summaries keyed by paradigm.
    #[serde(default)]
    pub key_findings: BTreeMap<String, String>,
}

/// Screening outcome for one hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisReport {
    pub mineral: String,
    pub hypothesis: String,
    pub paradigm_grades: BTreeMap<String, String>,
    pub key_findings: BTreeMap<String, String>,
    pub target_outcomes: Vec<String>,
    pub research_gaps: Vec<String>,
}

/// Numeric value of a letter evidence grade. Unrecognized grades count as
/// a C, the same neutral default used for ungraded paradigms.
pub fn grade_to_score(grade: &str) -> f64 {
    match grade.trim().to_uppercase().as_str() {
        "A" => 1.0,
        "B" => 0.75,
        "C" => 0.5,
        "D" => 0.25,
        "F" => 0.0,
        _ => 0.5,
    }
}

/// Score a hypothesis from its paradigm grades.
///
/// Every paradigm in [`PARADIGMS`] contributes: a missing grade is filled
/// in as C with "No specific findings" and noted as a research gap. The
/// consensus score is the mean grade score and drives the batch ranking;
/// the mineral name becomes the ranking label.
pub fn score_hypothesis(hypothesis: Hypothesis) -> BatchResult<HypothesisReport> {
    let mut grades = BTreeMap::new();
    let mut findings = BTreeMap::new();
    let mut gaps = Vec::new();

    for paradigm in PARADIGMS {
        match hypothesis.paradigm_grades.get(paradigm) {
            Some(grade) => {
                grades.insert(paradigm.to_string(), grade.trim().to_uppercase());
            }
            None => {
                grades.insert(paradigm.to_string(), "C".to_string());
                gaps.push(format!("No evidence graded under {}", paradigm));
            }
        }
        let finding = hypothesis
            .key_findings
            .get(paradigm)
            .cloned()
            .unwrap_or_else(|| "No specific findings".to_string());
        findings.insert(paradigm.to_string(), finding);
    }

    let consensus =
        grades.values().map(|g| grade_to_score(g)).sum::<f64>() / PARADIGMS.len() as f64;

    let label = hypothesis.mineral.clone();
    let report = HypothesisReport {
        mineral: hypothesis.mineral,
        hypothesis: hypothesis.hypothesis,
        paradigm_grades: grades,
        key_findings: findings,
        target_outcomes: hypothesis.target_outcomes,
        research_gaps: gaps,
    };
    BatchResult::new(report, label, consensus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hypothesis(mineral: &str, grades: &[(&str, &str)]) -> Hypothesis {
        Hypothesis {
            mineral: mineral.to_string(),
            hypothesis: format!("{} improves outcomes", mineral),
            target_outcomes: vec![],
            paradigm_grades: grades
                .iter()
                .map(|(p, g)| (p.to_string(), g.to_string()))
                .collect(),
            key_findings: BTreeMap::new(),
        }
    }

    #[test]
    fn grade_table_matches_the_scoring_scale() {
        assert_eq!(grade_to_score("A"), 1.0);
        assert_eq!(grade_to_score("b"), 0.75);
        assert_eq!(grade_to_score(" C "), 0.5);
        assert_eq!(grade_to_score("D"), 0.25);
        assert_eq!(grade_to_score("F"), 0.0);
        assert_eq!(grade_to_score("?"), 0.5);
    }

    #[test]
    fn consensus_is_the_mean_across_paradigms() {
        let result = score_hypothesis(hypothesis(
            "zinc",
            &[("allopathy", "A"), ("naturopathy", "A"), ("ayurveda", "C"), ("tcm", "C")],
        ));
        assert_eq!(result.score, 0.75);
        assert_eq!(result.label, "zinc");
        assert!(result.value.research_gaps.is_empty());
    }

    #[test]
    fn missing_grades_default_to_c_and_become_gaps() {
        let result = score_hypothesis(hypothesis("selenium", &[("allopathy", "A")]));

        assert_eq!(result.value.paradigm_grades["tcm"], "C");
        assert_eq!(result.value.key_findings["tcm"], "No specific findings");
        assert_eq!(result.value.research_gaps.len(), 3);
        // (1.0 + 0.5 + 0.5 + 0.5) / 4
        assert_eq!(result.score, 0.625);
    }

    #[test]
    fn grades_are_normalized_to_uppercase() {
        let result = score_hypothesis(hypothesis("iron", &[("allopathy", " a ")]));
        assert_eq!(result.value.paradigm_grades["allopathy"], "A");
        assert_eq!(result.score, 0.625);
    }
}
