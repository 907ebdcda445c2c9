//! Hypothesis input and ranked-result output, in JSON and CSV.
//!
//! JSON input accepts either a bare list of hypotheses or an object with a
//! `hypotheses` key. CSV input needs `mineral` and `hypothesis` columns;
//! `target_outcomes` is comma-separated and per-paradigm `<paradigm>_grade`
//! columns are optional. Any other extension fails fast.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use litscreen_core::error::Error;

use crate::pipeline::BatchRun;
use crate::screening::{Hypothesis, HypothesisReport, PARADIGMS};

#[derive(Deserialize)]
#[serde(untagged)]
enum HypothesisDoc {
    List(Vec<Hypothesis>),
    Wrapped { hypotheses: Vec<Hypothesis> },
}

/// Load hypotheses from a `.json` or `.csv` file.
pub fn load_hypotheses(path: &Path) -> Result<Vec<Hypothesis>> {
    match extension(path).as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(Error::UnsupportedFormat(format!(
            "unsupported input format '.{}' (expected .json or .csv)",
            other
        ))
        .into()),
    }
}

/// Save a completed run to a `.json` or `.csv` file.
pub fn save_results(run: &BatchRun<HypothesisReport>, path: &Path) -> Result<()> {
    match extension(path).as_str() {
        "json" => {
            let body = serde_json::to_string_pretty(run)?;
            fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
            Ok(())
        }
        "csv" => save_csv(run, path),
        other => Err(Error::UnsupportedFormat(format!(
            "unsupported output format '.{}' (expected .json or .csv)",
            other
        ))
        .into()),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn load_json(path: &Path) -> Result<Vec<Hypothesis>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc: HypothesisDoc =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(match doc {
        HypothesisDoc::List(hypotheses) => hypotheses,
        HypothesisDoc::Wrapped { hypotheses } => hypotheses,
    })
}

fn load_csv(path: &Path) -> Result<Vec<Hypothesis>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("read {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let mineral_col = column("mineral")
        .ok_or_else(|| Error::UnsupportedFormat("csv input needs a 'mineral' column".into()))?;
    let hypothesis_col = column("hypothesis").ok_or_else(|| {
        Error::UnsupportedFormat("csv input needs a 'hypothesis' column".into())
    })?;
    let outcomes_col = column("target_outcomes");
    let grade_cols: Vec<(usize, &str)> = PARADIGMS
        .iter()
        .filter_map(|p| column(&format!("{}_grade", p)).map(|i| (i, *p)))
        .collect();

    let mut hypotheses = Vec::new();
    for record in reader.records() {
        let record = record?;
        let target_outcomes = outcomes_col
            .and_then(|i| record.get(i))
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut paradigm_grades = BTreeMap::new();
        for (i, paradigm) in &grade_cols {
            if let Some(grade) = record.get(*i) {
                let grade = grade.trim();
                if !grade.is_empty() && grade != "-" {
                    paradigm_grades.insert(paradigm.to_string(), grade.to_string());
                }
            }
        }

        hypotheses.push(Hypothesis {
            mineral: record.get(mineral_col).unwrap_or("").to_string(),
            hypothesis: record.get(hypothesis_col).unwrap_or("").to_string(),
            target_outcomes,
            paradigm_grades,
            key_findings: BTreeMap::new(),
        });
    }
    Ok(hypotheses)
}

fn save_csv(run: &BatchRun<HypothesisReport>, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("write {}", path.display()))?;

    let mut header = vec![
        "rank".to_string(),
        "mineral".to_string(),
        "hypothesis".to_string(),
        "consensus_score".to_string(),
    ];
    header.extend(PARADIGMS.iter().map(|p| format!("{}_grade", p)));
    header.push("target_outcomes".to_string());
    header.push("research_gaps".to_string());
    writer.write_record(&header)?;

    for result in &run.results {
        let report = &result.value;
        let mut row = vec![
            result.rank.to_string(),
            report.mineral.clone(),
            report.hypothesis.clone(),
            result.score.to_string(),
        ];
        for paradigm in PARADIGMS {
            row.push(
                report
                    .paradigm_grades
                    .get(paradigm)
                    .cloned()
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
        row.push(report.target_outcomes.join(", "));
        row.push(report.research_gaps.join("; "));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
