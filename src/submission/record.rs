//! Submission record and its stored document shape

use crate::state::{CoachInfo, LiftEntry, ProgramFrequency, ProgramStyle, TargetAudience};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything persisted for one signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SubmissionDocument", try_from = "SubmissionDocument")]
pub struct SubmissionRecord {
    pub coach_info: CoachInfo,
    pub lifts: Vec<LiftEntry>,
    pub uploaded_file_name: Option<String>,
    pub uploaded_file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionDocument {
    coach_info: CoachInfoDocument,
    lifts: Vec<LiftDocument>,
    uploaded_file_name: Option<String>,
    #[serde(rename = "uploadedFileURL")]
    uploaded_file_url: Option<String>,
    submitted_at: DateTime<Utc>,
}

/// Flat coach fields; `other*` strings are empty unless the sibling choice is "Other"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoachInfoDocument {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    program_style: String,
    #[serde(default)]
    other_style: String,
    #[serde(default)]
    program_frequency: String,
    #[serde(default)]
    other_frequency: String,
    #[serde(default)]
    additional_notes: String,
    #[serde(default)]
    prefer_discussion: bool,
    #[serde(default)]
    target_audience: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiftDocument {
    name: String,
    rep_range: String,
    #[serde(default)]
    notes: String,
}

impl From<SubmissionRecord> for SubmissionDocument {
    fn from(record: SubmissionRecord) -> Self {
        let coach = record.coach_info;
        let (program_style, other_style) = match &coach.program_style {
            None => (String::new(), String::new()),
            Some(style) => (
                style.label().to_string(),
                style.other_text().unwrap_or_default().to_string(),
            ),
        };
        let (program_frequency, other_frequency) = match &coach.program_frequency {
            None => (String::new(), String::new()),
            Some(freq) => (
                freq.label().to_string(),
                freq.other_text().unwrap_or_default().to_string(),
            ),
        };

        Self {
            coach_info: CoachInfoDocument {
                first_name: coach.first_name,
                last_name: coach.last_name,
                email: coach.email,
                phone: coach.phone,
                company: coach.company.unwrap_or_default(),
                program_style,
                other_style,
                program_frequency,
                other_frequency,
                additional_notes: coach.additional_notes,
                prefer_discussion: coach.prefer_discussion,
                target_audience: coach
                    .target_audience
                    .iter()
                    .map(|a| a.label().to_string())
                    .collect(),
            },
            lifts: record
                .lifts
                .into_iter()
                .map(|lift| LiftDocument {
                    name: lift.name,
                    rep_range: lift.rep_range,
                    notes: lift.notes,
                })
                .collect(),
            uploaded_file_name: record.uploaded_file_name,
            uploaded_file_url: record.uploaded_file_url,
            submitted_at: record.submitted_at,
        }
    }
}

fn parse_style(label: &str, other: String) -> Result<Option<ProgramStyle>, String> {
    if label.is_empty() {
        return Ok(None);
    }
    ProgramStyle::options()
        .into_iter()
        .find(|style| style.label() == label)
        .map(|style| match style {
            ProgramStyle::Other(_) => Some(ProgramStyle::Other(other)),
            style => Some(style),
        })
        .ok_or_else(|| format!("unknown program style {label:?}"))
}

fn parse_frequency(label: &str, other: String) -> Result<Option<ProgramFrequency>, String> {
    if label.is_empty() {
        return Ok(None);
    }
    ProgramFrequency::options()
        .into_iter()
        .find(|freq| freq.label() == label)
        .map(|freq| match freq {
            ProgramFrequency::Other(_) => Some(ProgramFrequency::Other(other)),
            freq => Some(freq),
        })
        .ok_or_else(|| format!("unknown program frequency {label:?}"))
}

fn parse_audience(labels: &[String]) -> Result<BTreeSet<TargetAudience>, String> {
    labels
        .iter()
        .map(|label| {
            TargetAudience::ALL
                .into_iter()
                .find(|a| a.label() == label.as_str())
                .ok_or_else(|| format!("unknown target audience {label:?}"))
        })
        .collect()
}

impl TryFrom<SubmissionDocument> for SubmissionRecord {
    type Error = String;

    fn try_from(doc: SubmissionDocument) -> Result<Self, Self::Error> {
        let coach = doc.coach_info;
        let coach_info = CoachInfo {
            program_style: parse_style(&coach.program_style, coach.other_style)?,
            program_frequency: parse_frequency(&coach.program_frequency, coach.other_frequency)?,
            target_audience: parse_audience(&coach.target_audience)?,
            first_name: coach.first_name,
            last_name: coach.last_name,
            email: coach.email,
            phone: coach.phone,
            company: Some(coach.company).filter(|c| !c.is_empty()),
            additional_notes: coach.additional_notes,
            prefer_discussion: coach.prefer_discussion,
        };

        Ok(Self {
            coach_info,
            lifts: doc
                .lifts
                .into_iter()
                .map(|lift| LiftEntry {
                    name: lift.name,
                    rep_range: lift.rep_range,
                    notes: lift.notes,
                })
                .collect(),
            uploaded_file_name: doc.uploaded_file_name,
            uploaded_file_url: doc.uploaded_file_url,
            submitted_at: doc.submitted_at,
        })
    }
}
