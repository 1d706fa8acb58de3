use solet_rpc_client::{CreateElectionArgs, Ledger, LedgerError};
use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
    ops::RangeInclusive,
};

const SECS_PER_HOUR: u64 = 3600;

/// Policy bounds for a new election draft. The duration ceiling bounds
/// election lifetime; it is not a ledger constraint.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DraftLimits {
    pub title_chars: RangeInclusive<usize>,
    pub description_chars: RangeInclusive<usize>,
    pub min_candidates: usize,
    pub duration_hours: RangeInclusive<u64>,
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            title_chars: 3..=100,
            description_chars: 10..=500,
            min_candidates: 2,
            duration_hours: 1..=720,
        }
    }
}

/// A draft that passed validation, ready for the write path.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    /// Trimmed, blank entries dropped.
    pub candidates: Vec<String>,
    pub duration_secs: u64,
}

/// Checks a draft against every rule and reports all violations
/// together, so a form can mark every bad field in one pass. Blank
/// candidate entries are dropped silently before counting, not treated
/// as errors.
pub fn validate_draft(
    title: &str,
    description: &str,
    candidates: &[String],
    duration_hours: u64,
    limits: &DraftLimits,
) -> Result<ValidDraft, ValidationError> {
    let mut violations = Vec::new();

    let title_len = title.chars().count();
    if title_len < *limits.title_chars.start() {
        violations.push(DraftViolation::TitleTooShort {
            min: *limits.title_chars.start(),
        });
    } else if title_len > *limits.title_chars.end() {
        violations.push(DraftViolation::TitleTooLong {
            max: *limits.title_chars.end(),
        });
    }

    let description_len = description.chars().count();
    if description_len < *limits.description_chars.start() {
        violations.push(DraftViolation::DescriptionTooShort {
            min: *limits.description_chars.start(),
        });
    } else if description_len > *limits.description_chars.end() {
        violations.push(DraftViolation::DescriptionTooLong {
            max: *limits.description_chars.end(),
        });
    }

    let mut seen = HashSet::new();
    let mut effective = Vec::new();
    for entry in candidates {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed) {
            effective.push(trimmed.to_string());
        } else {
            violations.push(DraftViolation::DuplicateCandidate(trimmed.to_string()));
        }
    }
    if effective.len() < limits.min_candidates {
        violations.push(DraftViolation::NotEnoughCandidates {
            required: limits.min_candidates,
            provided: effective.len(),
        });
    }

    if !limits.duration_hours.contains(&duration_hours) {
        violations.push(DraftViolation::DurationOutOfRange {
            min: *limits.duration_hours.start(),
            max: *limits.duration_hours.end(),
        });
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(ValidDraft {
        title: title.to_string(),
        description: description.to_string(),
        candidates: effective,
        duration_secs: duration_hours * SECS_PER_HOUR,
    })
}

/// Forwards a validated draft to the ledger. Validation failures never
/// reach this point.
pub async fn submit_draft(ledger: &dyn Ledger, draft: ValidDraft) -> Result<(), LedgerError> {
    ledger
        .create_election(CreateElectionArgs {
            title: draft.title,
            description: draft.description,
            candidates: draft.candidates,
            duration_secs: draft.duration_secs,
        })
        .await
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DraftViolation {
    TitleTooShort { min: usize },
    TitleTooLong { max: usize },
    DescriptionTooShort { min: usize },
    DescriptionTooLong { max: usize },
    NotEnoughCandidates { required: usize, provided: usize },
    DuplicateCandidate(String),
    DurationOutOfRange { min: u64, max: u64 },
}

impl Display for DraftViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftViolation::TitleTooShort { min } => {
                write!(f, "title must be at least {} characters", min)
            }
            DraftViolation::TitleTooLong { max } => {
                write!(f, "title must be at most {} characters", max)
            }
            DraftViolation::DescriptionTooShort { min } => {
                write!(f, "description must be at least {} characters", min)
            }
            DraftViolation::DescriptionTooLong { max } => {
                write!(f, "description must be at most {} characters", max)
            }
            DraftViolation::NotEnoughCandidates { required, provided } => write!(
                f,
                "at least {} candidates are required, got {}",
                required, provided
            ),
            DraftViolation::DuplicateCandidate(name) => {
                write!(f, "duplicate candidate \"{}\"", name)
            }
            DraftViolation::DurationOutOfRange { min, max } => {
                write!(f, "duration must be between {} and {} hours", min, max)
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidationError {
    pub violations: Vec<DraftViolation>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid election draft: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            violation.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
