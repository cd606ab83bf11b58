// src/generator/report.rs

use serde::Serialize;

use crate::map::{PartCategory, PartId};

/// How one placement step ended. Only `Placed` adds a part to the layout; the
/// other variants are the non-fatal failures a run tolerates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// The part was attached to `anchor` after `retries` re-anchoring attempts.
    Placed {
        part: PartId,
        anchor: PartId,
        retries: usize,
    },
    /// No placed part offered a free socket within the sampling cap.
    AnchorExhausted,
    /// The candidate offered no free socket (or could not be instantiated)
    /// and was discarded.
    CandidateExhausted { template: String },
    /// Every retry conflicted with existing geometry; the candidate was
    /// discarded.
    RetryExhausted { template: String, retries: usize },
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }

    pub fn retries(&self) -> usize {
        match self {
            PlacementOutcome::Placed { retries, .. } | PlacementOutcome::RetryExhausted { retries, .. } => *retries,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    MainGrowth,
    AlternateEntrances,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub phase: Phase,
    /// Pool the candidate was drawn from.
    pub category: PartCategory,
    pub outcome: PlacementOutcome,
}

/// What a run did, step by step, plus totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub entrance: Option<PartId>,
    pub steps: Vec<StepRecord>,
    /// Doors left standing, one per accepted link.
    pub doors: usize,
    pub fillers: usize,
    /// Wall-clock seconds spent in `run`. Not serialized, so a seeded run
    /// always exports the same JSON.
    #[serde(skip_serializing)]
    pub generation_time: f64,
}

impl GenerationReport {
    pub(crate) fn record(&mut self, phase: Phase, category: PartCategory, outcome: PlacementOutcome) {
        self.steps.push(StepRecord {
            phase,
            category,
            outcome,
        });
    }

    /// Parts in the layout, entrance included.
    pub fn placed_count(&self) -> usize {
        self.entrance.iter().count() + self.steps.iter().filter(|s| s.outcome.is_placed()).count()
    }

    pub fn abandoned_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.outcome.is_placed()).count()
    }

    pub fn total_retries(&self) -> usize {
        self.steps.iter().map(|s| s.outcome.retries()).sum()
    }

    pub fn steps_in(&self, phase: Phase) -> impl Iterator<Item = &StepRecord> + '_ {
        self.steps.iter().filter(move |s| s.phase == phase)
    }
}
