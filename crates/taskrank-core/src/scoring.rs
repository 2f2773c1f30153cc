//! Priority scoring.
//!
//! A task's score is a weighted sum of four components:
//! - urgency (0..10): days until the due date, 10 when overdue
//! - importance (1..10): as provided
//! - effort (0..10): `10 - hours`, so quick wins score higher
//! - blocking: number of tasks that depend on this one, times 3

use std::fmt;

use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::ranking::{rank_payload, rank_tasks, ScoredTask};
use crate::{CoreError, Task};

/// Weight of the urgency component.
pub const URGENCY_WEIGHT: f64 = 0.35;

/// Weight of the importance component.
pub const IMPORTANCE_WEIGHT: f64 = 0.35;

/// Weight of the effort component.
pub const EFFORT_WEIGHT: f64 = 0.20;

/// Weight of the dependency component.
pub const DEPENDENCY_WEIGHT: f64 = 0.10;

/// Dependency points per blocked task.
pub const BLOCKING_SCALE: f64 = 3.0;

/// Upper bound of the urgency and effort components.
const COMPONENT_MAX: f64 = 10.0;

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock reading the local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Raw score components of one task and the resulting score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Time pressure, 0..=10.
    pub urgency: u8,
    /// Importance, 1..=10.
    pub importance: u8,
    /// Quick-win bonus, 0..=10.
    pub effort: f64,
    /// Number of tasks listing this one as a dependency.
    pub blocking: usize,
    /// Weighted sum rounded to 2 decimal places.
    pub score: f64,
}

impl ScoreBreakdown {
    /// Human-readable summary of the raw components.
    pub fn explanation(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "urgency={}, Importance={}, Effort={}, Blocks={}",
            self.urgency,
            self.importance,
            DecimalDisplay(self.effort),
            self.blocking
        )
    }
}

/// Prints whole floats with one decimal (`8.0`), others as-is (`9.5`).
///
/// Never switches to exponent notation: an effort of `1e-5` prints as
/// `0.00001`.
struct DecimalDisplay(f64);

impl fmt::Display for DecimalDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Scores tasks against the date reported by a [`Clock`].
#[derive(Debug, Clone, Default)]
pub struct Scorer<C = SystemClock> {
    clock: C,
}

impl<C: Clock> Scorer<C> {
    /// Create a scorer using the given clock.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// The date scoring currently runs against.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Score `task` within `all_tasks`, reading the clock once.
    pub fn score(&self, task: &Task, all_tasks: &[Task]) -> ScoreBreakdown {
        calculate_score(task, all_tasks, self.clock.today())
    }

    /// Rank a raw JSON payload as of today.
    pub fn rank_payload(&self, payload: &Value) -> Result<Vec<ScoredTask>, CoreError> {
        rank_payload(payload, self.clock.today())
    }

    /// Rank typed tasks as of today.
    pub fn rank_tasks(&self, tasks: &[Task]) -> Result<Vec<ScoredTask>, CoreError> {
        rank_tasks(tasks, self.clock.today())
    }
}

/// Compute the score of `task` within its batch as of `today`.
///
/// `all_tasks` is needed for the blocking count. Never fails.
pub fn calculate_score(task: &Task, all_tasks: &[Task], today: NaiveDate) -> ScoreBreakdown {
    let urgency = urgency(task.due_date, today);
    let effort = (COMPONENT_MAX - task.estimated_hours).max(0.0);
    let blocking = all_tasks
        .iter()
        .filter(|other| other.depends_on(&task.title))
        .count();
    let dependency_score = blocking as f64 * BLOCKING_SCALE;

    let weighted = f64::from(urgency) * URGENCY_WEIGHT
        + f64::from(task.importance) * IMPORTANCE_WEIGHT
        + effort * EFFORT_WEIGHT
        + dependency_score * DEPENDENCY_WEIGHT;

    ScoreBreakdown {
        urgency,
        importance: task.importance,
        effort,
        blocking,
        score: round2(weighted),
    }
}

fn urgency(due_date: Option<NaiveDate>, today: NaiveDate) -> u8 {
    let Some(due) = due_date else {
        return 0;
    };
    let days_left = (due - today).num_days();
    if days_left < 0 {
        10
    } else {
        (10 - days_left.min(10)) as u8
    }
}

/// Round to 2 decimal places, ties to even.
///
/// Only exact binary ties are affected: `2.625` becomes `2.62` and `0.375`
/// becomes `0.38`.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let whole = scaled.trunc();
    let rounded = if (scaled - whole).abs() == 0.5 {
        if whole % 2.0 == 0.0 {
            whole
        } else {
            whole + scaled.signum()
        }
    } else {
        scaled.round()
    };
    rounded / 100.0
}
