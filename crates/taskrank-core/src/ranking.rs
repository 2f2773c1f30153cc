//! Batch ranking: validate, reject cycles, score and sort.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::graph::DependencyGraph;
use crate::scoring::{calculate_score, ScoreBreakdown};
use crate::{CoreError, Task};

/// Number of tasks returned by a suggestion request.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// A task as submitted, enriched with its score.
///
/// Serializes as the original task object plus `score` and `explanation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// Fields of the submitted task, unchanged.
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Priority score, rounded to 2 decimal places.
    pub score: f64,

    /// Raw score components.
    pub explanation: String,
}

impl ScoredTask {
    /// Attach a score to a task object.
    pub fn new(mut fields: Map<String, Value>, breakdown: &ScoreBreakdown) -> Self {
        fields.remove("score");
        fields.remove("explanation");
        Self {
            fields,
            score: breakdown.score,
            explanation: breakdown.explanation(),
        }
    }

    /// Title of the task.
    pub fn title(&self) -> &str {
        self.field_str("title").unwrap_or_default()
    }

    /// A string field of the submitted task, if present.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<&Task> for Map<String, Value> {
    fn from(task: &Task) -> Self {
        let mut fields = Map::new();
        fields.insert("title".into(), task.title.clone().into());
        fields.insert(
            "due_date".into(),
            task.due_date
                .map_or(Value::Null, |d| d.format("%Y-%m-%d").to_string().into()),
        );
        fields.insert("estimated_hours".into(), task.estimated_hours.into());
        fields.insert("importance".into(), task.importance.into());
        fields.insert("dependencies".into(), task.dependencies.clone().into());
        fields
    }
}

/// Rank a raw JSON payload.
///
/// The payload must be an array of task objects, each with a non-empty
/// title, and the batch must be free of dependency cycles. Any violation
/// rejects the whole batch.
pub fn rank_payload(payload: &Value, today: NaiveDate) -> Result<Vec<ScoredTask>, CoreError> {
    let items = payload.as_array().ok_or(CoreError::InvalidPayload)?;

    let mut objects = Vec::with_capacity(items.len());
    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let task = Task::from_value(item).map_err(|e| {
            warn!(index, error = %e, "Rejecting task batch");
            e.at_index(index)
        })?;
        // from_value only succeeds on objects
        objects.push(item.as_object().cloned().unwrap_or_default());
        tasks.push(task);
    }

    score_and_sort(objects, &tasks, today)
}

/// Rank typed tasks.
pub fn rank_tasks(tasks: &[Task], today: NaiveDate) -> Result<Vec<ScoredTask>, CoreError> {
    let objects = tasks.iter().map(Map::from).collect();
    score_and_sort(objects, tasks, today)
}

/// Keep the `limit` best entries of a ranked list.
pub fn suggest(mut ranked: Vec<ScoredTask>, limit: usize) -> Vec<ScoredTask> {
    ranked.truncate(limit);
    ranked
}

fn score_and_sort(
    objects: Vec<Map<String, Value>>,
    tasks: &[Task],
    today: NaiveDate,
) -> Result<Vec<ScoredTask>, CoreError> {
    if let Some(cycle) = DependencyGraph::from_tasks(tasks).find_cycle() {
        warn!(cycle = %cycle.join(" -> "), "Circular dependency detected");
        return Err(CoreError::CircularDependency);
    }

    let mut ranked: Vec<ScoredTask> = objects
        .into_iter()
        .zip(tasks)
        .map(|(fields, task)| {
            let breakdown = calculate_score(task, tasks, today);
            debug!(title = %task.title, score = breakdown.score, "Scored task");
            ScoredTask::new(fields, &breakdown)
        })
        .collect();

    // Stable: equal scores keep input order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}
