//! Task record and ingestion-time normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Hours assumed when a task has no usable estimate.
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// Importance assumed when a task has no numeric importance.
pub const DEFAULT_IMPORTANCE: u8 = 5;

/// Lowest accepted importance.
pub const MIN_IMPORTANCE: u8 = 1;

/// Highest accepted importance.
pub const MAX_IMPORTANCE: u8 = 10;

/// A unit of work submitted for ranking.
///
/// Every optional field has already been coerced to its documented default,
/// so consumers never deal with missing or malformed values. Deserializing a
/// `Task` goes through [`Task::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Task {
    /// Identifier of the task within its batch.
    pub title: String,

    /// Deadline, if any.
    pub due_date: Option<NaiveDate>,

    /// Effort estimate in hours, always finite and positive.
    pub estimated_hours: f64,

    /// Importance in `[1, 10]`.
    pub importance: u8,

    /// Titles this task depends on, in input order.
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a task with default importance, effort and no deadline.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
        }
    }

    /// Normalize a raw JSON task object.
    ///
    /// Fails only when `value` is not an object or lacks a non-empty string
    /// `title`. Every other field degrades to its default. Errors report
    /// index 0; batch callers re-point them with [`CoreError::at_index`].
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let object = value.as_object().ok_or(CoreError::InvalidTask { index: 0 })?;

        let title = match object.get("title") {
            Some(Value::String(title)) if !title.is_empty() => title.clone(),
            _ => return Err(CoreError::MissingTitle { index: 0 }),
        };

        Ok(Self {
            title,
            due_date: object.get("due_date").and_then(parse_due_date),
            estimated_hours: object
                .get("estimated_hours")
                .map_or(DEFAULT_ESTIMATED_HOURS, coerce_hours),
            importance: object
                .get("importance")
                .map_or(DEFAULT_IMPORTANCE, coerce_importance),
            dependencies: object
                .get("dependencies")
                .map(coerce_dependencies)
                .unwrap_or_default(),
        })
    }

    /// Builder method to set the deadline.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Builder method to set the effort estimate.
    ///
    /// Non-finite and non-positive estimates fall back to the default.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = sanitize_hours(hours);
        self
    }

    /// Builder method to set the importance, clamped into `[1, 10]`.
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance.clamp(MIN_IMPORTANCE.into(), MAX_IMPORTANCE.into()) as u8;
        self
    }

    /// Builder method to add a dependency.
    pub fn with_dependency(mut self, title: impl Into<String>) -> Self {
        self.dependencies.push(title.into());
        self
    }

    /// Check whether this task lists `title` among its dependencies.
    pub fn depends_on(&self, title: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == title)
    }
}

impl TryFrom<Value> for Task {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// The string is split on `-` into exactly three integers which must form a
/// valid calendar date. Anything else means "no deadline".
pub fn parse_due_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?;
    let mut parts = raw.split('-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn coerce_hours(value: &Value) -> f64 {
    let hours = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    hours.map_or(DEFAULT_ESTIMATED_HOURS, sanitize_hours)
}

fn sanitize_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        DEFAULT_ESTIMATED_HOURS
    }
}

fn coerce_importance(value: &Value) -> u8 {
    // Booleans and numeric strings are not numbers here.
    match value.as_f64() {
        Some(raw) => raw
            .trunc()
            .clamp(f64::from(MIN_IMPORTANCE), f64::from(MAX_IMPORTANCE)) as u8,
        None => DEFAULT_IMPORTANCE,
    }
}

fn coerce_dependencies(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|deps| {
            deps.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_task_is_parsed() {
        let task = Task::from_value(&json!({
            "title": "Write report",
            "due_date": "2025-03-14",
            "estimated_hours": 2.5,
            "importance": 8,
            "dependencies": ["Collect data"]
        }))
        .unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(task.estimated_hours, 2.5);
        assert_eq!(task.importance, 8);
        assert_eq!(task.dependencies, vec!["Collect data".to_string()]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let task = Task::from_value(&json!({ "title": "Bare" })).unwrap();

        assert_eq!(task, Task::new("Bare"));
        assert_eq!(task.estimated_hours, DEFAULT_ESTIMATED_HOURS);
        assert_eq!(task.importance, DEFAULT_IMPORTANCE);
        assert!(task.due_date.is_none());
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_title_is_required() {
        assert_eq!(
            Task::from_value(&json!({ "importance": 3 })),
            Err(CoreError::MissingTitle { index: 0 })
        );
        assert_eq!(
            Task::from_value(&json!({ "title": "" })),
            Err(CoreError::MissingTitle { index: 0 })
        );
        assert_eq!(
            Task::from_value(&json!({ "title": 42 })),
            Err(CoreError::MissingTitle { index: 0 })
        );
        assert_eq!(
            Task::from_value(&json!(["not", "an", "object"])),
            Err(CoreError::InvalidTask { index: 0 })
        );
    }

    #[test]
    fn test_due_date_parsing() {
        assert_eq!(
            parse_due_date(&json!("2024-1-5")),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(parse_due_date(&json!("2024-02-30")), None);
        assert_eq!(parse_due_date(&json!("2024/02/01")), None);
        assert_eq!(parse_due_date(&json!("2024-02-01-03")), None);
        assert_eq!(parse_due_date(&json!("tomorrow")), None);
        assert_eq!(parse_due_date(&json!("")), None);
        assert_eq!(parse_due_date(&json!(20240201)), None);
        assert_eq!(parse_due_date(&Value::Null), None);
    }

    #[test]
    fn test_hours_coercion() {
        assert_eq!(coerce_hours(&json!(0)), DEFAULT_ESTIMATED_HOURS);
        assert_eq!(coerce_hours(&json!(-3)), DEFAULT_ESTIMATED_HOURS);
        assert_eq!(coerce_hours(&json!(null)), DEFAULT_ESTIMATED_HOURS);
        assert_eq!(coerce_hours(&json!("abc")), DEFAULT_ESTIMATED_HOURS);
        assert_eq!(coerce_hours(&json!("inf")), DEFAULT_ESTIMATED_HOURS);
        assert_eq!(coerce_hours(&json!(" 2.5 ")), 2.5);
        assert_eq!(coerce_hours(&json!(12)), 12.0);
    }

    #[test]
    fn test_importance_coercion() {
        assert_eq!(coerce_importance(&json!(7.9)), 7);
        assert_eq!(coerce_importance(&json!(42)), MAX_IMPORTANCE);
        assert_eq!(coerce_importance(&json!(-4)), MIN_IMPORTANCE);
        assert_eq!(coerce_importance(&json!("9")), DEFAULT_IMPORTANCE);
        assert_eq!(coerce_importance(&json!(true)), DEFAULT_IMPORTANCE);
        assert_eq!(coerce_importance(&json!(null)), DEFAULT_IMPORTANCE);
    }

    #[test]
    fn test_dependencies_keep_only_strings() {
        let task = Task::from_value(&json!({
            "title": "T",
            "dependencies": ["A", 3, null, "B"]
        }))
        .unwrap();
        assert_eq!(task.dependencies, vec!["A".to_string(), "B".to_string()]);

        let task = Task::from_value(&json!({ "title": "T", "dependencies": "A" })).unwrap();
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let task: Task =
            serde_json::from_str(r#"{"title":"X","importance":"high","estimated_hours":0}"#)
                .unwrap();
        assert_eq!(task.importance, DEFAULT_IMPORTANCE);
        assert_eq!(task.estimated_hours, DEFAULT_ESTIMATED_HOURS);

        let err = serde_json::from_str::<Task>(r#"{"title":""}"#).unwrap_err();
        assert!(err.to_string().contains("non-empty title"));
    }

    #[test]
    fn test_builders_clamp() {
        let task = Task::new("B")
            .with_importance(99)
            .with_estimated_hours(f64::NAN)
            .with_dependency("A");

        assert_eq!(task.importance, MAX_IMPORTANCE);
        assert_eq!(task.estimated_hours, DEFAULT_ESTIMATED_HOURS);
        assert!(task.depends_on("A"));
        assert!(!task.depends_on("B"));
    }
}
