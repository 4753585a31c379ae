//! Shared primitive types used across the calculator.

/// Stable identifier of a consultant, as issued by the operations feed.
pub type ConsultantId = String;

/// Identifier of a single appointment or task.
pub type WorkItemId = String;

/// Identifier of one dashboard evaluation.
pub type EvaluationId = String;

/// A quantity of hours. Validated inputs are finite and non-negative.
pub type Hours = f64;
