//! The arithmetic core: every comment's stored `result` is derived here,
//! and only here.

use super::ThreadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

// The accepted set is closed; anything else is a validation failure, not
// a malformed request body.
impl std::str::FromStr for Operation {
    type Err = ThreadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            _ => Err(ThreadError::InvalidOperation),
        }
    }
}

/// Applies `operation` to the parent's result and the submitted value. A
/// comment without a parent starts its own chain, so its result is the
/// value itself. Any non-finite outcome is rejected, which in particular
/// covers division by zero; neither `inf` nor `NaN` ever reaches storage.
pub fn derive_result(
    operation: Operation,
    parent_result: Option<f64>,
    value: f64,
) -> Result<f64, ThreadError> {
    let result = match parent_result {
        None => value,
        Some(parent) => match operation {
            Operation::Add => parent + value,
            Operation::Subtract => parent - value,
            Operation::Multiply => parent * value,
            Operation::Divide => parent / value,
        },
    };

    if !result.is_finite() {
        return Err(ThreadError::InvalidResult);
    }

    Ok(result)
}
