//! KPI error types.
//!
//! Both variants are local computation errors. The computation is pure, so
//! retrying reproduces the same error; callers surface them instead.

use thiserror::Error;

use crate::model::ProductLine;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KpiError {
    /// Empty observation set, unknown line, or a malformed record.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// ROI requested for a line whose annual marketing budget is zero.
    #[error("ROI undefined for {line}: annual marketing budget is zero")]
    DivisionUndefined { line: ProductLine },
}

impl KpiError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        KpiError::InvalidInput(msg.into())
    }

    /// Short machine-readable tag used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            KpiError::InvalidInput(_) => "invalid_input",
            KpiError::DivisionUndefined { .. } => "division_undefined",
        }
    }
}

pub type KpiResult<T> = Result<T, KpiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_line() {
        let err = KpiError::DivisionUndefined { line: ProductLine::B };
        assert!(err.to_string().contains("Line B"));
        assert_eq!(err.kind(), "division_undefined");
    }

    #[test]
    fn test_invalid_helper() {
        let err = KpiError::invalid("empty observation set");
        assert_eq!(err, KpiError::InvalidInput("empty observation set".to_string()));
        assert_eq!(err.kind(), "invalid_input");
    }
}
