//! A thin error wrapper around the planner's structured failures, matching
//! the donor's `AppError` shape minus the HTTP response conversion -- this
//! crate stops at the typed Rust boundary, so there is nothing to respond
//! through.

use warehouse_core::CoreError;
use warehouse_planner::PlanError;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid scenario: {0}")]
    Invalid(#[from] CoreError),

    #[error("planning failed: {0}")]
    Planning(#[from] PlanError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn log(self) -> Self {
        tracing::error!(error = %self, "operation failed");
        self
    }
}
