//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the terminal UI drives catalog and module pages.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive session until the learner quits.
    async fn run(&self) -> Result<(), DomainError>;
}
