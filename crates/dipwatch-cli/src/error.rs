use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    /// The computed report could not be delivered to the webhook. The
    /// computation itself succeeded; the non-zero exit lets a scheduler
    /// flag the run.
    #[error(transparent)]
    Delivery(#[from] dipwatch_core::NotifyError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Delivery(_) => 7,
        }
    }
}
