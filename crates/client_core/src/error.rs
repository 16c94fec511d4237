use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to reach cart api: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("cart api rejected request with status {status}")]
    Rejected { status: u16 },
    #[error("failed to resolve shopping session: {0}")]
    Session(anyhow::Error),
}

impl CartError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Session(_) => None,
        }
    }
}
