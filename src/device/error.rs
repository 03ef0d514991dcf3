use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid event record")]
    InvalidEvent,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Nix(#[from] nix::Error),
}
