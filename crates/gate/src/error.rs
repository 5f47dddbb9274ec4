use curtain_core::DisplayError;

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The host page could not provide the overlay/content regions.
    #[error("display setup failed: {0}")]
    Display(#[from] DisplayError),

    #[error("a tracked network client is already installed on this gate")]
    AlreadyInstalled,

    #[error("a page-load listener is already registered on this gate")]
    ListenerRegistered,
}
