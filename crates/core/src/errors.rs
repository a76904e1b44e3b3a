use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("Past date: {0}")]
    PastDate(String),

    #[error("Self booking: {0}")]
    SelfBooking(String),

    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cancellation window expired: {0}")]
    WindowExpired(String),

    #[error("Already canceled: {0}")]
    AlreadyCanceled(String),

    #[error("Authentication error: {0}")]
    Unauthenticated(String),

    #[error("Dependency error: {0}")]
    Dependency(#[from] eyre::Report),
}

pub type BookingResult<T> = Result<T, BookingError>;
