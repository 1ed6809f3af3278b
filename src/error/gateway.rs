use thiserror::Error;

/// Failure of a call against the messaging platform.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// The reaction symbol has no emoji registered with the platform.
    #[error("Reaction symbol '{0}' is not registered")]
    UnresolvedSymbol(String),

    /// The platform rejected the request.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl From<serenity::Error> for GatewayError {
    fn from(err: serenity::Error) -> Self {
        GatewayError::Discord(Box::new(err))
    }
}
