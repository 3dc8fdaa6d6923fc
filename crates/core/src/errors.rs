use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },
    #[error("cart is empty")]
    EmptyCart,
    #[error("unknown retailer `{0}`")]
    UnknownRetailer(String),
    #[error("unknown product `{0}`")]
    UnknownProduct(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { field: field.into(), reason: reason.into() }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email already in use: {0}")]
    EmailInUse(String),
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("address `{0}` not found")]
    AddressNotFound(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("unauthorized: {message}")]
    Unauthorized { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Unauthorized { .. } => "Sign in with a valid account and try again.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::Unauthorized { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Unauthorized { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Account(
                error @ (AccountError::InvalidCredentials | AccountError::NotSignedIn),
            ) => Self::Unauthorized {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Account(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Catalog(message) | ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}
