use std::fmt::{Display, Formatter};


pub enum MailError {
    InvalidEmailAddress(String),
    Message(String),
    SmtpError(String),
}

impl Display for MailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MailError::InvalidEmailAddress(e) => write!(f, "MailError::InvalidEmailAddress: {}", e),
            MailError::Message(e) => write!(f, "MailError::Message: {}", e),
            MailError::SmtpError(e) => write!(f, "MailError::SmtpError: {}", e),
        }
    }
}
impl From<lettre::address::AddressError> for MailError {
    fn from(e: lettre::address::AddressError) -> Self { MailError::InvalidEmailAddress(e.to_string()) }
}
impl From<lettre::error::Error> for MailError {
    fn from(e: lettre::error::Error) -> Self { MailError::Message(e.to_string()) }
}
impl From<lettre::transport::smtp::Error> for MailError {
    fn from(e: lettre::transport::smtp::Error) -> Self { MailError::SmtpError(e.to_string()) }
}
