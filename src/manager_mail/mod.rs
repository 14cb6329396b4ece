pub mod errors;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use crate::config::MailParameters;
use crate::manager_mail::errors::MailError;

pub struct Mail {
    mailer: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl Mail {
    /// Returns a new instance of the Mail struct
    ///
    /// # Arguments
    ///
    /// * 'params' - the mail section of the configuration
    pub fn new(params: &MailParameters) -> Result<Self, MailError> {
        let mailer = SmtpTransport::relay(&params.smtp_endpoint)?
            .credentials(Credentials::new(params.smtp_user.clone(), params.smtp_password.clone()))
            .build();

        Ok(
            Self {
                mailer,
                from: params.from.parse::<Mailbox>()?,
                to: params.to.parse::<Mailbox>()?,
            }
        )
    }

    /// Sends a mail with the given subject and body
    ///
    /// # Arguments
    ///
    /// * 'subject' - the subject of the mail
    /// * 'body' - the body of the mail
    pub fn send_mail(&self, subject: String, body: String) -> Result<(), MailError> {

        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body)?;

        let _ = self.mailer.send(&email)?;

        Ok(())
    }
}
