//! Transactional email.

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub sender: String,
    pub subject: String,
    pub recipient: String,
    pub body: String,
}

/// Delivers one message through the provider and returns its message id.
///
/// Providers reject senders and recipients that are not verified for the
/// sending configuration.
pub trait EmailSender: Send + Sync {
    fn send(&self, message: &EmailMessage) -> Result<String, ServiceError>;
}

/// Send a plain-text email. Both addresses must look like `local@domain`.
pub fn send_email(
    client: &dyn EmailSender,
    sender: &str,
    subject: &str,
    recipient: &str,
    body: &str,
) -> Result<String, ServiceError> {
    for address in [sender, recipient] {
        if !is_plausible_address(address) {
            return Err(ServiceError::InvalidInput(format!("email address {address:?}")));
        }
    }
    let message = EmailMessage {
        sender: sender.to_string(),
        subject: subject.to_string(),
        recipient: recipient.to_string(),
        body: body.to_string(),
    };
    let id = client.send(&message)?;
    tracing::debug!(message_id = %id, "email sent");
    Ok(id)
}

fn is_plausible_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !address.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    /// Accepts only verified recipients and keeps what it delivered.
    struct VerifiedOnly {
        verified: HashSet<&'static str>,
        sent: Mutex<Vec<EmailMessage>>,
    }

    impl EmailSender for VerifiedOnly {
        fn send(&self, message: &EmailMessage) -> Result<String, ServiceError> {
            if !self.verified.contains(message.recipient.as_str()) {
                return Err(ServiceError::Provider(format!(
                    "Email address is not verified: {}",
                    message.recipient
                )));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            Ok(format!("msg-{}", sent.len()))
        }
    }

    fn sender() -> VerifiedOnly {
        VerifiedOnly {
            verified: HashSet::from(["ops@example.com"]),
            sent: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn unverified_recipient_is_rejected() {
        let client = sender();
        let err = send_email(&client, "foo@bar.com", "Hello World", "foo@bar.com", "Saying hello!")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Provider(_)));
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn verified_recipient_is_delivered() {
        let client = sender();
        let id = send_email(
            &client,
            "ops@example.com",
            "Hello World",
            "ops@example.com",
            "Saying hello!",
        )
        .unwrap();
        assert_eq!(id, "msg-1");
        let sent = client.sent.lock().unwrap();
        assert_eq!(sent[0].subject, "Hello World");
        assert_eq!(sent[0].body, "Saying hello!");
    }

    #[test]
    fn malformed_address_never_reaches_provider() {
        let client = sender();
        for address in ["", "no-at-sign", "@example.com", "a@", "a@b@c", "a b@c.com"] {
            let err = send_email(&client, "ops@example.com", "s", address, "b").unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)), "{address:?}");
        }
        assert!(client.sent.lock().unwrap().is_empty());
    }
}
