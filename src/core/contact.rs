use awc::Client;
use serde::{Deserialize, Serialize};

use crate::error::FolioError;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    /// All four fields are required; the email also needs a plausible shape.
    pub fn validate(&self) -> Result<(), FolioError> {
        let mut invalid = Vec::new();
        if self.name.trim().is_empty() {
            invalid.push("name");
        }
        if !is_valid_email(self.email.trim()) {
            invalid.push("email");
        }
        if self.subject.trim().is_empty() {
            invalid.push("subject");
        }
        if self.message.trim().is_empty() {
            invalid.push("message");
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(FolioError::InvalidSubmission(invalid))
        }
    }

    fn trimmed(&self) -> Self {
        ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Idle,
    Sending,
    Sent,
    Failed,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: ToastVariant,
}

pub const SENT_TOAST: Toast = Toast {
    title: "Message sent!",
    description: "Thanks for reaching out. I'll get back to you soon.",
    variant: ToastVariant::Default,
};

pub const FAILED_TOAST: Toast = Toast {
    title: "Message not sent",
    description: "Something went wrong while sending your message. Please try again.",
    variant: ToastVariant::Destructive,
};

/// Submission state of the contact form. The submit control is disabled
/// while a message is sending and a second submission is refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    fields: ContactMessage,
    status: SubmitStatus,
    toast: Option<Toast>,
}

impl ContactForm {
    pub fn new() -> Self {
        ContactForm::with_fields(ContactMessage::default())
    }

    pub fn with_fields(fields: ContactMessage) -> Self {
        ContactForm {
            fields,
            status: SubmitStatus::Idle,
            toast: None,
        }
    }

    pub fn fields(&self) -> &ContactMessage {
        &self.fields
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.status != SubmitStatus::Sending
    }

    /// Validates and marks the form as sending, returning the payload to relay.
    pub fn begin(&mut self) -> Result<ContactMessage, FolioError> {
        if self.status == SubmitStatus::Sending {
            return Err(FolioError::SubmissionInFlight);
        }
        self.fields.validate()?;
        self.status = SubmitStatus::Sending;
        self.toast = None;
        Ok(self.fields.trimmed())
    }

    /// Success clears every field; failure keeps them for another attempt.
    pub fn settle(&mut self, outcome: Result<(), FolioError>) -> &Toast {
        let toast = match outcome {
            Ok(()) => {
                self.fields = ContactMessage::default();
                self.status = SubmitStatus::Sent;
                SENT_TOAST
            }
            Err(error) => {
                tracing::warn!("Contact message was not delivered: {}", error);
                self.status = SubmitStatus::Failed;
                FAILED_TOAST
            }
        };
        self.toast.insert(toast)
    }

    pub async fn submit<R: ContactRelay>(&mut self, relay: &R) -> Result<&Toast, FolioError> {
        let payload = self.begin()?;
        let outcome = relay.relay(&payload).await;
        Ok(self.settle(outcome))
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Delivers a contact message to wherever the site owner reads them.
#[allow(async_fn_in_trait)]
pub trait ContactRelay {
    async fn relay(&self, message: &ContactMessage) -> Result<(), FolioError>;
}

pub struct HttpRelay {
    client: Client,
    endpoint: String,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpRelay {
            client: Client::default(),
            endpoint: endpoint.into(),
        }
    }
}

impl ContactRelay for HttpRelay {
    async fn relay(&self, message: &ContactMessage) -> Result<(), FolioError> {
        match self.client.post(&self.endpoint).send_json(message).await {
            Ok(response) => {
                let status = response.status();
                if status.is_client_error() || status.is_server_error() {
                    Err(FolioError::RelayFailed(format!(
                        "endpoint answered {}",
                        status
                    )))
                } else {
                    tracing::debug!("Contact endpoint answered {}", status);
                    Ok(())
                }
            }
            Err(error) => Err(FolioError::RelayFailed(error.to_string())),
        }
    }
}
