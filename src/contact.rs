use serde::Serialize;

pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("email delivery is not configured")]
    NotConfigured,
    #[error("failed reaching the email service: {0}")]
    Transport(String),
    #[error("email service rejected the message with status {0}")]
    Rejected(u16),
}

impl ContactError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::NotConfigured => "emailjs_unconfigured",
            Self::Transport(_) => "transport",
            Self::Rejected(_) => "rejected",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField(_) | Self::InvalidEmail => {
                let mut message = self.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{message}.")
            }
            Self::NotConfigured => "The contact form is not available right now.".to_string(),
            Self::Transport(_) | Self::Rejected(_) => {
                "Something went wrong sending your message. Please try again.".to_string()
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validated, trimmed form contents. Field names match the EmailJS template
/// parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        let message = required(&self.message, "message")?;

        if !is_plausible_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactMessage {
            name,
            email,
            message,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailJsConfig {
    pub fn from_parts(
        service_id: Option<&str>,
        template_id: Option<&str>,
        public_key: Option<&str>,
    ) -> Result<Self, ContactError> {
        fn non_empty(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        }

        match (
            non_empty(service_id),
            non_empty(template_id),
            non_empty(public_key),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Ok(Self {
                service_id,
                template_id,
                public_key,
            }),
            _ => Err(ContactError::NotConfigured),
        }
    }

    pub fn from_build_env() -> Result<Self, ContactError> {
        Self::from_parts(
            option_env!("EMAILJS_SERVICE_ID"),
            option_env!("EMAILJS_TEMPLATE_ID"),
            option_env!("EMAILJS_PUBLIC_KEY"),
        )
    }

    pub fn request<'a>(&'a self, message: &'a ContactMessage) -> EmailJsRequest<'a> {
        EmailJsRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: message,
        }
    }
}

#[derive(Serialize)]
pub struct EmailJsRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: &'a ContactMessage,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Sending => Some("Sending…"),
            Self::Sent => Some("Message sent successfully!"),
            Self::Failed(message) => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "  Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello there\n".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let message = filled_form().validate().expect("form should validate");
        assert_eq!(message.name, "Ada Lovelace");
        assert_eq!(message.email, "ada@example.com");
        assert_eq!(message.message, "Hello there");
    }

    #[test]
    fn blank_fields_are_reported_in_order() {
        let form = ContactForm {
            name: "   ".to_string(),
            ..ContactForm::default()
        };
        assert_eq!(form.validate(), Err(ContactError::MissingField("name")));

        let form = ContactForm {
            message: String::new(),
            ..filled_form()
        };
        assert_eq!(form.validate(), Err(ContactError::MissingField("message")));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "ada",
            "@example.com",
            "ada@example",
            "ada@.com",
            "ada@example.",
            "a da@example.com",
            "a@b@c.com",
        ] {
            let form = ContactForm {
                email: email.to_string(),
                ..filled_form()
            };
            assert_eq!(
                form.validate(),
                Err(ContactError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn config_requires_every_part() {
        assert_eq!(
            EmailJsConfig::from_parts(Some("svc"), Some(" "), Some("key")),
            Err(ContactError::NotConfigured)
        );
        assert_eq!(
            EmailJsConfig::from_parts(Some("svc"), Some("tpl"), None),
            Err(ContactError::NotConfigured)
        );

        let config = EmailJsConfig::from_parts(Some(" svc "), Some("tpl"), Some("key"))
            .expect("complete config");
        assert_eq!(config.service_id, "svc");
    }

    #[test]
    fn request_body_matches_emailjs_shape() {
        let config = EmailJsConfig::from_parts(Some("svc"), Some("tpl"), Some("key"))
            .expect("complete config");
        let message = filled_form().validate().expect("form should validate");

        let body = serde_json::to_value(config.request(&message)).expect("serializable request");
        assert_eq!(
            body,
            serde_json::json!({
                "service_id": "svc",
                "template_id": "tpl",
                "user_id": "key",
                "template_params": {
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "message": "Hello there",
                },
            })
        );
    }

    #[test]
    fn user_messages_hide_transport_details() {
        assert_eq!(
            ContactError::MissingField("email").user_message(),
            "Email is required."
        );
        assert!(!ContactError::Transport("dns failure".to_string())
            .user_message()
            .contains("dns"));
        assert_eq!(ContactError::Rejected(400).class(), "rejected");
    }

    #[test]
    fn status_messages() {
        assert_eq!(SubmissionStatus::Idle.message(), None);
        assert!(SubmissionStatus::Sending.is_sending());
        assert_eq!(
            SubmissionStatus::Failed("nope".to_string()).message(),
            Some("nope")
        );
    }
}
