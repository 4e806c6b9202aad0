use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::booking::validate_email;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

impl NewsletterSubscription {
    pub fn new(email: &str, now: DateTime<Utc>) -> Result<Self, DomainError> {
        validate_email(email)?;
        Ok(Self { email: email.trim().to_lowercase(), subscribed_at: now })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactInquiry {
    pub fn submit(input: NewContactInquiry, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if input.name.trim().is_empty() {
            return Err(DomainError::invalid("name", "must not be empty"));
        }
        validate_email(&input.email)?;
        if input.message.trim().is_empty() {
            return Err(DomainError::invalid("message", "must not be empty"));
        }

        let subject = match input.subject.trim() {
            "" => "General inquiry".to_string(),
            subject => subject.to_string(),
        };

        Ok(Self {
            id: InquiryId(format!("INQ-{}", Uuid::new_v4().simple())),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone.filter(|phone| !phone.trim().is_empty()),
            subject,
            message: input.message,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{ContactInquiry, NewContactInquiry, NewsletterSubscription};

    #[test]
    fn newsletter_email_is_normalized() {
        let subscription =
            NewsletterSubscription::new("  Jambo@Example.COM ", Utc::now()).expect("valid email");
        assert_eq!(subscription.email, "jambo@example.com");
        assert!(NewsletterSubscription::new("jambo", Utc::now()).is_err());
    }

    #[test]
    fn blank_subject_falls_back_to_general_inquiry() {
        let inquiry = ContactInquiry::submit(
            NewContactInquiry {
                name: "Kamau".to_string(),
                email: "kamau@example.com".to_string(),
                phone: Some(String::new()),
                subject: " ".to_string(),
                message: "Do you arrange airport pickups?".to_string(),
            },
            Utc::now(),
        )
        .expect("valid inquiry");

        assert_eq!(inquiry.subject, "General inquiry");
        assert_eq!(inquiry.phone, None);
    }
}
