//! Contact form fields and validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContactError;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// What the visitor is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interest {
    Individual,
    Distribution,
    Corporate,
}

impl Interest {
    pub const ALL: [Interest; 3] = [
        Interest::Individual,
        Interest::Distribution,
        Interest::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Individual => "Individual",
            Interest::Distribution => "Distribution",
            Interest::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interest::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown interest '{s}'. Expected Individual, Distribution or Corporate")
            })
    }
}

/// A filled-in contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,

    #[serde(default)]
    pub interested_in: Option<Interest>,

    /// Indian state, only sent for distribution enquiries
    #[serde(default)]
    pub state: Option<String>,
}

impl ContactForm {
    pub fn new(name: &str, phone: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            interested_in: None,
            state: None,
        }
    }

    pub fn with_interest(mut self, interest: Interest) -> Self {
        self.interested_in = Some(interest);
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    /// Check required fields and formats
    pub fn validate(&self) -> Result<(), ContactError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("message", &self.message),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField { field });
            }
        }

        if !PHONE_RE.is_match(self.phone.trim()) {
            return Err(ContactError::InvalidPhone);
        }

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(())
    }

    /// State to send, if any
    ///
    /// Only distribution enquiries carry a state.
    pub fn selected_state(&self) -> Option<&str> {
        match self.interested_in {
            Some(Interest::Distribution) => self
                .state
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// Form fields in submission order
    pub fn to_fields(&self, site_key: &str) -> Vec<(String, String)> {
        let mut fields = vec![
            ("name".to_string(), self.name.trim().to_string()),
            ("phone".to_string(), self.phone.trim().to_string()),
            ("email".to_string(), self.email.trim().to_string()),
            ("message".to_string(), self.message.trim().to_string()),
            ("site_key".to_string(), site_key.to_string()),
        ];

        if let Some(interest) = self.interested_in {
            fields.push(("Interested In".to_string(), interest.to_string()));
        }

        if let Some(state) = self.selected_state() {
            fields.push(("State selected".to_string(), state.to_string()));
        }

        fields
    }
}

#[cfg(test)]
mod form_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid() -> ContactForm {
        ContactForm::new("Asha", "9876543210", "asha@example.com", "Need two machines")
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        let mut form = valid();
        form.message = "   ".to_string();
        assert_eq!(
            form.validate(),
            Err(ContactError::MissingField { field: "message" })
        );

        let mut form = valid();
        form.name.clear();
        assert_eq!(
            form.validate(),
            Err(ContactError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        for phone in ["12345", "98765432101", "98765-4321", "+919876543210"] {
            let mut form = valid();
            form.phone = phone.to_string();
            assert_eq!(form.validate(), Err(ContactError::InvalidPhone), "{phone}");
        }
    }

    #[test]
    fn test_email_format() {
        let mut form = valid();
        form.email = "asha.example.com".to_string();
        assert_eq!(form.validate(), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn test_fields_without_interest() {
        let fields = valid().to_fields("key");
        let names: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["name", "phone", "email", "message", "site_key"]);
    }

    #[test]
    fn test_state_only_sent_for_distribution() {
        let fields = valid()
            .with_interest(Interest::Distribution)
            .with_state("Kerala")
            .to_fields("key");
        assert!(fields.contains(&("Interested In".to_string(), "Distribution".to_string())));
        assert!(fields.contains(&("State selected".to_string(), "Kerala".to_string())));

        let fields = valid()
            .with_interest(Interest::Corporate)
            .with_state("Kerala")
            .to_fields("key");
        assert!(fields.contains(&("Interested In".to_string(), "Corporate".to_string())));
        assert!(!fields.iter().any(|(k, _)| k == "State selected"));
    }

    #[test]
    fn test_interest_parsing() {
        assert_eq!("distribution".parse::<Interest>(), Ok(Interest::Distribution));
        assert!("wholesale".parse::<Interest>().is_err());
    }
}
