use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::users::services::is_valid_email;

/// Cleaned form contents as sent to POST/PUT /users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    City,
    Country,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::City => "City",
            Field::Country => "Country",
        })
    }
}

pub type FormErrors = BTreeMap<Field, String>;

/// Raw text as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub city: String,
    pub country: String,
}

impl UserForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::City => &self.city,
            Field::Country => &self.country,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::City => self.city = value,
            Field::Country => self.country = value,
        }
    }

    /// Stricter than the service: name, city and country need two
    /// characters. On success the draft is trimmed and the email lower-cased.
    pub fn validate(&self) -> Result<UserDraft, FormErrors> {
        let mut errors = FormErrors::new();

        for field in [Field::Name, Field::City, Field::Country] {
            let value = self.value(field).trim();
            if value.is_empty() {
                errors.insert(field, format!("{field} is required"));
            } else if value.chars().count() < 2 {
                errors.insert(field, format!("{field} must be at least 2 characters"));
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(Field::Email, "Email is required".into());
        } else if !is_valid_email(email) {
            errors.insert(Field::Email, "Please enter a valid email address".into());
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(UserDraft {
            name: self.name.trim().to_string(),
            email: email.to_lowercase(),
            city: self.city.trim().to_string(),
            country: self.country.trim().to_string(),
        })
    }
}
