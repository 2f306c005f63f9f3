use once_cell::sync::Lazy;
use regex::Regex;


// Two or three lowercase letters after the last dot, nothing wider.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^ ]+@[^ ]+\.[a-z]{2,3}$").expect("email pattern should compile")
});

/// Trim the way browsers do: whitespace plus the byte order mark, which
/// `str::trim` keeps.
fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        let value = trim_input(value);
        match self {
            FormField::Name | FormField::Message => !value.is_empty(),
            FormField::Email => is_valid_email(value),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(trim_input(value))
}

/// Per-field verdict of one submit attempt. `true` means the field passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub name: bool,
    pub email: bool,
    pub message: bool,
}

impl ValidationReport {
    /// Every rule runs, whatever the others decided.
    pub fn check(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: FormField::Name.accepts(name),
            email: FormField::Email.accepts(email),
            message: FormField::Message.accepts(message),
        }
    }

    pub fn passed(&self, field: FormField) -> bool {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Message => self.message,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name && self.email && self.message
    }

    pub fn failing(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| !self.passed(*field))
            .collect()
    }
}
