use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LEN: usize = 8;
const MIN_FULL_NAME_LEN: usize = 2;

// Single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

// Ordered validation failures for one form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

// Input that must be checked before it is dispatched to an action.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

// Sign-out carries no fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SignOutRequest {}

/// The shared sign-in / sign-up form, tagged by its `mode`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode")]
pub enum AuthRequest {
    #[serde(rename = "signin")]
    SignIn(SignInRequest),
    #[serde(rename = "signup")]
    SignUp(SignUpRequest),
}

impl Validate for SignInRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result()
    }
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.full_name.trim().chars().count() < MIN_FULL_NAME_LEN {
            errors.push("fullName", "Full name must be at least 2 characters");
        }
        check_email(&self.email, &mut errors);
        check_new_password(&self.password, &mut errors);
        errors.into_result()
    }
}

impl Validate for ForgotPasswordRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&self.email, &mut errors);
        errors.into_result()
    }
}

impl Validate for ResetPasswordRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_new_password(&self.password, &mut errors);
        if self.confirm_password != self.password {
            errors.push("confirmPassword", "Passwords don't match");
        }
        errors.into_result()
    }
}

impl Validate for SignOutRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Ok(())
    }
}

fn check_email(value: &str, errors: &mut FieldErrors) {
    if !looks_like_email(value) {
        errors.push("email", "Please enter a valid email address");
    }
}

fn check_new_password(value: &str, errors: &mut FieldErrors) {
    if value.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 8 characters");
    }
}

// Shape check only: `local@domain.tld`, no whitespace. Deliverability is the
// provider's concern.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}
