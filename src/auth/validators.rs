// src/auth/validators.rs

use super::models::SignupRequest;
use crate::common::{PasswordPolicy, ValidationResult, Validator};

/// Client-side checks run before the registration call goes out, so obvious
/// mistakes never cost a network round trip.
pub struct SignupValidator {
    policy: PasswordPolicy,
}

impl SignupValidator {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }
}

impl Validator<SignupRequest> for SignupValidator {
    fn validate(&self, data: &SignupRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.first_name.trim().is_empty() {
            result.add_error("first_name", "First name is required");
        }

        if data.last_name.trim().is_empty() {
            result.add_error("last_name", "Last name is required");
        }

        let email = data.email.trim();
        if email.is_empty() || !email.contains('@') {
            result.add_error("email", "Enter a valid email address");
        }

        if data.password.chars().count() < self.policy.min_len {
            result.add_error(
                "password",
                &format!(
                    "Password must be at least {} characters",
                    self.policy.min_len
                ),
            );
        }

        result
    }
}
