use serde::Serialize;

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";
const LABELS: [&str; 6] = ["Very Weak", "Weak", "Fair", "Good", "Strong", "Very Strong"];
const MAX_SUGGESTIONS: usize = 2;

// Strength meter result shown next to new-password fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: &'static str,
    pub suggestions: Vec<&'static str>,
}

pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "",
            suggestions: Vec::new(),
        };
    }

    let checks: [(bool, &'static str); 5] = [
        (password.chars().count() >= 8, "Use at least 8 characters"),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Add uppercase letters",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Add lowercase letters",
        ),
        (password.chars().any(|c| c.is_ascii_digit()), "Add numbers"),
        (
            password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            "Add special characters",
        ),
    ];

    let score = checks.iter().filter(|(passed, _)| *passed).count();
    let suggestions = checks
        .iter()
        .filter(|(passed, _)| !passed)
        .map(|(_, hint)| *hint)
        .take(MAX_SUGGESTIONS)
        .collect();

    PasswordStrength {
        score: score as u8,
        label: LABELS[score],
        suggestions,
    }
}
