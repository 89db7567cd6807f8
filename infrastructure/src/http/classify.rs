//! Provider error classification
//!
//! Raw error strings coming back from recommendation providers are matched
//! against known patterns and folded into a small set of user-facing
//! categories. The raw message is shown only when no pattern matches.

use coach_application::ProviderFault;
use regex::Regex;
use std::sync::LazyLock;

static PATTERNS: LazyLock<Vec<(Regex, ProviderFault)>> = LazyLock::new(|| {
    // Patterns are matched in order; first hit wins.
    vec![
        (
            Regex::new(r"(?i)(image|payload|request body|file).*(too large|exceeds|size limit)")
                .expect("static regex"),
            ProviderFault::ImageTooLarge,
        ),
        (
            Regex::new(r"(?i)(grid|board|4x4|puzzle).*(not found|could not|couldn't|unable to (find|detect))")
                .expect("static regex"),
            ProviderFault::GridNotFound,
        ),
        (
            Regex::new(r"(?i)(does not|doesn't|cannot|can't) (support|process) (vision|image|multimodal)|vision.*(unsupported|not supported)")
                .expect("static regex"),
            ProviderFault::NoVisionSupport,
        ),
        (
            Regex::new(r"(?i)(connection refused|unreachable|dns|no route to host|failed to connect|could not connect)")
                .expect("static regex"),
            ProviderFault::ModelUnreachable,
        ),
    ]
});

/// Classify a raw provider error message into a [`ProviderFault`].
pub fn classify_provider_error(raw: &str) -> ProviderFault {
    for (pattern, fault) in PATTERNS.iter() {
        if pattern.is_match(raw) {
            return fault.clone();
        }
    }
    ProviderFault::Other(raw.trim().to_string())
}
