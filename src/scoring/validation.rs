use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (action, points) in config.points.iter() {
        if action.trim().is_empty() {
            errors.push("scoring.points: action code must not be empty".to_string());
            continue;
        }
        if points < 0 {
            errors.push(format!(
                "scoring.points.{}: must be non-negative (got {})",
                action, points
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
