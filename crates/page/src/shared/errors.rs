use curtain_core::DisplayError;

pub fn to_display_error(e: impl std::fmt::Display, action: &str) -> DisplayError {
    let s = e.to_string();
    if s.contains("Cannot find context") || s.contains("Execution context was destroyed") {
        DisplayError::Script(format!("{} interrupted by navigation: {}", action, s))
    } else {
        DisplayError::Script(format!("{} failed: {}", action, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_loss_is_called_out() {
        let err = to_display_error("Execution context was destroyed", "Mount");
        assert_eq!(
            err.to_string(),
            "script evaluation failed: Mount interrupted by navigation: Execution context was destroyed"
        );
        let err = to_display_error("boom", "Mount");
        assert_eq!(err.to_string(), "script evaluation failed: Mount failed: boom");
    }
}
