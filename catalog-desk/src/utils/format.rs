//! Display formatting helpers

/// Selected-rows suffix for the delete button: "(3)", empty when none
pub fn selected_count_suffix(count: usize) -> String {
    if count > 0 {
        format!("({})", count)
    } else {
        String::new()
    }
}

/// Comma-join of display names
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_count_suffix() {
        assert_eq!(selected_count_suffix(0), "");
        assert_eq!(selected_count_suffix(3), "(3)");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&["Tools", "Garden"]), "Tools, Garden");
        assert_eq!(join_names::<&str>(&[]), "");
    }
}
