//! Shared utility functions

/// Converts a snake_case identifier into a human-readable label.
///
/// Used to render enum variant names for the frontend, e.g.
/// `"not_null"` becomes `"Not Null"`.
pub fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("not_null"), "Not Null");
        assert_eq!(display_name("admin"), "Admin");
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("table_density"), "Table Density");
    }

    #[test]
    fn test_display_name_collapses_empty_segments() {
        assert_eq!(display_name("a__b"), "A B");
    }
}
