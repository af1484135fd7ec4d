//! Object name validation
//!
//! Extension allow-list matching and the name rules that keep objects inside
//! their namespace directory.

/// Returns true if `name` ends with one of `allowed_extensions`.
///
/// Case-as-given suffix match: `"a.PNG"` does not match `"png"`, and an
/// entry without a leading dot matches as a raw suffix.
pub fn validate_extension<S: AsRef<str>>(name: &str, allowed_extensions: &[S]) -> bool {
    allowed_extensions
        .iter()
        .any(|ext| name.ends_with(ext.as_ref()))
}

/// Returns true if `name` names a single entry directly inside a namespace.
pub fn is_safe_object_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

/// Names reachable through the per-image HTTP routes: letters, digits,
/// underscore and dot.
pub fn is_addressable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "gif", "png"];

    #[test]
    fn extension_suffix_match() {
        assert!(validate_extension("cat.png", &DEFAULT_EXTENSIONS));
        assert!(validate_extension("cat.jpeg", &DEFAULT_EXTENSIONS));
        assert!(!validate_extension("cat.exe", &DEFAULT_EXTENSIONS));
        assert!(!validate_extension("cat.PNG", &DEFAULT_EXTENSIONS));
        assert!(!validate_extension("cat.png.exe", &DEFAULT_EXTENSIONS));
    }

    #[test]
    fn extension_list_is_configurable() {
        let allowed = vec![".webp".to_string()];
        assert!(validate_extension("cat.webp", &allowed));
        assert!(!validate_extension("cat.png", &allowed));
        assert!(!validate_extension("catwebp", &allowed));
    }

    #[test]
    fn safe_object_names() {
        assert!(is_safe_object_name("a.png"));
        assert!(is_safe_object_name("my photo.png"));
        for name in ["", ".", "..", "../a.png", "a/b.png", "a\\b.png", "a\0.png"] {
            assert!(!is_safe_object_name(name), "{name:?}");
        }
    }

    #[test]
    fn addressable_names() {
        assert!(is_addressable_name("Cat_01.png"));
        assert!(!is_addressable_name("cat-01.png"));
        assert!(!is_addressable_name("my photo.png"));
        assert!(!is_addressable_name(""));
    }
}
