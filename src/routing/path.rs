//! Path helpers shared by matching and redirect resolution.

/// Drops empty segments, so `"/security//groups/"` becomes `"security/groups"`.
pub fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves a redirect target declared on the entry at `base`.
///
/// Relative targets are appended to `base`; `..` climbs one segment and `.`
/// stays put. A target starting with `/` is taken from the root.
pub fn join(base: &str, to: &str) -> String {
    let mut segments: Vec<&str> = if to.starts_with('/') {
        Vec::new()
    } else {
        base.split('/').filter(|segment| !segment.is_empty()).collect()
    };

    for segment in to.split('/').filter(|segment| !segment.is_empty()) {
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Paths compare ASCII-case-insensitively.
pub fn same(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_slashes() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize("/security//groups/"), "security/groups");
    }

    #[test]
    fn join_is_relative_to_the_entry() {
        assert_eq!(join("", "parameters"), "parameters");
        assert_eq!(join("security", "groups"), "security/groups");
        assert_eq!(join("security", "/taxonomies/tags"), "taxonomies/tags");
        assert_eq!(join("security/groups", "../users"), "security/users");
        assert_eq!(join("security", "./groups/"), "security/groups");
    }

    #[test]
    fn comparison_ignores_ascii_case() {
        assert!(same("Security/Groups", "security/groups"));
        assert!(!same("security", "security/groups"));
    }
}
