//! Hash-path normalization and progressive prefix chains.

/// Normalize a raw hash path: trim, force a leading slash, strip trailing
/// slashes. Empty input is the root path.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return String::from("/");
    }
    let mut out = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        out.push('/');
    }
    out.push_str(trimmed);
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Every prefix of a path, shallowest first, starting at the root.
///
/// `/root/user/3` yields `/`, `/root`, `/root/user`, `/root/user/3`. The
/// input is normalized first, so the chain is never empty.
pub fn progressive_paths(path: &str) -> Vec<String> {
    let normalized = normalize(path);
    let mut chain = vec![String::from("/")];
    let mut acc = String::with_capacity(normalized.len());
    for segment in normalized.split('/').filter(|s| !s.is_empty()) {
        acc.push('/');
        acc.push_str(segment);
        chain.push(acc.clone());
    }
    chain
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_empty_is_root() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("   "), "/");
    }

    #[test]
    fn normalize_adds_leading_slash() {
        assert_eq!(normalize("user/3"), "/user/3");
    }

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(normalize("/user/"), "/user");
        assert_eq!(normalize("/user///"), "/user");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn progressive_root_only() {
        assert_eq!(progressive_paths("/"), vec!["/"]);
        assert_eq!(progressive_paths(""), vec!["/"]);
    }

    #[test]
    fn progressive_chain() {
        assert_eq!(
            progressive_paths("/root/user/3"),
            vec!["/", "/root", "/root/user", "/root/user/3"]
        );
    }

    #[test]
    fn progressive_normalizes_first() {
        assert_eq!(progressive_paths("about/"), vec!["/", "/about"]);
    }
}
