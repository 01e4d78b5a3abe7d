//! Glob matching for the last-resort wildcard signal.
//!
//! `*` matches any run of chars (including none), `?` matches exactly one.

/// Whole-string glob match.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    // Position of the last `*` and the text index it was tried at.
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|c| *c == '*')
}

/// How a token matched a word under glob semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GlobKind {
    Contains,
    Suffix,
    Prefix,
}

/// Strongest glob relation between `token` and `word`.
///
/// A token that already carries glob characters is used as the pattern
/// verbatim and reported as `Prefix` on a match. Plain tokens are tried as
/// `tok*`, `*tok` and `*tok*`, strongest first.
pub fn classify(token: &str, word: &str) -> Option<GlobKind> {
    if crate::normalize::is_glob(token) {
        return glob_match(token, word).then_some(GlobKind::Prefix);
    }
    if glob_match(&format!("{token}*"), word) {
        Some(GlobKind::Prefix)
    } else if glob_match(&format!("*{token}"), word) {
        Some(GlobKind::Suffix)
    } else if glob_match(&format!("*{token}*"), word) {
        Some(GlobKind::Contains)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_and_question_mark() {
        assert!(glob_match("gund*", "gundam"));
        assert!(glob_match("*dam", "gundam"));
        assert!(glob_match("g?ndam", "gundam"));
        assert!(glob_match("*", ""));
        assert!(!glob_match("gund?", "gundam"));
        assert!(!glob_match("robot", "robots"));
        assert!(glob_match("*bo*", "robots"));
    }

    #[test]
    fn classification_prefers_prefix() {
        assert_eq!(classify("rob", "robot"), Some(GlobKind::Prefix));
        assert_eq!(classify("bot", "robot"), Some(GlobKind::Suffix));
        assert_eq!(classify("obo", "robot"), Some(GlobKind::Contains));
        assert_eq!(classify("xyz", "robot"), None);
        assert_eq!(classify("r*t", "robot"), Some(GlobKind::Prefix));
    }
}
