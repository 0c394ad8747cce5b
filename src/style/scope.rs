//! Scope attributes and the selector-rewriting CSS scoper.
//!
//! Every component definition gets a scope attribute derived from its kind
//! prefix and name (`v-home`, `w-badge`). The scoper rewrites a definition's
//! CSS so each selector only matches elements carrying that attribute, and
//! `:root` rules only match the mounted root (which carries the `-root`
//! marker).
//!
//! The rewrite is a small scanner, not a regex: rules are found by tracking
//! brace depth, selector lists are split on top-level commas, and every
//! compound selector in a chain gets the scope qualifier inserted before its
//! pseudo-class suffix. Rules nested inside at-rule blocks are copied
//! verbatim.

use std::fmt;

/// The scope attribute for one component definition.
///
/// Stable for a given (kind, name) pair. Applied as a marker attribute to
/// every element of a mounted definition and as a qualifier on its CSS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeAttr(String);

impl ScopeAttr {
    /// Scope attribute for a view definition: `v-` + name.
    pub fn view(name: &str) -> Self {
        Self(format!("v-{name}"))
    }

    /// Scope attribute for a widget definition: `w-` + name.
    pub fn widget(name: &str) -> Self {
        Self(format!("w-{name}"))
    }

    /// The attribute name, e.g. `"v-home"`.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The root-marker attribute name, e.g. `"v-home-root"`.
    ///
    /// Applied only to the mounted subtree's single root element.
    pub fn root_marker(&self) -> String {
        format!("{}-root", self.0)
    }
}

impl fmt::Display for ScopeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrite a stylesheet so every rule is qualified by the scope attribute.
///
/// `.btn { .. }` becomes `.btn[v-foo] { .. }`, `:root { .. }` becomes
/// `[v-foo-root] { .. }`. Declaration bodies pass through untouched.
pub fn scope_css(css: &str, scope: &ScopeAttr) -> String {
    let mut out = String::with_capacity(css.len());
    let mut selector = String::new();
    let mut depth = 0usize;

    for ch in css.chars() {
        match ch {
            '{' => {
                if depth == 0 {
                    out.push_str(&scope_selector_list(&selector, scope));
                    selector.clear();
                } else {
                    out.push_str(&selector);
                    selector.clear();
                }
                depth += 1;
                out.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                out.push(ch);
            }
            _ if depth == 0 => selector.push(ch),
            _ => out.push(ch),
        }
    }
    // Trailing text with no rule body passes through unscoped.
    out.push_str(&selector);
    out
}

/// Split a selector list on top-level commas and scope each selector.
fn scope_selector_list(list: &str, scope: &ScopeAttr) -> String {
    split_top_level(list)
        .into_iter()
        .map(|sel| scope_selector(sel, scope))
        .collect::<Vec<_>>()
        .join(",")
}

/// Split on commas that are not inside an attribute selector or quotes.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth -= 1,
            (None, ',') if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

/// Scope one selector chain: every compound gets the qualifier; combinator
/// characters and whitespace are preserved as written.
fn scope_selector(sel: &str, scope: &ScopeAttr) -> String {
    let mut out = String::new();
    let mut compound = String::new();
    let mut depth = 0i32;

    for ch in sel.chars() {
        let is_separator =
            depth == 0 && (ch.is_whitespace() || matches!(ch, '>' | '+' | '~'));
        if is_separator {
            if !compound.is_empty() {
                out.push_str(&scope_compound(&compound, scope));
                compound.clear();
            }
            out.push(ch);
        } else {
            match ch {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
            compound.push(ch);
        }
    }
    if !compound.is_empty() {
        out.push_str(&scope_compound(&compound, scope));
    }
    out
}

/// Insert the scope qualifier into one compound selector, before any
/// pseudo-class suffix. `:root` maps to the root-marker attribute.
fn scope_compound(compound: &str, scope: &ScopeAttr) -> String {
    if let Some(rest) = compound.strip_prefix(":root") {
        let is_exact = rest
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '-' && c != '_');
        if is_exact {
            return format!("[{}]{rest}", scope.root_marker());
        }
    }

    let mut depth = 0i32;
    for (i, ch) in compound.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth -= 1,
            ':' if depth == 0 => {
                return format!("{}[{}]{}", &compound[..i], scope, &compound[i..]);
            }
            _ => {}
        }
    }
    format!("{compound}[{scope}]")
}
