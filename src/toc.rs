//! Markdown index entries and link rendering for member names and `@see`
//! targets.

/// Link for a member name to its heading anchor.
pub fn render_member_link(name: &str) -> String {
    format!("[{}](#{})", name, github_slug(name))
}

/// Index list item for a member.
pub fn render_index_item(name: &str) -> String {
    format!("* {}", render_member_link(name))
}

/// Render an `@see` target: URLs and relative paths become links, existing
/// markdown links pass through, anything else is left as written.
pub fn render_see_target(text: &str) -> String {
    if text.starts_with('/') || text.starts_with("./") || text.starts_with("../") {
        let target = text.split_whitespace().next().unwrap_or(text);
        return text.replacen(target, &format!("[{}]({})", target, target), 1);
    }

    if contains_markdown_link(text) {
        return text.to_string();
    }

    if text.contains("://") {
        return wrap_bare_urls(text);
    }

    text.to_string()
}

/// GitHub heading anchor slug: lowercase, keep alphanumerics, spaces and
/// hyphens, then turn spaces into hyphens.
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

fn contains_markdown_link(text: &str) -> bool {
    text.match_indices('[').any(|(i, _)| {
        text[i + 1..]
            .find(']')
            .is_some_and(|close| text[i + 1 + close + 1..].starts_with('('))
    })
}

fn wrap_bare_urls(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            if ["http://", "https://", "ftp://"]
                .iter()
                .any(|scheme| word.starts_with(scheme))
            {
                format!("[{}]({})", word, word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_simple() {
        assert_eq!(github_slug("sendMail"), "sendmail");
        assert_eq!(github_slug("hello world"), "hello-world");
    }

    #[test]
    fn slug_strips_underscores_and_symbols() {
        assert_eq!(github_slug("__construct"), "construct");
        assert_eq!(github_slug("get_by-id"), "getby-id");
    }

    #[test]
    fn index_item() {
        assert_eq!(render_index_item("__toString"), "* [__toString](#tostring)");
    }

    #[test]
    fn see_url_is_wrapped() {
        assert_eq!(
            render_see_target("https://php.net/mail for details"),
            "[https://php.net/mail](https://php.net/mail) for details"
        );
    }

    #[test]
    fn see_relative_path_is_linked() {
        assert_eq!(render_see_target("./other.md"), "[./other.md](./other.md)");
    }

    #[test]
    fn see_markdown_link_passes_through() {
        assert_eq!(render_see_target("[docs](x.md)"), "[docs](x.md)");
    }

    #[test]
    fn see_symbol_left_alone() {
        assert_eq!(render_see_target("Mailer::send()"), "Mailer::send()");
    }
}
