//! Markup for the structure tagpress splices into the index.

use crate::config::SidebarConfig;

/// Class of the container appended to each metadata block.
pub const TAG_CONTAINER_CLASS: &str = "dt-tags";

/// Class of each rendered tag.
pub const TAG_CLASS: &str = "dt-tag";

/// Class of the article count badge in the sidebar entry.
pub const COUNT_CLASS: &str = "category-count";

/// Render a tag container holding one element per tag.
///
/// ```ignore
/// render_tags(["tech", "rust"]) => <div class="dt-tags"><div class="dt-tag">tech</div><div class="dt-tag">rust</div></div>
/// ```
pub fn render_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> String {
    let mut html = format!(r#"<div class="{TAG_CONTAINER_CLASS}">"#);
    for tag in tags {
        html.push_str(&format!(r#"<div class="{TAG_CLASS}">{}</div>"#, escape_text(tag)));
    }
    html.push_str("</div>");
    html
}

/// The badge text for `count` articles: `" (N)"`.
pub fn count_badge(count: usize) -> String {
    format!(" ({count})")
}

/// Render the synthetic "all articles" sidebar entry.
pub fn render_all_articles(sidebar: &SidebarConfig, count: usize) -> String {
    format!(
        r#"<li {marker}=""><a href="{href}">{label}</a><span class="{COUNT_CLASS}">{badge}</span></li>"#,
        marker = sidebar.marker,
        href = escape_attr(&sidebar.href),
        label = escape_text(&sidebar.label),
        badge = escape_text(&count_badge(count)),
    )
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tags() {
        assert_eq!(
            render_tags(["tech", "rust"]),
            r#"<div class="dt-tags"><div class="dt-tag">tech</div><div class="dt-tag">rust</div></div>"#
        );
    }

    #[test]
    fn test_render_tags_empty() {
        assert_eq!(render_tags([]), r#"<div class="dt-tags"></div>"#);
    }

    #[test]
    fn test_count_badge() {
        assert_eq!(count_badge(0), " (0)");
        assert_eq!(count_badge(42), " (42)");
    }

    #[test]
    fn test_render_all_articles() {
        assert_eq!(
            render_all_articles(&SidebarConfig::default(), 3),
            r#"<li data-tagpress-all-articles=""><a href="">ALL ARTICLES</a><span class="category-count"> (3)</span></li>"#
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"/x?a="1"&b"#), "/x?a=&quot;1&quot;&amp;b");
    }
}
