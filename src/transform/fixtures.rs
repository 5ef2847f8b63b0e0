//! Index pages shaped like the stock blog layout, for tests.

/// Scripts placed in `<head>` by default; enough for the default target index.
pub const HEAD_SCRIPTS: usize = 13;

/// A blog index with one article per entry of `tag_texts`.
pub fn blog_page(tag_texts: &[&str]) -> String {
    blog_page_with_scripts(tag_texts, HEAD_SCRIPTS)
}

/// A blog index whose `<head>` carries `head_scripts` numbered scripts.
///
/// Script `i` in the head contains `var s{i} = {i};`.
pub fn blog_page_with_scripts(tag_texts: &[&str], head_scripts: usize) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<title>Blog</title>\n");
    for i in 0..head_scripts {
        html.push_str(&format!("<script>var s{i} = {i};</script>\n"));
    }
    html.push_str("</head>\n<body>\n<div class=\"posts-list\">\n");

    for (i, text) in tag_texts.iter().enumerate() {
        html.push_str(&format!(
            concat!(
                "<div class=\"post-preview\">\n",
                "<h2>Article {i}</h2>\n",
                "<div class=\"metadata\"><div class=\"dt-published\">2021-0{m}-01</div></div>\n",
                "<script type=\"text/json\" class=\"post-metadata\">{text}</script>\n",
                "</div>\n",
            ),
            i = i,
            m = i % 9 + 1,
            text = text,
        ));
    }

    html.push_str(concat!(
        "</div>\n",
        "<div class=\"sidebar-section categories\">\n<h3>Categories</h3>\n<ul>\n",
        "<li><a href=\"#category:rust\">rust</a><span class=\"category-count\">(2)</span></li>\n",
        "<li><a href=\"#category:tech\">tech</a><span class=\"category-count\">(1)</span></li>\n",
        "</ul>\n</div>\n</body>\n</html>\n",
    ));
    html
}
