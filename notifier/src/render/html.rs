//! HTML renderer
//!
//! Renders a section of game entries to a self-contained HTML document.
//! The only external resources are the cover images.

use crate::domain::entities::GameEntry;

/// Heading of the currently-free section
pub const NOW_FREE_TITLE: &str = "Free Now";

/// Heading of the upcoming section
pub const UPCOMING_TITLE: &str = "Coming Soon";

const STYLESHEET: &str = r#"  body { margin: 0; padding: 20px; font-family: "Microsoft YaHei", sans-serif; background: #fff; color: #000; }
  h1 { font-size: 24px; margin: 10px 0; }
  .item { display: flex; align-items: flex-start; margin: 10px 0; padding: 10px; border-bottom: 1px solid #ccc; }
  .cover { width: 150px; height: auto; margin-right: 10px; }
  .info { flex: 1; }
  .title { font-size: 18px; margin: 0 0 5px; }
  .desc { font-size: 14px; margin: 0; }
"#;

/// Escape `&`, `<` and `>` so feed text cannot inject markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one section (heading plus entries in feed order)
pub fn build_html(title: &str, items: &[&GameEntry]) -> String {
    let mut buf = String::new();

    buf.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\">\n<style>\n");
    buf.push_str(STYLESHEET);
    buf.push_str("</style>\n</head>\n<body>\n");
    buf.push_str(&format!("  <h1>{}</h1>\n", escape_html(title)));

    for item in items {
        buf.push_str(&render_item(item));
    }

    buf.push_str("</body>\n</html>\n");
    buf
}

// Cover goes in verbatim; the feed is trusted to provide a URL here.
fn render_item(item: &GameEntry) -> String {
    format!(
        concat!(
            "  <div class=\"item\">\n",
            "    <img class=\"cover\" src=\"{}\" alt=\"cover\" />\n",
            "    <div class=\"info\">\n",
            "      <h2 class=\"title\">{}</h2>\n",
            "      <p class=\"desc\">{}</p>\n",
            "    </div>\n",
            "  </div>\n",
        ),
        item.cover(),
        escape_html(item.title()),
        escape_html(item.description()),
    )
}
