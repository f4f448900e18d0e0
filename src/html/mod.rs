//! HTML pages served by the map endpoints.
//!
//! Pages are rendered into a `String` without a template engine; every value
//! interpolated into them goes through one of the escaping helpers below.

pub mod map;

pub use map::{render_map, MapPage, TileSource};

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Makes serialized JSON safe to embed inside a `<script>` element.
pub fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
