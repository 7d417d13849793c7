//! The single HTML page served at `/`.

use crate::flash::{Flash, FlashKind};

/// Render the upload and API-key forms, with an optional flash message.
pub fn render_index(flash: Option<&Flash>, api_key_configured: bool) -> String {
    let banner = match flash {
        Some(flash) => {
            let class = match flash.kind {
                FlashKind::Success => "success",
                FlashKind::Error => "error",
            };
            format!(
                "<div class=\"flash {}\">{}</div>\n",
                class,
                escape_html(&flash.message)
            )
        }
        None => String::new(),
    };

    let key_status = if api_key_configured {
        "An API key is configured."
    } else {
        "No API key configured yet."
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Foresight</title>
<style>
body {{ font-family: sans-serif; max-width: 40em; margin: 2em auto; }}
.flash {{ padding: 0.6em; margin-bottom: 1em; border-radius: 4px; }}
.success {{ background: #e3f5e1; }}
.error {{ background: #fbe3e3; }}
</style>
</head>
<body>
<h1>Foresight</h1>
{banner}<h2>Upload transcripts</h2>
<form action="/upload" method="post" enctype="multipart/form-data">
<input type="file" name="files[]" multiple>
<button type="submit">Upload</button>
</form>
<h2>Oracle API key</h2>
<p>{key_status}</p>
<form action="/update_api_key" method="post">
<input type="password" name="api_key" autocomplete="off">
<button type="submit">Save key</button>
</form>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_without_flash() {
        let html = render_index(None, false);
        assert!(html.contains("name=\"files[]\""));
        assert!(html.contains("name=\"api_key\""));
        assert!(html.contains("No API key configured yet."));
        assert!(!html.contains("class=\"flash"));
    }

    #[test]
    fn test_flash_is_escaped() {
        let flash = Flash::error("Upload failed: <script>");
        let html = render_index(Some(&flash), true);
        assert!(html.contains("<div class=\"flash error\">Upload failed: &lt;script&gt;</div>"));
        assert!(html.contains("An API key is configured."));
    }
}
