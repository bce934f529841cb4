//! Fixed page skeleton for converted archives.
//!
//! Rendering is pure string formatting: the same (title, size, fragment)
//! triplet always produces byte-identical output. The content fragment is
//! trusted HTML extracted from the archive and is inserted verbatim.

/// Placeholder tokens never collide with the embedded CSS, which only uses
/// bare class names next to braces.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="../assets/css/bootstrap.min-4.3.1.css">
    <link rel="stylesheet" href="../assets/css/style-3.03029.1.css">
    <link rel="stylesheet" href="../assets/css/custom-style.css">
    <style>
        body {
            font-family: "SF Pro Display", "Helvetica Neue", "Segoe UI", Arial, sans-serif;
            background: linear-gradient(135deg, #f5f7fa 0%, #e4edf5 100%);
            color: #2d3748;
            margin: 0;
            padding: 20px;
            min-height: 100vh;
        }

        .container {
            max-width: 1200px;
            margin: 0 auto;
            background: rgba(255, 255, 255, 0.85);
            backdrop-filter: blur(10px);
            border-radius: 16px;
            padding: 30px;
            box-shadow: 0 4px 20px rgba(0, 0, 0, 0.1);
            border: 1px solid rgba(255, 255, 255, 0.5);
        }

        .header {
            border-bottom: 1px solid #e2e8f0;
            padding-bottom: 20px;
            margin-bottom: 30px;
        }

        .title {
            font-size: 1.8rem;
            font-weight: bold;
            color: #2d3748;
            margin-bottom: 10px;
        }

        .info {
            color: #718096;
            font-size: 0.9rem;
        }

        .content {
            line-height: 1.8;
        }

        .back-link {
            display: inline-block;
            margin-top: 30px;
            padding: 10px 20px;
            background: rgba(247, 251, 254, 0.7);
            color: #3182ce;
            text-decoration: none;
            border-radius: 6px;
            transition: all 0.3s ease;
        }

        .back-link:hover {
            background: rgba(247, 251, 254, 0.9);
            text-decoration: none;
        }

        /* Clean up the imported content */
        .content img {
            max-width: 100%;
            height: auto;
        }

        .content p {
            margin-bottom: 1.2em;
        }

        .content h1, .content h2, .content h3 {
            margin-top: 1.5em;
            margin-bottom: 1em;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="title">{title}</div>
            <div class="info">文件大小: {size} | 来源: 知乎专栏</div>
        </div>

        <div class="content">
            {content}
        </div>

        <a href="./index.html" class="back-link">← 返回古诗文集首页</a>
    </div>
</body>
</html>"#;

/// Derives a display title from an archive filename: every occurrence of the
/// dotted extension is removed and underscores become spaces.
pub fn derive_title(filename: &str, extension: &str) -> String {
    filename
        .replace(&format!(".{}", extension), "")
        .replace('_', " ")
}

/// Formats a byte count for the info line: kilobytes below 1 MiB, megabytes
/// above, one decimal place either way.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Wraps an extracted content fragment in the fixed page skeleton.
pub fn render_page(title: &str, size_str: &str, fragment: &str) -> String {
    PAGE_TEMPLATE
        .replace("{title}", title)
        .replace("{size}", size_str)
        .replace("{content}", fragment)
}

/// One entry on the generated destination index page.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub filename: String,
    pub title: String,
    pub size: String,
}

/// Renders the destination `index.html` that the per-page back links point to.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let mut items = String::new();
    for entry in entries {
        items.push_str(&format!(
            "            <li><a href=\"./{}\">{}</a> <span class=\"info\">({})</span></li>\n",
            entry.filename, entry.title, entry.size
        ));
    }

    let listing = format!(
        "<div class=\"header\">\n            <div class=\"title\">古诗文集</div>\n            <div class=\"info\">共 {} 篇</div>\n        </div>\n\n        <ul>\n{}        </ul>",
        entries.len(),
        items
    );

    // Reuse the page skeleton so the index shares the visual theme.
    PAGE_TEMPLATE
        .replace("{title}", "古诗文集")
        .replace("{size}", "-")
        .replace("{content}", &listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("a.html", "html"), "a");
        assert_eq!(derive_title("spring_poems.html", "html"), "spring poems");
        assert_eq!(derive_title("静夜思_李白.html", "html"), "静夜思 李白");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "0.5KB");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(2_097_152), "2.0MB");
        assert_eq!(format_size(0), "0.0KB");
    }

    #[test]
    fn test_render_page_contains_all_parts() {
        let page = render_page("静夜思", "1.5KB", "<article>床前明月光</article>");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>静夜思</title>"));
        assert!(page.contains("文件大小: 1.5KB | 来源: 知乎专栏"));
        assert!(page.contains("<article>床前明月光</article>"));
        assert!(page.contains("返回古诗文集首页"));
    }

    #[test]
    fn test_fragment_inserted_verbatim() {
        // The fragment is trusted HTML, not user text; it must not be escaped.
        let page = render_page("t", "0.1KB", "<p class=\"x\">&amp; kept</p>");
        assert!(page.contains("<p class=\"x\">&amp; kept</p>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = render_page("title", "1.0KB", "<p>body</p>");
        let b = render_page("title", "1.0KB", "<p>body</p>");
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_index() {
        let entries = vec![
            IndexEntry {
                filename: "a.html".to_string(),
                title: "a".to_string(),
                size: "1.5KB".to_string(),
            },
            IndexEntry {
                filename: "b.html".to_string(),
                title: "b".to_string(),
                size: "0.5KB".to_string(),
            },
        ];

        let index = render_index(&entries);
        assert!(index.contains("href=\"./a.html\""));
        assert!(index.contains("href=\"./b.html\""));
        assert!(index.contains("共 2 篇"));
    }
}
