use crate::core::view::ViewState;

const IDLE_LABEL: &str = "Generate QR Code";
const BUSY_LABEL: &str = "Generating...";

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generate the generator page for the given view state.
pub fn generate_html(state: &ViewState) -> String {
    let error_banner = if state.error.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="error">Error: {}</div>"#,
            escape_html(&state.error)
        )
    };

    let qr_image = if state.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="qr-container"><img src="{}" alt="QR Code" class="qr-code"></div>"#,
            escape_html(&state.image)
        )
    };

    let (label, disabled) = if state.busy {
        (BUSY_LABEL, " disabled")
    } else {
        (IDLE_LABEL, "")
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QR Code Generator</title>
    <style>
        body {{
            margin: 0;
            font-family: sans-serif;
        }}
        .container {{
            min-height: 100vh;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            background-color: #121212;
            color: white;
        }}
        .title {{
            margin: 0;
            line-height: 1.15;
            font-size: 4rem;
            text-align: center;
        }}
        form {{
            display: flex;
            flex-direction: column;
            align-items: center;
        }}
        input {{
            padding: 10px;
            border-radius: 5px;
            border: none;
            margin-top: 20px;
            width: 300px;
            color: #121212;
        }}
        button {{
            padding: 10px 20px;
            margin-top: 20px;
            border: none;
            border-radius: 5px;
            background-color: #0070f3;
            color: white;
            cursor: pointer;
        }}
        button:disabled {{
            opacity: 0.6;
        }}
        .error {{
            margin-top: 20px;
            padding: 10px;
            background-color: #ff4444;
            color: white;
            border-radius: 5px;
            text-align: center;
        }}
        .qr-container {{
            margin-top: 20px;
            padding: 20px;
            background-color: white;
            border-radius: 10px;
        }}
        .qr-code {{
            max-width: 300px;
            height: auto;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1 class="title">QR Code Generator</h1>
        <form method="get" action="/" id="generate-form">
            <input type="text" name="url" value="{}" placeholder="Enter URL like https://example.com" required>
            <button type="submit" id="generate-button"{}>{}</button>
        </form>
        {}
        {}
    </div>

    <script>
        document.getElementById('generate-form').addEventListener('submit', () => {{
            const button = document.getElementById('generate-button');
            button.disabled = true;
            button.textContent = '{}';
        }});
    </script>
</body>
</html>"#,
        escape_html(&state.input),
        disabled,
        label,
        error_banner,
        qr_image,
        BUSY_LABEL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_page_has_form_and_nothing_else() {
        let html = generate_html(&ViewState::default());
        assert!(html.contains(r#"name="url""#));
        assert!(html.contains("required"));
        assert!(html.contains(">Generate QR Code</button>"));
        assert!(!html.contains(r#"class="error""#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn image_is_rendered_with_exact_source() {
        let state = ViewState {
            image: "http://x/img.png".to_string(),
            ..ViewState::default()
        };
        let html = generate_html(&state);
        assert!(html.contains(r#"<img src="http://x/img.png" alt="QR Code""#));
        assert!(!html.contains("Error: "));
    }

    #[test]
    fn error_banner_is_rendered() {
        let state = ViewState {
            error: "URL is required".to_string(),
            ..ViewState::default()
        };
        let html = generate_html(&state);
        assert!(html.contains(r#"<div class="error">Error: URL is required</div>"#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn busy_disables_the_button() {
        let state = ViewState {
            busy: true,
            ..ViewState::default()
        };
        let html = generate_html(&state);
        assert!(html.contains(r#"id="generate-button" disabled>Generating...</button>"#));
    }

    #[test]
    fn user_input_is_escaped() {
        let state = ViewState {
            input: r#""><script>alert(1)</script>"#.to_string(),
            error: "<b>".to_string(),
            ..ViewState::default()
        };
        let html = generate_html(&state);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(html.contains("Error: &lt;b&gt;"));
    }

    #[test]
    fn data_uri_images_survive_escaping() {
        let state = ViewState {
            image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            ..ViewState::default()
        };
        assert!(generate_html(&state).contains(r#"src="data:image/png;base64,iVBORw0KGgo=""#));
    }
}
