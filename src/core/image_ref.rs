use serde_json::Value as JsonValue;

/// Keys under which a backend may return the generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    QrCodeUrl,
    QrCode,
}

impl ImageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKey::QrCodeUrl => "qr_code_url",
            ImageKey::QrCode => "qr_code",
        }
    }
}

/// Lookup order, highest priority first.
pub const RECOGNIZED_IMAGE_KEYS: [ImageKey; 2] = [ImageKey::QrCodeUrl, ImageKey::QrCode];

/// A URL or data URI pointing at the generated QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub key: ImageKey,
    pub src: String,
}

/// Finds the image reference in a generation result.
///
/// A key only counts when it holds a non-empty string; anything else falls
/// through to the next recognized key.
pub fn extract_image_reference(body: &JsonValue) -> Option<ImageReference> {
    RECOGNIZED_IMAGE_KEYS.iter().find_map(|key| {
        body.get(key.as_str())
            .and_then(JsonValue::as_str)
            .filter(|src| !src.is_empty())
            .map(|src| ImageReference {
                key: *key,
                src: src.to_string(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_qr_code_url() {
        let body = json!({"qr_code_url": "http://x/img.png", "qr_code": "http://y/img.png"});
        let found = extract_image_reference(&body).unwrap();
        assert_eq!(found.key, ImageKey::QrCodeUrl);
        assert_eq!(found.src, "http://x/img.png");
    }

    #[test]
    fn falls_back_to_qr_code() {
        let body = json!({"qr_code": "http://y/img.png"});
        let found = extract_image_reference(&body).unwrap();
        assert_eq!(found.key, ImageKey::QrCode);
        assert_eq!(found.src, "http://y/img.png");
    }

    #[test]
    fn empty_or_non_string_values_fall_through() {
        let body = json!({"qr_code_url": "", "qr_code": "data:image/png;base64,AAAA"});
        assert_eq!(
            extract_image_reference(&body).unwrap().src,
            "data:image/png;base64,AAAA"
        );

        let body = json!({"qr_code_url": null, "qr_code": 42});
        assert!(extract_image_reference(&body).is_none());
    }

    #[test]
    fn nothing_recognized() {
        assert!(extract_image_reference(&json!({"status": "ok"})).is_none());
        assert!(extract_image_reference(&json!(["qr_code_url"])).is_none());
    }
}
