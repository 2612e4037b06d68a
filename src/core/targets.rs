use once_cell::sync::Lazy;
use url::Url;

/// Path appended to every backend base URL.
pub const GENERATE_PATH: &str = "generate-qr";

/// One address at which the QR backend may be reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    base: Url,
}

impl BackendTarget {
    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base.trim())?;
        // Url::join drops the last segment unless the path ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `<base>/generate-qr?url=<percent-encoded url>`
    pub fn generate_url(&self, url: &str) -> Result<Url, url::ParseError> {
        let mut endpoint = self.base.join(GENERATE_PATH)?;
        endpoint.query_pairs_mut().clear().append_pair("url", url);
        Ok(endpoint)
    }
}

impl std::fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.base.as_str().trim_end_matches('/'))
    }
}

/// The same backend service addressed three ways: cluster DNS, short service
/// name, short name with explicit port. Order is the fallback order.
pub const DEFAULT_TARGET_BASES: [&str; 3] = [
    "http://qr-api-service.default.svc.cluster.local",
    "http://qr-api-service",
    "http://qr-api-service:80",
];

pub static DEFAULT_TARGETS: Lazy<Vec<BackendTarget>> = Lazy::new(|| {
    DEFAULT_TARGET_BASES
        .iter()
        .map(|base| BackendTarget::parse(base).expect("default backend targets are valid URLs"))
        .collect()
});

/// Parses a comma separated list of base URLs, skipping blank entries.
pub fn parse_target_list(raw: &str) -> Result<Vec<BackendTarget>, url::ParseError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(BackendTarget::parse)
        .collect()
}

pub fn default_targets() -> Vec<BackendTarget> {
    DEFAULT_TARGETS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_keep_fallback_order() {
        let targets = default_targets();
        assert_eq!(targets.len(), DEFAULT_TARGET_BASES.len());
        assert_eq!(
            targets[0].to_string(),
            "http://qr-api-service.default.svc.cluster.local"
        );
        assert_eq!(targets[1].to_string(), "http://qr-api-service");
        // Url normalizes the default port away, the host is what matters.
        assert_eq!(targets[2].base().host_str(), Some("qr-api-service"));
    }

    #[test]
    fn generate_url_encodes_the_query() {
        let target = BackendTarget::parse("http://qr-api-service").unwrap();
        let url = target
            .generate_url("https://example.com/a b?x=1&y=2")
            .unwrap();

        assert_eq!(url.path(), "/generate-qr");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![(
                "url".to_string(),
                "https://example.com/a b?x=1&y=2".to_string()
            )]
        );
        assert!(!url.as_str().contains("&y=2"));
    }

    #[test]
    fn generate_url_keeps_base_path() {
        let target = BackendTarget::parse("http://localhost:8000/qr").unwrap();
        let url = target.generate_url("https://example.com").unwrap();
        assert_eq!(url.path(), "/qr/generate-qr");
        assert_eq!(url.port(), Some(8000));
    }

    #[test]
    fn parse_target_list_skips_blanks() {
        let targets = parse_target_list(" http://a:1 , ,http://b:2").unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].to_string(), "http://a:1");
        assert_eq!(targets[1].to_string(), "http://b:2");
    }

    #[test]
    fn parse_target_list_rejects_garbage() {
        assert!(parse_target_list("not a url").is_err());
    }
}
