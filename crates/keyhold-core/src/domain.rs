//! Loose "same site" matching over hostnames.
//!
//! Matching is containment-based, not equality: a saved `bank.com` matches a
//! page on `login.bank.com`, and so does the unrelated `mybank.com`. Callers
//! rely on that looseness; do not tighten it here.

use url::Url;

/// Lower-case and strip one leading `www.`.
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Whether two hostnames denote the same site: either contains the other.
///
/// Symmetric. An empty host matches nothing.
pub fn hosts_match(a: &str, b: &str) -> bool {
    let a = normalize_domain(a);
    let b = normalize_domain(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Whether `target` is `saved` or one of its subdomains.
pub fn is_same_or_subdomain(target: &str, saved: &str) -> bool {
    let target = normalize_domain(target);
    let saved = normalize_domain(saved);
    if saved.is_empty() {
        return false;
    }
    target == saved || target.ends_with(&format!(".{saved}"))
}

/// Hostname of a URL, or `None` when the URL does not parse or has no host.
pub fn url_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

/// Hostname of a URL, falling back to the raw string.
pub fn url_host_or_raw(url: &str) -> String {
    url_host(url).unwrap_or_else(|| url.to_string())
}

/// Host part of a stored `site` value, which may be a bare host or a URL.
pub fn site_host(site: &str) -> String {
    let lowered = site.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("WWW.Univille.BR"), "univille.br");
        assert_eq!(normalize_domain("www.www.example.com"), "www.example.com");
        assert_eq!(normalize_domain("mail.example.com"), "mail.example.com");
    }

    #[test]
    fn test_hosts_match_examples() {
        assert!(hosts_match("univille.br", "www.univille.br"));
        assert!(!hosts_match("gmail.com", "outlook.com"));
        assert!(hosts_match("login.bank.com", "bank.com"));
    }

    #[test]
    fn test_hosts_match_is_symmetric() {
        let hosts = [
            "univille.br",
            "www.univille.br",
            "portal.univille.br",
            "gmail.com",
            "outlook.com",
            "a.com",
            "bca.com",
            "",
        ];
        for a in hosts {
            for b in hosts {
                assert_eq!(hosts_match(a, b), hosts_match(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_hosts_match_keeps_loose_containment() {
        assert!(hosts_match("a.com", "bca.com"));
    }

    #[test]
    fn test_hosts_match_empty_never_matches() {
        assert!(!hosts_match("", "univille.br"));
        assert!(!hosts_match("", ""));
    }

    #[test]
    fn test_is_same_or_subdomain() {
        assert!(is_same_or_subdomain("bank.com", "bank.com"));
        assert!(is_same_or_subdomain("login.bank.com", "bank.com"));
        assert!(is_same_or_subdomain("www.bank.com", "bank.com"));
        assert!(!is_same_or_subdomain("mybank.com", "bank.com"));
        assert!(!is_same_or_subdomain("bank.com", "login.bank.com"));
        assert!(!is_same_or_subdomain("bank.com", ""));
    }

    #[test]
    fn test_url_host() {
        assert_eq!(
            url_host("https://univille.br/login?next=/"),
            Some("univille.br".to_string())
        );
        assert_eq!(url_host("not a url"), None);
        assert_eq!(url_host("about:blank"), None);
    }

    #[test]
    fn test_url_host_or_raw() {
        assert_eq!(url_host_or_raw("https://Univille.br/x"), "univille.br");
        assert_eq!(url_host_or_raw("univille.br"), "univille.br");
    }

    #[test]
    fn test_site_host() {
        assert_eq!(site_host("https://Univille.br/login"), "univille.br");
        assert_eq!(site_host("http://bank.com"), "bank.com");
        assert_eq!(site_host("bank.com/path/x"), "bank.com");
        assert_eq!(site_host(""), "");
    }
}
