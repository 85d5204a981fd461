use serde::{Deserialize, Serialize};

/// The pieces of one accepted URL, kept only long enough to insert it into a
/// [`Sitemap`](crate::sitemap::Sitemap).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    pub scheme: String,
    pub domain: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl UrlInfo {
    /// Splits `raw` into its components. Only the scheme is normalized (ASCII
    /// lowercase); domain, path and query are kept byte for byte.
    ///
    /// The fragment is cut at the first `#`, then the query at the first `?`.
    /// A scheme is only recognised when `://` appears before any `/`, `?` or `#`;
    /// the authority then runs up to the next `/`. Without a scheme the whole
    /// remainder is treated as the path. Never fails: anything that cannot be
    /// recovered is left empty.
    pub fn parse(raw: &str) -> Self {
        let (rest, fragment) = raw.split_once('#').unwrap_or((raw, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        let (scheme, rest) = split_scheme(rest);
        let (domain, path) = match scheme {
            Some(_) => rest.find('/').map_or((rest, ""), |i| rest.split_at(i)),
            None => ("", rest),
        };

        Self {
            scheme: scheme.unwrap_or_default().to_ascii_lowercase(),
            domain: domain.to_string(),
            path: path.to_string(),
            query: query.to_string(),
            fragment: fragment.to_string(),
        }
    }

    /// Rebuilds `scheme://domain/path?query`, dropping the fragment.
    pub fn to_line(&self) -> String {
        format!("{}://{}{}?{}", self.scheme, self.domain, self.path, self.query)
    }
}

fn split_scheme(s: &str) -> (Option<&str>, &str) {
    let Some(pos) = s.find("://") else {
        return (None, s);
    };
    if s[..pos].contains('/') {
        return (None, s);
    }
    (Some(&s[..pos]), &s[pos + 3..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::is_valid_url;

    #[test]
    fn parse_splits_all_components() {
        let info = UrlInfo::parse("https://user@a.com:8443/x/y?id=1&b=2#frag");
        assert_eq!(info.scheme, "https");
        assert_eq!(info.domain, "user@a.com:8443");
        assert_eq!(info.path, "/x/y");
        assert_eq!(info.query, "id=1&b=2");
        assert_eq!(info.fragment, "frag");
    }

    #[test]
    fn parse_keeps_raw_case_and_encoding() {
        let info = UrlInfo::parse("http://A.Example.COM/Some%20Path/?q=%41");
        assert_eq!(info.domain, "A.Example.COM");
        assert_eq!(info.path, "/Some%20Path/");
        assert_eq!(info.query, "q=%41");
    }

    #[test]
    fn parse_lowercases_only_the_scheme() {
        let info = UrlInfo::parse("HTTPS://A.com/X?Q=1");
        assert_eq!(info.scheme, "https");
        assert_eq!(info.domain, "A.com");
        assert_eq!(info.path, "/X");
        assert_eq!(info.query, "Q=1");
    }

    #[test]
    fn parse_without_path_or_query() {
        let info = UrlInfo::parse("http://a.com");
        assert_eq!(info.domain, "a.com");
        assert_eq!(info.path, "");
        assert_eq!(info.query, "");

        let info = UrlInfo::parse("http://a.com?x=1");
        assert_eq!(info.domain, "a.com");
        assert_eq!(info.path, "");
        assert_eq!(info.query, "x=1");
    }

    #[test]
    fn parse_without_scheme_puts_everything_in_path() {
        let info = UrlInfo::parse("www.example.com/a?b=1");
        assert_eq!(info.scheme, "");
        assert_eq!(info.domain, "");
        assert_eq!(info.path, "www.example.com/a");
        assert_eq!(info.query, "b=1");
    }

    #[test]
    fn parse_ignores_scheme_marker_inside_the_path() {
        let info = UrlInfo::parse("a.com/redirect://b.com");
        assert_eq!(info.scheme, "");
        assert_eq!(info.path, "a.com/redirect://b.com");
    }

    #[test]
    fn reassembled_line_is_still_valid() {
        for url in [
            "http://a.com/x?id=1",
            "https://www.example.org/a/b?k=v&flag#top",
            "http://a.com/x",
            "https://sub.domain.io",
        ] {
            assert!(is_valid_url(url, false));
            let line = UrlInfo::parse(url).to_line();
            assert!(is_valid_url(&line, false), "{line} should stay valid");
        }
    }
}
