//! In-memory sitemap: scheme → domain → path → raw query strings.
//!
//! Nodes are created on first use and never removed. Children live in sorted
//! maps, so every traversal (and everything rendered from one) is stable across
//! runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::decompose::UrlInfo;
use crate::validate::is_valid_url;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sitemap {
    schemes: BTreeMap<String, SchemeNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeNode {
    domains: BTreeMap<String, DomainNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainNode {
    paths: BTreeMap<String, PathNode>,
}

/// Raw query strings seen for one path, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    pub queries: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// One `(scheme, domain, path)` location and the queries stored under it.
#[derive(Debug, Clone, Copy)]
pub struct PathEntry<'a> {
    pub scheme: &'a str,
    pub domain: &'a str,
    pub path: &'a str,
    pub node: &'a PathNode,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts every URL in order.
    ///
    /// Invalid URLs are reported at `warn` and skipped; they never abort the
    /// batch. The returned summary only feeds logging.
    pub fn add<I, S>(&mut self, urls: I) -> AddSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = AddSummary::default();
        for url in urls {
            let url = url.as_ref();
            if is_valid_url(url, false) {
                self.add_url(UrlInfo::parse(url));
                summary.accepted += 1;
            } else {
                warn!("invalid URL: {url}");
                summary.rejected += 1;
            }
        }
        debug!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            "sitemap add finished"
        );
        summary
    }

    pub fn add_url(&mut self, info: UrlInfo) {
        self.scheme_mut(&info.scheme)
            .domain_mut(&info.domain)
            .path_mut(&info.path)
            .queries
            .push(info.query);
    }

    pub fn scheme(&self, name: &str) -> Option<&SchemeNode> {
        self.schemes.get(name)
    }

    pub fn scheme_mut(&mut self, name: &str) -> &mut SchemeNode {
        self.schemes.entry(name.to_string()).or_default()
    }

    pub fn schemes(&self) -> impl Iterator<Item = (&str, &SchemeNode)> {
        self.schemes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up the query list stored at one location.
    pub fn queries(&self, scheme: &str, domain: &str, path: &str) -> Option<&[String]> {
        self.scheme(scheme)?
            .domain(domain)?
            .path(path)
            .map(|node| node.queries.as_slice())
    }

    /// Every location in scheme, domain, path order.
    pub fn entries(&self) -> impl Iterator<Item = PathEntry<'_>> {
        self.schemes.iter().flat_map(|(scheme, s)| {
            s.domains.iter().flat_map(move |(domain, d)| {
                d.paths.iter().map(move |(path, node)| PathEntry {
                    scheme,
                    domain,
                    path,
                    node,
                })
            })
        })
    }

    pub fn path_nodes_mut(&mut self) -> impl Iterator<Item = &mut PathNode> {
        self.schemes
            .values_mut()
            .flat_map(|s| s.domains.values_mut())
            .flat_map(|d| d.paths.values_mut())
    }

    /// Total number of stored query entries.
    pub fn len(&self) -> usize {
        self.entries().map(|e| e.node.queries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl SchemeNode {
    pub fn domain(&self, name: &str) -> Option<&DomainNode> {
        self.domains.get(name)
    }

    pub fn domain_mut(&mut self, name: &str) -> &mut DomainNode {
        self.domains.entry(name.to_string()).or_default()
    }

    pub fn domains(&self) -> impl Iterator<Item = (&str, &DomainNode)> {
        self.domains.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl DomainNode {
    pub fn path(&self, name: &str) -> Option<&PathNode> {
        self.paths.get(name)
    }

    pub fn path_mut(&mut self, name: &str) -> &mut PathNode {
        self.paths.entry(name.to_string()).or_default()
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathNode)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_groups_by_scheme_domain_and_path() {
        let mut sitemap = Sitemap::new();
        let summary = sitemap.add([
            "http://a.com/x?id=1",
            "http://a.com/x?id=2&y=3",
            "https://a.com/x?id=9",
            "http://b.com/?q=1",
        ]);

        assert_eq!(summary, AddSummary { accepted: 4, rejected: 0 });
        assert_eq!(
            sitemap.queries("http", "a.com", "/x"),
            Some(&["id=1".to_string(), "id=2&y=3".to_string()][..])
        );
        assert_eq!(
            sitemap.queries("https", "a.com", "/x"),
            Some(&["id=9".to_string()][..])
        );
        assert_eq!(sitemap.queries("http", "b.com", "/"), Some(&["q=1".to_string()][..]));
        assert_eq!(sitemap.len(), 4);
    }

    #[test]
    fn add_keeps_duplicates_and_empty_queries() {
        let mut sitemap = Sitemap::new();
        sitemap.add(["http://a.com/x", "http://a.com/x", "http://a.com/x?a=1"]);
        assert_eq!(
            sitemap.queries("http", "a.com", "/x").unwrap(),
            ["", "", "a=1"]
        );
    }

    #[test]
    fn add_skips_invalid_urls() {
        let mut sitemap = Sitemap::new();
        let summary = sitemap.add(["", "nope", "http://a.com/ok"]);
        assert_eq!(summary, AddSummary { accepted: 1, rejected: 2 });
        assert_eq!(sitemap.len(), 1);
    }

    #[test]
    fn no_normalization_of_case_or_trailing_slash() {
        let mut sitemap = Sitemap::new();
        sitemap.add(["http://A.com/x/", "http://a.com/x"]);
        assert!(sitemap.queries("http", "A.com", "/x/").is_some());
        assert!(sitemap.queries("http", "a.com", "/x").is_some());
        assert_eq!(sitemap.entries().count(), 2);
    }

    #[test]
    fn entries_are_sorted() {
        let mut sitemap = Sitemap::new();
        sitemap.add(["https://z.com/b", "http://b.com/a", "http://a.com/b", "http://a.com/a"]);
        let order: Vec<_> = sitemap
            .entries()
            .map(|e| format!("{}://{}{}", e.scheme, e.domain, e.path))
            .collect();
        assert_eq!(
            order,
            [
                "http://a.com/a",
                "http://a.com/b",
                "http://b.com/a",
                "https://z.com/b"
            ]
        );
    }

    #[test]
    fn serializes_to_nested_schemes_shape() -> anyhow::Result<()> {
        let mut sitemap = Sitemap::new();
        sitemap.add(["http://a.com/x?id=1"]);
        let value = serde_json::to_value(&sitemap)?;
        assert_eq!(
            value,
            serde_json::json!({
                "schemes": { "http": { "a.com": { "/x": { "queries": ["id=1"] } } } }
            })
        );
        Ok(())
    }
}
