//! Bulk rewrites of the raw query strings held in a [`Sitemap`].
//!
//! Queries stay as raw text. A query is split on `&` into tokens, and each token
//! on its first `=` into key and value; a token without `=` is a bare flag.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::sitemap::Sitemap;

/// Which tokens an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKey {
    /// `*`: every token with a non-empty key.
    All,
    Named(String),
}

impl ParamKey {
    pub fn parse(raw: &str) -> Self {
        if raw == "*" {
            Self::All
        } else {
            Self::Named(raw.to_string())
        }
    }

    fn matches(&self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        match self {
            Self::All => true,
            Self::Named(name) => name == key,
        }
    }
}

/// A `key=value` argument from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEdit {
    pub key: ParamKey,
    pub value: String,
}

impl ParamEdit {
    /// Accepts exactly one `=`; `k`, `k=v=w` and similar are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split('=').collect();
        let [key, value] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            key: ParamKey::parse(key),
            value: value.to_string(),
        })
    }

    /// Parses every argument, dropping (and logging) the malformed ones.
    pub fn parse_all(raw: &[String]) -> Vec<Self> {
        raw.iter()
            .filter_map(|arg| {
                let edit = Self::parse(arg);
                if edit.is_none() {
                    warn!("ignoring malformed key=value argument: {arg}");
                }
                edit
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum ValueEdit {
    Append,
    Replace,
}

fn rewrite_tokens(query: &str, key: &ParamKey, value: &str, edit: ValueEdit) -> String {
    query
        .split('&')
        .map(|token| match token.split_once('=') {
            Some((k, v)) if key.matches(k) => match edit {
                ValueEdit::Append => format!("{k}={v}{value}"),
                ValueEdit::Replace => format!("{k}={value}"),
            },
            None if key.matches(token) => format!("{token}={value}"),
            _ => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends `value` to the value of every matching token.
pub fn add_value(query: &str, key: &ParamKey, value: &str) -> String {
    rewrite_tokens(query, key, value, ValueEdit::Append)
}

/// Replaces the value of every matching token with `value`.
pub fn set_value(query: &str, key: &ParamKey, value: &str) -> String {
    rewrite_tokens(query, key, value, ValueEdit::Replace)
}

/// Collapses several query strings into one, keeping the first value seen for
/// each key. Keys come out in first-seen order; tokens that are not exactly
/// `key=value` are dropped.
pub fn merge_queries<S: AsRef<str>>(queries: &[S]) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged: Vec<(&str, &str)> = Vec::new();
    for query in queries {
        for token in query.as_ref().split('&') {
            let parts: Vec<&str> = token.split('=').collect();
            let [k, v] = parts.as_slice() else {
                continue;
            };
            if k.is_empty() || !seen.insert(*k) {
                continue;
            }
            merged.push((*k, *v));
        }
    }
    merged
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

impl Sitemap {
    pub fn add_value_param(&mut self, key: &str, value: &str) {
        self.apply_add(&ParamEdit {
            key: ParamKey::parse(key),
            value: value.to_string(),
        });
    }

    pub fn set_value_param(&mut self, key: &str, value: &str) {
        self.apply_set(&ParamEdit {
            key: ParamKey::parse(key),
            value: value.to_string(),
        });
    }

    /// Replaces every path's query list with a single merged query.
    ///
    /// Lossy: the distinct queries cannot be recovered afterwards.
    pub fn merge_keys_param(&mut self) {
        let mut paths = 0usize;
        for node in self.path_nodes_mut() {
            node.queries = vec![merge_queries(node.queries.as_slice())];
            paths += 1;
        }
        debug!(paths, "merged query keys");
    }

    pub fn apply_set(&mut self, edit: &ParamEdit) {
        for node in self.path_nodes_mut() {
            for query in node.queries.iter_mut() {
                *query = set_value(query, &edit.key, &edit.value);
            }
        }
    }

    pub fn apply_add(&mut self, edit: &ParamEdit) {
        for node in self.path_nodes_mut() {
            for query in node.queries.iter_mut() {
                *query = add_value(query, &edit.key, &edit.value);
            }
        }
    }
}
