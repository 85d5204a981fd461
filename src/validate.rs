use once_cell::sync::Lazy;
use regex::Regex;

const URL_SHAPE: &str = r"^[(http(s)?):/(www\.)?a-zA-Z0-9@:%._\+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_\+.~#?&//=]*)$";
const QUERY_PARAM: &str = r"\?[A-Za-z0-9]+=";

// A pattern that fails to compile never matches.
static URL_SHAPE_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(URL_SHAPE).ok());
static QUERY_PARAM_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(QUERY_PARAM).ok());

/// Returns whether `candidate` looks like a URL.
///
/// This is a shape check over a restricted character set, not a URL grammar: it
/// accepts plenty of bogus authorities and rejects some exotic valid ones. With
/// `require_query_param`, the candidate must also carry at least one `?key=`.
pub fn is_valid_url(candidate: &str, require_query_param: bool) -> bool {
    if !matches(&URL_SHAPE_RE, candidate) {
        return false;
    }
    !require_query_param || matches(&QUERY_PARAM_RE, candidate)
}

fn matches(re: &Option<Regex>, candidate: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(candidate))
}
