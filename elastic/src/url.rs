//! URL construction for API calls

use std::collections::BTreeMap;

/// Query-string parameters of a request, rendered in key order
pub type Params = BTreeMap<String, String>;

/// Append `params` to `prefix` as a query string
///
/// Pairs render as `key=value`, or as a bare `key` when the value is empty
/// (flags such as `pretty` or `explain`). The separator is `?`, or `&` when
/// `prefix` already carries a query string. Values are not percent-encoded.
pub fn url_string(prefix: &str, params: &Params) -> String {
    if params.is_empty() {
        return prefix.to_string();
    }

    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                key.clone()
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect();

    let separator = if prefix.ends_with('?') || prefix.ends_with('&') {
        ""
    } else if prefix.contains('?') {
        "&"
    } else {
        "?"
    };

    format!("{}{}{}", prefix, separator, pairs.join("&"))
}

/// Build the URL of an `_endpoint` API call
///
/// Path segments are dropped from the right: no index gives
/// `http://addr/_endpoint`, no type gives `http://addr/index/_endpoint`,
/// no id gives `http://addr/index/type/_endpoint`.
pub fn request_url(
    addr: &str,
    index: &str,
    doc_type: &str,
    id: Option<i64>,
    endpoint: &str,
) -> String {
    if index.is_empty() {
        format!("http://{}/_{}", addr, endpoint)
    } else if doc_type.is_empty() {
        format!("http://{}/{}/_{}", addr, index, endpoint)
    } else {
        match id {
            None => format!("http://{}/{}/{}/_{}", addr, index, doc_type, endpoint),
            Some(id) => format!("http://{}/{}/{}/{}/_{}", addr, index, doc_type, id, endpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_url_string_no_params() {
        assert_eq!(url_string("/", &Params::new()), "/");
    }

    #[test]
    fn test_url_string_open_query() {
        assert_eq!(url_string("?", &params(&[("k1", "v1")])), "?k1=v1");
    }

    #[test]
    fn test_url_string_bare_flag() {
        assert_eq!(
            url_string("/", &params(&[("k1", ""), ("k2", "v2")])),
            "/?k1&k2=v2"
        );
    }

    #[test]
    fn test_url_string_existing_query() {
        assert_eq!(
            url_string("http://h/i/_validate/query?explain", &params(&[("pretty", "")])),
            "http://h/i/_validate/query?explain&pretty"
        );
    }

    #[test]
    fn test_request_url_levels() {
        assert_eq!(
            request_url("localhost:9200", "", "", None, "search"),
            "http://localhost:9200/_search"
        );
        assert_eq!(
            request_url("localhost:9200", "idx", "", None, "search"),
            "http://localhost:9200/idx/_search"
        );
        assert_eq!(
            request_url("localhost:9200", "idx", "doc", None, "search"),
            "http://localhost:9200/idx/doc/_search"
        );
        assert_eq!(
            request_url("localhost:9200", "idx", "doc", Some(7), "explain"),
            "http://localhost:9200/idx/doc/7/_explain"
        );
    }
}
