use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extract webmention candidate targets from an HTML document.
///
/// Keeps every `a[href]` that parses as an absolute http(s) URL whose host
/// differs from `own_origin`'s host. Deduplicated by full URL string in order
/// of first appearance; two hrefs differing only by fragment stay distinct,
/// since they are separate human-curated permalink references. Malformed
/// hrefs are skipped, never fatal.
pub fn extract(html: &str, own_origin: Option<&Url>) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = try_parse_url(href) else {
            continue;
        };
        if let Some(origin) = own_origin
            && url.host_str() == origin.host_str()
        {
            continue;
        }
        if seen.insert(url.to_string()) {
            links.push(url);
        }
    }

    links
}

fn try_parse_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}
