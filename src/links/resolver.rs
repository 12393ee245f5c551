use super::extractor::extract;
use std::collections::HashSet;
use url::Url;

/// Compute the set of targets to notify for a content change.
///
/// Union of links in the current and previous revision, current-first.
/// Links removed between revisions are still notified so their receivers
/// can recrawl the source and observe the backlink is gone (retraction via
/// recrawl, not a separate delete call).
pub fn resolve(html: &str, previous_html: Option<&str>, own_origin: Option<&Url>) -> Vec<Url> {
    let mut links = extract(html, own_origin);

    if let Some(previous) = previous_html {
        let mut seen: HashSet<String> = links.iter().map(Url::to_string).collect();
        for url in extract(previous, own_origin) {
            if seen.insert(url.to_string()) {
                links.push(url);
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://site.com").unwrap()
    }

    #[test]
    fn includes_links_removed_in_current_revision() {
        let links = resolve(
            r#"<a href="https://example.com">Example</a>"#,
            Some(r#"<a href="https://typo.com">Example</a>"#),
            Some(&origin()),
        );
        let strings: Vec<_> = links.iter().map(Url::as_str).collect();
        assert_eq!(strings, vec!["https://example.com/", "https://typo.com/"]);
    }

    #[test]
    fn no_previous_html_degenerates_to_extract() {
        let links = resolve(
            r#"<a href="https://example.com">Example</a>"#,
            None,
            Some(&origin()),
        );
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn union_deduplicates_across_revisions() {
        let links = resolve(
            r#"<a href="https://example.com">same</a>"#,
            Some(r#"<a href="https://example.com">same</a>"#),
            Some(&origin()),
        );
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn current_links_come_first() {
        let links = resolve(
            r#"<a href="https://b.com">b</a>"#,
            Some(r#"<a href="https://a.com">a</a>"#),
            Some(&origin()),
        );
        assert_eq!(links[0].host_str(), Some("b.com"));
        assert_eq!(links[1].host_str(), Some("a.com"));
    }
}
