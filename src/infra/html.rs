//! Static scan of a rendered archive page.
//!
//! Collects the article list the browser adapter would find at load time, so the
//! CLI can run the pager headless against generated HTML.

use std::{cell::RefCell, rc::Rc};

use lol_html::{RewriteStrSettings, Selector, element, rewrite_str, text};
use tracing::{debug, warn};

use crate::{
    application::settings::Selectors,
    domain::{articles::ArticleRecord, types::ArticleId},
};

use super::error::InfraError;

/// Articles and landmark presence found in an archive document.
#[derive(Debug, Clone, Default)]
pub struct ArchiveScan {
    pub articles: Vec<ArticleRecord>,
    pub has_sidebar: bool,
    pub has_bottom_sentinel: bool,
    pub has_footer: bool,
}

impl ArchiveScan {
    /// Landmarks the browser adapter needs but the document lacks.
    pub fn missing_landmarks(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_sidebar {
            missing.push("sidebar");
        }
        if !self.has_bottom_sentinel {
            missing.push("sidebar bottom sentinel");
        }
        if !self.has_footer {
            missing.push("footer");
        }
        missing
    }
}

#[derive(Default)]
struct ScanState {
    articles: Vec<PendingArticle>,
    has_sidebar: bool,
    has_bottom_sentinel: bool,
    has_footer: bool,
}

#[derive(Default)]
struct PendingArticle {
    id: Option<String>,
    heading_text: String,
    heading_href: Option<String>,
}

pub fn scan_archive(html: &str, selectors: &Selectors) -> Result<ArchiveScan, InfraError> {
    let state = Rc::new(RefCell::new(ScanState::default()));

    let article_selector = format!("{} {}", selectors.content, selectors.article);
    let heading_selector = format!("{article_selector} {}", selectors.heading);
    let heading_link_selector = format!("{heading_selector} a[href]");
    for candidate in [
        article_selector.as_str(),
        heading_selector.as_str(),
        heading_link_selector.as_str(),
        selectors.sidebar.as_str(),
        selectors.sidebar_bottom.as_str(),
        selectors.footer.as_str(),
    ] {
        validate_selector(candidate)?;
    }

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!(article_selector, {
                    let state = Rc::clone(&state);
                    move |el| {
                        let id = el
                            .get_attribute("id")
                            .filter(|value| !value.trim().is_empty());
                        state.borrow_mut().articles.push(PendingArticle {
                            id,
                            ..PendingArticle::default()
                        });
                        Ok(())
                    }
                }),
                text!(heading_selector, {
                    let state = Rc::clone(&state);
                    move |chunk| {
                        if let Some(article) = state.borrow_mut().articles.last_mut() {
                            article.heading_text.push_str(chunk.as_str());
                        }
                        Ok(())
                    }
                }),
                element!(heading_link_selector, {
                    let state = Rc::clone(&state);
                    move |el| {
                        if let Some(article) = state.borrow_mut().articles.last_mut()
                            && article.heading_href.is_none()
                        {
                            article.heading_href = el.get_attribute("href");
                        }
                        Ok(())
                    }
                }),
                element!(selectors.sidebar, {
                    let state = Rc::clone(&state);
                    move |_| {
                        state.borrow_mut().has_sidebar = true;
                        Ok(())
                    }
                }),
                element!(selectors.sidebar_bottom, {
                    let state = Rc::clone(&state);
                    move |_| {
                        state.borrow_mut().has_bottom_sentinel = true;
                        Ok(())
                    }
                }),
                element!(selectors.footer, {
                    let state = Rc::clone(&state);
                    move |_| {
                        state.borrow_mut().has_footer = true;
                        Ok(())
                    }
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| InfraError::html(err.to_string()))?;

    let state = Rc::try_unwrap(state)
        .map(RefCell::into_inner)
        .map_err(|_| InfraError::html("scan state still shared after rewrite"))?;

    let articles: Vec<_> = state
        .articles
        .into_iter()
        .enumerate()
        .map(|(position, pending)| finish_article(position, pending))
        .collect();

    let scan = ArchiveScan {
        articles,
        has_sidebar: state.has_sidebar,
        has_bottom_sentinel: state.has_bottom_sentinel,
        has_footer: state.has_footer,
    };

    let missing = scan.missing_landmarks();
    if !missing.is_empty() {
        warn!(?missing, "archive document lacks pager landmarks");
    }
    debug!(articles = scan.articles.len(), "archive scanned");
    Ok(scan)
}

fn validate_selector(candidate: &str) -> Result<(), InfraError> {
    candidate
        .parse::<Selector>()
        .map(|_| ())
        .map_err(|err| InfraError::html(format!("invalid selector `{candidate}`: {err}")))
}

fn finish_article(position: usize, pending: PendingArticle) -> ArticleRecord {
    // Same fallback as the browser adapter: unusable ids get a synthetic one.
    let id = pending
        .id
        .and_then(|raw| ArticleId::new(raw).ok())
        .unwrap_or_else(|| ArticleId::synthetic(position));
    // Text chunks arrive raw, character references included.
    let decoded = html_escape::decode_html_entities(&pending.heading_text);
    let text = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    let escaped = ammonia::clean_text(&text);
    let heading_html = match pending.heading_href {
        Some(href) => {
            let href = html_escape::decode_html_entities(&href);
            format!("<a href=\"{}\">{escaped}</a>", ammonia::clean_text(&href))
        }
        None => escaped,
    };
    ArticleRecord::new(id, heading_html, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE: &str = r#"<html><body>
<div id="content">
  <div class="article" id="first-post">
    <div class="article-header"><h1><a href="/posts/first">First &amp; <em>best</em></a></h1></div>
    <p>Body one</p>
  </div>
  <div class="article">
    <div class="article-header"><h1>Second
       post</h1></div>
  </div>
</div>
<ul id="articles-sidebar"><li id="articles-sidebar-item-bottom">Bottom</li></ul>
<div id="footer"></div>
</body></html>"#;

    #[test]
    fn scan_collects_articles_in_order() {
        let scan = scan_archive(ARCHIVE, &Selectors::default()).expect("scan");
        assert_eq!(scan.articles.len(), 2);

        let first = &scan.articles[0];
        assert_eq!(first.id.as_str(), "first-post");
        assert_eq!(first.heading_text, "First & best");
        assert_eq!(
            first.heading_html,
            "<a href=\"&#47;posts&#47;first\">First&#32;&amp;&#32;best</a>"
        );

        let second = &scan.articles[1];
        assert_eq!(second.id.as_str(), "article-2");
        assert_eq!(second.heading_text, "Second post");
        assert_eq!(second.heading_html, "Second&#32;post");
        assert!(scan.missing_landmarks().is_empty());
    }

    #[test]
    fn articles_outside_content_are_ignored() {
        let html = r#"<div class="article"><div class="article-header"><h1>Stray</h1></div></div>
<div id="content"></div>"#;
        let scan = scan_archive(html, &Selectors::default()).expect("scan");
        assert!(scan.articles.is_empty());
        assert_eq!(
            scan.missing_landmarks(),
            vec!["sidebar", "sidebar bottom sentinel", "footer"]
        );
    }

    #[test]
    fn named_references_are_decoded_once() {
        let html = r#"<div id="content"><div class="article" id="notes">
<div class="article-header"><h1><a href="/p">Rust &mdash; notes &hellip; it&rsquo;s &lt;b&gt;</a></h1></div>
</div></div>"#;
        let scan = scan_archive(html, &Selectors::default()).expect("scan");
        let notes = &scan.articles[0];
        assert_eq!(notes.heading_text, "Rust \u{2014} notes \u{2026} it\u{2019}s <b>");
        assert!(!notes.heading_html.contains("&amp;"));
        assert!(notes.heading_html.contains("&lt;b&gt;"));
        assert!(notes.heading_html.contains("\u{2014}"));
    }

    #[test]
    fn sentinel_id_gets_a_synthetic_replacement() {
        let html = r#"<div id="content"><div class="article" id="bottom">
<div class="article-header"><h1>Edge</h1></div></div></div>"#;
        let scan = scan_archive(html, &Selectors::default()).expect("scan");
        assert_eq!(scan.articles[0].id.as_str(), "article-1");
    }

    #[test]
    fn invalid_selector_is_reported() {
        let selectors = Selectors {
            article: "[[".to_string(),
            ..Selectors::default()
        };
        let err = scan_archive(ARCHIVE, &selectors).expect_err("bad selector");
        assert!(matches!(err, InfraError::Html { .. }));
    }
}
