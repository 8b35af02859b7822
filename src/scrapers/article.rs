use anyhow::{Context, Result};
use ego_tree::NodeId;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use tracing::info;
use url::Url;

use crate::models::Article;
use crate::utils::http::fetch_text;

/// Tag/attribute pairs whose values are resolved to absolute URLs.
const RESOURCE_ATTRS: [(&str, &str); 4] =
    [("img", "src"), ("a", "href"), ("link", "href"), ("script", "src")];

/// Download each article's page and replace `content` with the rewritten
/// HTML. Articles are processed in order; the first failure aborts.
pub async fn fetch_contents(client: &Client, mut articles: Vec<Article>) -> Result<Vec<Article>> {
    for article in &mut articles {
        info!("fetching article for [{}]", article.title);
        let html = fetch_text(client, article.url.as_str()).await?;
        article.content = rewrite_content(&html, &article.url)
            .with_context(|| format!("Failed to rewrite article {}", article.url))?;
    }

    Ok(articles)
}

/// Strip the page chrome and make every embedded resource reference
/// absolute, so the document renders outside its origin site.
///
/// The `#header` and `#nav` elements must exist; their absence means the
/// page layout changed and the run should fail rather than mail garbage.
pub fn rewrite_content(html: &str, base: &Url) -> Result<String> {
    let mut document = Html::parse_document(html);

    let header = element_by_id(&document, "header")?.context("Article page has no header element")?;
    let nav = element_by_id(&document, "nav")?.context("Article page has no nav element")?;

    for (tag, attr) in RESOURCE_ATTRS {
        let selector = Selector::parse(tag)
            .map_err(|_| anyhow::anyhow!("Failed to parse {tag} selector"))?;
        let targets: Vec<NodeId> = document.select(&selector).map(|element| element.id()).collect();
        for id in targets {
            resolve_attr(&mut document, id, attr, base);
        }
    }

    for id in [header, nav] {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    Ok(document.root_element().html())
}

fn element_by_id(document: &Html, id_attr: &str) -> Result<Option<NodeId>> {
    let selector = Selector::parse(&format!("#{id_attr}"))
        .map_err(|_| anyhow::anyhow!("Failed to parse #{id_attr} selector"))?;
    Ok(document.select(&selector).next().map(|element| element.id()))
}

/// Resolve a single element's resource attribute against `base`, in place.
/// Already-absolute values come back unchanged from `Url::join`; values that
/// do not resolve at all are left as they are.
fn resolve_attr(document: &mut Html, id: NodeId, attr: &str, base: &Url) {
    let Some(mut node) = document.tree.get_mut(id) else {
        return;
    };

    if let Node::Element(element) = node.value() {
        for (name, value) in element.attrs.iter_mut() {
            if name.local.as_ref() == attr {
                if let Ok(resolved) = base.join(value) {
                    *value = resolved.as_str().into();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE_HTML: &str = r#"
        <html><head>
            <link rel="stylesheet" href="../style.css">
            <script src="js/app.js"></script>
        </head><body>
            <div id="header">site banner</div>
            <div id="nav"><a href="/home">home</a></div>
            <div class="body">
                <img src="../c.png">
                <a href="attachment.pdf">attachment</a>
                <a href="http://other.example.com/x.html">external</a>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_rewrite_resolves_relative_urls() {
        let base = Url::parse("http://x/a/b.html").unwrap();
        let output = rewrite_content(ARTICLE_HTML, &base).unwrap();

        assert!(output.contains(r#"src="http://x/c.png""#));
        assert!(output.contains(r#"href="http://x/attachment.pdf""#));
        assert!(output.contains(r#"href="http://x/style.css""#));
        assert!(output.contains(r#"src="http://x/a/js/app.js""#));
    }

    #[test]
    fn test_rewrite_keeps_absolute_urls() {
        let base = Url::parse("http://x/a/b.html").unwrap();
        let output = rewrite_content(ARTICLE_HTML, &base).unwrap();

        assert!(output.contains(r#"href="http://other.example.com/x.html""#));
    }

    #[test]
    fn test_rewrite_removes_header_and_nav() {
        let base = Url::parse("http://x/a/b.html").unwrap();
        let output = rewrite_content(ARTICLE_HTML, &base).unwrap();

        assert!(!output.contains("site banner"));
        assert!(!output.contains(r#"id="header""#));
        assert!(!output.contains(r#"id="nav""#));
        // Content outside the stripped chrome survives.
        assert!(output.contains("attachment"));
    }

    #[test]
    fn test_rewrite_missing_header_is_an_error() {
        let base = Url::parse("http://x/").unwrap();
        let html = r#"<html><body><div id="nav"></div></body></html>"#;
        assert!(rewrite_content(html, &base).is_err());
    }

    #[test]
    fn test_rewrite_missing_nav_is_an_error() {
        let base = Url::parse("http://x/").unwrap();
        let html = r#"<html><body><div id="header"></div></body></html>"#;
        assert!(rewrite_content(html, &base).is_err());
    }

    #[tokio::test]
    async fn test_fetch_contents_populates_articles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/1.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/news/1.html", server.uri())).unwrap();
        let articles = vec![Article::new("t".to_string(), url, 0)];

        let client = crate::utils::http::create_client().unwrap();
        let articles = fetch_contents(&client, articles).await.unwrap();

        assert!(!articles[0].content.is_empty());
        assert!(articles[0]
            .content
            .contains(&format!(r#"src="{}/c.png""#, server.uri())));
    }
}
