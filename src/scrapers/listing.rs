use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::Article;
use crate::utils::http::fetch_text;

/// Download the listing page and extract its articles, newest layout
/// assumptions enforced: a `.articles` container of `li` items, each with
/// an anchor and a `label | YYYY-MM-DD` span.
pub async fn fetch_listing(client: &Client, url: &Url) -> Result<Vec<Article>> {
    let html = fetch_text(client, url.as_str()).await?;
    parse_listing(&html, url)
}

pub fn parse_listing(html: &str, base: &Url) -> Result<Vec<Article>> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse(".articles")
        .map_err(|_| anyhow::anyhow!("Failed to parse articles selector"))?;
    let item_selector =
        Selector::parse("li").map_err(|_| anyhow::anyhow!("Failed to parse item selector"))?;

    let container = document
        .select(&container_selector)
        .next()
        .context("Listing page has no articles container")?;

    let mut articles = Vec::new();
    for item in container.select(&item_selector) {
        articles.push(parse_item(item, base)?);
    }

    Ok(articles)
}

fn parse_item(item: ElementRef, base: &Url) -> Result<Article> {
    let anchor_selector =
        Selector::parse("a").map_err(|_| anyhow::anyhow!("Failed to parse anchor selector"))?;
    let date_selector =
        Selector::parse("span").map_err(|_| anyhow::anyhow!("Failed to parse date selector"))?;

    let anchor = item
        .select(&anchor_selector)
        .next()
        .context("Listing item has no anchor")?;
    let date_span = item
        .select(&date_selector)
        .next()
        .context("Listing item has no date span")?;

    let title = anchor.text().collect::<String>();
    let href = anchor
        .value()
        .attr("href")
        .context("Listing anchor has no href")?;
    let url = base
        .join(href)
        .with_context(|| format!("Invalid article link {href}"))?;
    let time = parse_item_date(&date_span.text().collect::<String>())?;

    Ok(Article::new(title, url, time))
}

/// Parse the date suffix of a `label | YYYY-MM-DD` span into epoch seconds
/// at midnight UTC.
fn parse_item_date(text: &str) -> Result<i64> {
    let (_, date_text) = text
        .split_once('|')
        .with_context(|| format!("Date text is not pipe-delimited: {text:?}"))?;

    let date = NaiveDate::parse_from_str(date_text.trim(), "%Y-%m-%d")
        .with_context(|| format!("Unparsable article date: {:?}", date_text.trim()))?;

    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp())
}
