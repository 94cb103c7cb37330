//! SearXNG results page (simple theme) scraping
//!
//! Used for instances that refuse `format=json`. Selectors follow the
//! simple theme's result templates; an article missing its title link is
//! skipped rather than failing the whole page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{hashtags, non_empty, squash_whitespace};
use crate::category::Category;
use crate::error::SearchError;
use crate::types::{EmptyReason, RecordKind, SearchOutcome, SearchRecord};

static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"package:\s*([^\n]+)").unwrap());
static MAINTAINER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"maintainer:\s*([^\n]+)").unwrap());
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"version:\s*([^\n]+)").unwrap());
static SEEDS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Seeds:\s*(\d+)").unwrap());
static LEECHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Leeches:\s*(\d+)").unwrap());
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Size:\s*([^\n]+)").unwrap());

/// Labels the theme prefixes onto video metadata, per UI language
const LENGTH_LABELS: [&str; 3] = ["Length", "Duration", "长度"];
const AUTHOR_LABELS: [&str; 2] = ["Author", "作者"];

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// Compiled once per page
struct Selectors {
    error_dialog: Selector,
    urls: Selector,
    article: Selector,
    title_link: Selector,
    any_link: Selector,
    content: Selector,
    engine_spans: Selector,
    image_thumbnail: Selector,
    title_span: Selector,
    source_span: Selector,
    result_engine: Selector,
    highlight: Selector,
    video_thumbnail: Selector,
    length: Selector,
    author: Selector,
    img: Selector,
    table_row: Selector,
    cell: Selector,
    attributes: Selector,
    magnet_link: Selector,
}

impl Selectors {
    fn new() -> Result<Self, SearchError> {
        Ok(Self {
            error_dialog: selector("div.dialog-error-block")?,
            urls: selector("div#urls")?,
            article: selector("article.result")?,
            title_link: selector("h3 a[href]")?,
            any_link: selector("a[href]")?,
            content: selector("p.content")?,
            engine_spans: selector("div.engines span")?,
            image_thumbnail: selector("img.image_thumbnail")?,
            title_span: selector("span.title")?,
            source_span: selector("span.source")?,
            result_engine: selector("p.result-engine")?,
            highlight: selector("div.highlight")?,
            video_thumbnail: selector("img.thumbnail")?,
            length: selector("div.result_length")?,
            author: selector("div.result_author")?,
            img: selector("img[src]")?,
            table_row: selector("table tr")?,
            cell: selector("th, td")?,
            attributes: selector("div.attributes")?,
            magnet_link: selector(r#"a[href^="magnet:"]"#)?,
        })
    }
}

/// Parse a `format=html` results page
pub fn parse_results(body: &str, category: Category) -> Result<SearchOutcome, SearchError> {
    let sel = Selectors::new()?;
    let document = Html::parse_document(body);

    if document.select(&sel.error_dialog).next().is_some() {
        return Ok(SearchOutcome::Empty(EmptyReason::NoResultsWithHints));
    }

    let Some(urls) = document.select(&sel.urls).next() else {
        tracing::debug!("results page has no #urls container");
        return Ok(SearchOutcome::Empty(EmptyReason::NoResults));
    };

    let records: Vec<SearchRecord> = urls
        .select(&sel.article)
        .filter_map(|article| parse_article(&sel, article, category))
        .collect();

    tracing::debug!(count = records.len(), %category, "HTML results parsed");
    Ok(SearchOutcome::from_records(records))
}

fn parse_article(sel: &Selectors, article: ElementRef<'_>, category: Category) -> Option<SearchRecord> {
    if category == Category::Images {
        return parse_image(sel, article);
    }

    let link = article.select(&sel.title_link).next()?;
    let url = link.value().attr("href")?.trim().to_string();
    let title = text_of(link);

    let content = first_text(article, &sel.content).unwrap_or_default();
    let engines: Vec<String> = article
        .select(&sel.engine_spans)
        .map(text_of)
        .filter(|e| !e.is_empty())
        .collect();

    let kind = match category {
        Category::General => RecordKind::General,
        Category::News => RecordKind::News {
            published: first_text(article, &sel.highlight),
        },
        Category::Videos => RecordKind::Video {
            thumbnail: first_attr(article, &sel.video_thumbnail, "src"),
            length: first_text(article, &sel.length).and_then(|t| strip_label(&t, &LENGTH_LABELS)),
            author: first_text(article, &sel.author).and_then(|t| strip_label(&t, &AUTHOR_LABELS)),
            published: None,
        },
        Category::Map => RecordKind::Map {
            address: None,
            latitude: None,
            longitude: None,
            details: table_rows(sel, article),
        },
        Category::Music => RecordKind::Music {
            thumbnail: first_attr(article, &sel.img, "src"),
            published: content
                .split_once("Published:")
                .and_then(|(_, date)| non_empty(date)),
        },
        Category::It => RecordKind::It {
            attributes: it_attributes(sel, article),
        },
        Category::Science => RecordKind::Science,
        Category::Files => {
            let text = lines_of(article);
            RecordKind::File {
                size: capture(&SIZE_RE, &text),
                seeds: capture(&SEEDS_RE, &text).and_then(|s| s.parse().ok()),
                leeches: capture(&LEECHES_RE, &text).and_then(|s| s.parse().ok()),
                has_magnet: text.contains("magnet:")
                    || article.select(&sel.magnet_link).next().is_some(),
            }
        }
        Category::SocialMedia => RecordKind::SocialMedia {
            hashtags: hashtags(&content),
        },
        Category::Images => unreachable!("image results are parsed by parse_image"),
    };

    Some(
        SearchRecord::new(title, url, kind)
            .with_content(content)
            .with_engines(engines),
    )
}

/// Image results have no `h3`; the thumbnail is wrapped in the result link
fn parse_image(sel: &Selectors, article: ElementRef<'_>) -> Option<SearchRecord> {
    let url = article.select(&sel.any_link).next()?.value().attr("href")?.trim().to_string();
    let img = article.select(&sel.image_thumbnail).next()?;

    let title = img
        .value()
        .attr("alt")
        .and_then(non_empty)
        .or_else(|| first_text(article, &sel.title_span))
        .unwrap_or_default();

    // <p class="result-engine"><span>Engine:</span> bing images</p>
    let engine = article.select(&sel.result_engine).next().and_then(|p| {
        let own_text: String = p
            .children()
            .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
            .collect();
        non_empty(squash_whitespace(&own_text))
    });

    let kind = RecordKind::Image {
        thumbnail: img.value().attr("src").and_then(non_empty),
        image_url: None,
        source: first_text(article, &sel.source_span),
        resolution: None,
    };

    Some(SearchRecord::new(title, url, kind).with_engines(engine.into_iter().collect()))
}

fn table_rows(sel: &Selectors, article: ElementRef<'_>) -> Vec<(String, String)> {
    article
        .select(&sel.table_row)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&sel.cell).map(text_of).collect();
            match cells.as_slice() {
                [key, value, ..] if !key.is_empty() && !value.is_empty() => {
                    Some((key.clone(), value.clone()))
                }
                _ => None,
            }
        })
        .collect()
}

fn it_attributes(sel: &Selectors, article: ElementRef<'_>) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    let Some(div) = article.select(&sel.attributes).next() else {
        return attributes;
    };

    let text = lines_of(div);
    for (key, re) in [
        ("package", &*PACKAGE_RE),
        ("maintainer", &*MAINTAINER_RE),
        ("version", &*VERSION_RE),
    ] {
        if let Some(value) = capture(re, &text) {
            attributes.insert(key.to_string(), value);
        }
    }
    attributes
}

/// Visible text with whitespace squashed
fn text_of(el: ElementRef<'_>) -> String {
    squash_whitespace(&el.text().collect::<String>())
}

/// Text nodes one per line, so `label:\s*([^\n]+)` patterns stop at the value
fn lines_of(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(text_of).and_then(non_empty)
}

fn first_attr(scope: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .and_then(non_empty)
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).and_then(|c| non_empty(&c[1]))
}

/// "Length: 12:34" -> "12:34"
fn strip_label(text: &str, labels: &[&str]) -> Option<String> {
    let value = labels
        .iter()
        .find_map(|label| text.strip_prefix(label))
        .map(|rest| rest.trim_start().trim_start_matches([':', '：']))
        .unwrap_or(text);
    non_empty(value)
}
