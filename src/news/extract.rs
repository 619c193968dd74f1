use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static TWITTER_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="twitter:image"]"#).unwrap());
static ANY_IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Selector rules for the external news listing markup.
///
/// The external format is unstable, so every listing selector lives here
/// rather than in the extraction control flow. A markup change only touches
/// this configuration.
#[derive(Clone, Debug)]
pub struct ExtractorRules {
    title_link: Selector,
    image: Selector,
}

impl ExtractorRules {
    pub fn new(title_link: &str, image: &str) -> anyhow::Result<Self> {
        let title_link = Selector::parse(title_link)
            .map_err(|error| anyhow::anyhow!("Invalid title selector {title_link:?}: {error}"))?;
        let image = Selector::parse(image)
            .map_err(|error| anyhow::anyhow!("Invalid image selector {image:?}: {error}"))?;

        Ok(Self { title_link, image })
    }
}

impl Default for ExtractorRules {
    /// Rules matching the Bing News results markup.
    fn default() -> Self {
        Self::new("a.title", "div.citm_img img").expect("Default selectors must parse")
    }
}

/// A raw article reference pulled out of the listing markup, before
/// enrichment and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateArticle {
    pub title: String,
    pub url: String,
    pub image: Option<String>,
}

/// Walk the document and yield candidates lazily, in document order. The
/// source orders results by relevance and that order must survive downstream.
///
/// A candidate without a link is dropped (there is nothing to key the upsert
/// on); a missing image is an explicit absence, not an error.
pub fn extract<'a>(
    document: &'a Html,
    rules: &'a ExtractorRules,
) -> impl Iterator<Item = CandidateArticle> + 'a {
    document.select(&rules.title_link).filter_map(|element| {
        let url = element.value().attr("href")?.to_owned();
        let title = element.text().collect::<String>().trim().to_owned();
        let image = element
            .select(&rules.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_owned);

        Some(CandidateArticle { title, url, image })
    })
}

/// Best available illustration for an article page: the primary social
/// preview tag, then the secondary one, then the first image on the page.
pub fn first_page_image(document: &Html) -> Option<String> {
    document
        .select(&OG_IMAGE)
        .find_map(|meta| meta.value().attr("content"))
        .or_else(|| {
            document
                .select(&TWITTER_IMAGE)
                .find_map(|meta| meta.value().attr("content"))
        })
        .or_else(|| {
            document
                .select(&ANY_IMAGE)
                .find_map(|img| img.value().attr("src"))
        })
        .map(str::to_owned)
}

/// Visible text of the page body, the raw material for summarization.
pub fn body_text(document: &Html) -> String {
    document
        .select(&BODY)
        .next()
        .map(|body| body.text().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}
