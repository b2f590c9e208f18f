use scraper::{ElementRef, Html, Selector};

use crate::{
    error::{AppError, AppResult},
    models::WatchlistEntry,
};

const UNKNOWN_TITLE: &str = "Unknown Title";
const ROOT_LINK: &str = "/";

/// Entries and pagination state scraped from one watchlist page
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WatchlistPage {
    pub entries: Vec<WatchlistEntry>,
    /// Absolute URL of the following page, if any
    pub next_page: Option<String>,
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::Internal(format!("Invalid selector {}: {}", css, e)))
}

/// Joins a site-relative link onto the base URL. Absolute links pass through.
pub fn absolute_url(base_url: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("{}{}", base_url, link)
    }
}

/// Extracts the `og:image` avatar from a profile page
pub fn parse_avatar(html: &str) -> AppResult<Option<String>> {
    let document = Html::parse_document(html);
    let og_image = selector(r#"meta[property="og:image"]"#)?;

    Ok(document
        .select(&og_image)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string))
}

/// Parses poster cards and the "next" link from a watchlist page
pub fn parse_watchlist_page(html: &str, base_url: &str) -> AppResult<WatchlistPage> {
    let document = Html::parse_document(html);
    let card = selector("li.poster-container")?;
    let poster = selector("div.film-poster")?;
    let image = selector("img")?;
    let next = selector("a.next")?;

    let entries: Vec<WatchlistEntry> = document
        .select(&card)
        .map(|item| parse_poster_card(item, &poster, &image, base_url))
        .collect();

    if entries.is_empty() {
        return Ok(WatchlistPage::default());
    }

    let next_page = document
        .select(&next)
        .find_map(|link| link.value().attr("href"))
        .map(|href| absolute_url(base_url, href));

    Ok(WatchlistPage { entries, next_page })
}

fn parse_poster_card(
    item: ElementRef<'_>,
    poster: &Selector,
    image: &Selector,
    base_url: &str,
) -> WatchlistEntry {
    let poster_div = item.select(poster).next();

    let title = poster_div
        .and_then(|div| div.select(image).next())
        .and_then(|img| img.value().attr("alt"))
        .unwrap_or(UNKNOWN_TITLE);

    let link = poster_div
        .and_then(|div| div.value().attr("data-target-link"))
        .unwrap_or(ROOT_LINK);

    WatchlistEntry::new(title, absolute_url(base_url, link))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://letterboxd.com";

    fn card(title: &str, link: &str) -> String {
        format!(
            r#"<li class="poster-container">
                <div class="film-poster" data-target-link="{link}">
                    <img alt="{title}" src="poster.jpg"/>
                </div>
            </li>"#
        )
    }

    #[test]
    fn test_parse_avatar() {
        let html = r#"<html><head>
            <meta property="og:title" content="Alice"/>
            <meta property="og:image" content="https://a.ltrbxd.com/avatar.jpg"/>
        </head><body></body></html>"#;

        assert_eq!(
            parse_avatar(html).unwrap(),
            Some("https://a.ltrbxd.com/avatar.jpg".to_string())
        );
    }

    #[test]
    fn test_parse_avatar_missing_tag() {
        let html = r#"<html><head><meta property="og:title" content="Alice"/></head></html>"#;
        assert_eq!(parse_avatar(html).unwrap(), None);

        let html = r#"<html><head><meta property="og:image" content=""/></head></html>"#;
        assert_eq!(parse_avatar(html).unwrap(), None);
    }

    #[test]
    fn test_parse_watchlist_page_with_next_link() {
        let html = format!(
            r#"<ul class="poster-list">{}{}</ul>
            <div class="pagination"><a class="next" href="/alice/watchlist/page/2/">Older</a></div>"#,
            card("Heat (1995)", "/film/heat-1995/"),
            card("Alien", "/film/alien/"),
        );

        let page = parse_watchlist_page(&html, BASE).unwrap();

        assert_eq!(
            page.entries,
            vec![
                WatchlistEntry::new("Heat (1995)", "https://letterboxd.com/film/heat-1995/"),
                WatchlistEntry::new("Alien", "https://letterboxd.com/film/alien/"),
            ]
        );
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://letterboxd.com/alice/watchlist/page/2/")
        );
    }

    #[test]
    fn test_parse_watchlist_page_without_next_link() {
        let html = format!("<ul>{}</ul>", card("Alien", "/film/alien/"));
        let page = parse_watchlist_page(&html, BASE).unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_parse_watchlist_page_empty_ignores_next_link() {
        let html = r#"<p>No films</p><a class="next" href="/alice/watchlist/page/9/">Older</a>"#;
        let page = parse_watchlist_page(html, BASE).unwrap();
        assert_eq!(page, WatchlistPage::default());
    }

    #[test]
    fn test_parse_poster_card_defaults() {
        let html = r#"<ul>
            <li class="poster-container"><div class="film-poster"></div></li>
        </ul>"#;

        let page = parse_watchlist_page(html, BASE).unwrap();

        assert_eq!(
            page.entries,
            vec![WatchlistEntry::new("Unknown Title", "https://letterboxd.com/")]
        );
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url(BASE, "/film/x/"), "https://letterboxd.com/film/x/");
        assert_eq!(
            absolute_url(BASE, "https://example.com/film/x/"),
            "https://example.com/film/x/"
        );
    }
}
