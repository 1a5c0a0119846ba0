use std::fmt;

/// The scrape jobs this bridge knows how to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeKind {
    Website,
    Instagram,
    YoutubeSearch,
}

impl ScrapeKind {
    /// Apify actor id, used both to start runs and as the webhook condition.
    pub fn actor_id(self) -> &'static str {
        match self {
            // apify/website-content-crawler
            ScrapeKind::Website => "aYG0l9s7dbB7j3gbS",
            // apify/instagram-scraper
            ScrapeKind::Instagram => "shu8hvrXbJbY3Eb9W",
            // streamers/youtube-scraper
            ScrapeKind::YoutubeSearch => "h7sDV53CddomktSi5",
        }
    }

    /// Tag carried through the webhook payload and onto the completion event.
    pub fn tag(self) -> &'static str {
        match self {
            ScrapeKind::Website => "website",
            ScrapeKind::Instagram => "instagram",
            ScrapeKind::YoutubeSearch => "youtube-search",
        }
    }
}

impl fmt::Display for ScrapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
