//! Schedule feed client: downloads the JSON document and each record's
//! photo cut, then hands the render loop an ordered, read-only record
//! list. All fetching happens once, before the window opens.

use std::collections::HashMap;

use eyre::{eyre, WrapErr};
use serde::Deserialize;

#[cfg(not(feature = "local-feed"))]
const FEED_URL: &str = "http://statsapi.mlb.com/api/v1/schedule?hydrate=game(content(editorial(recap))),decisions&date=2018-06-10&sportId=1";

#[cfg(feature = "local-feed")]
const FEED_PATH: &str = "res/feed.json";

/// The photo cut size used for the carousel tiles.
const PHOTO_CUT: &str = "270x154";

/// One schedule item: headline and subhead copy plus the raw bytes of its
/// photo cut. Immutable once the feed is loaded.
pub struct GameRecord {
    pub headline: String,
    pub subhead: String,
    pub photo: Vec<u8>,
}

// Serde mirror of the slice of the schedule document we consume.
// Everything is defaulted or optional: games without recap editorial are
// skipped rather than failing the whole feed.
#[derive(Deserialize)]
struct Schedule {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<Game>,
}

#[derive(Deserialize)]
struct Game {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize, Default)]
struct Content {
    editorial: Option<Editorial>,
}

#[derive(Deserialize)]
struct Editorial {
    recap: Option<RecapSet>,
}

#[derive(Deserialize)]
struct RecapSet {
    mlb: Option<Recap>,
}

#[derive(Deserialize)]
struct Recap {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    subhead: String,
    photo: Option<RecapPhoto>,
}

#[derive(Deserialize)]
struct RecapPhoto {
    #[serde(default)]
    cuts: HashMap<String, PhotoCut>,
}

#[derive(Deserialize)]
struct PhotoCut {
    src: String,
}

struct ParsedGame {
    headline: String,
    subhead: String,
    photo_src: String,
}

/// Loads the whole feed: the schedule document plus one photo per record.
pub fn fetch() -> eyre::Result<Vec<GameRecord>> {
    let source = FeedSource::new()?;
    let games = parse_schedule(&source.feed_document()?)?;

    let mut records = Vec::with_capacity(games.len());
    for game in games {
        let photo = source
            .photo_bytes(&game.photo_src)
            .wrap_err_with(|| format!("fetching photo {}", game.photo_src))?;
        records.push(GameRecord {
            headline: game.headline,
            subhead: game.subhead,
            photo,
        });
    }

    if records.is_empty() {
        return Err(eyre!("schedule feed contained no games with recaps"));
    }

    Ok(records)
}

fn parse_schedule(document: &str) -> eyre::Result<Vec<ParsedGame>> {
    let schedule: Schedule =
        serde_json::from_str(document).wrap_err("parsing schedule feed")?;

    let mut games = Vec::new();
    for game in schedule.dates.into_iter().flat_map(|date| date.games) {
        let Some(recap) = game
            .content
            .editorial
            .and_then(|editorial| editorial.recap)
            .and_then(|recap| recap.mlb)
        else {
            log::warn!("skipping game without recap editorial");
            continue;
        };

        let Some(cut) = recap
            .photo
            .and_then(|mut photo| photo.cuts.remove(PHOTO_CUT))
        else {
            log::warn!("skipping recap without a {PHOTO_CUT} photo cut");
            continue;
        };

        games.push(ParsedGame {
            headline: sanitize_ascii(&recap.headline),
            subhead: sanitize_ascii(&recap.subhead),
            photo_src: cut.src,
        });
    }

    Ok(games)
}

/// Replaces code points outside the rasterized ASCII set; glyph cache
/// lookup is only total over `0..128`.
fn sanitize_ascii(text: &str) -> String {
    if text.is_ascii() {
        return text.to_owned();
    }

    log::warn!("replacing non-ascii characters in feed text");
    text.chars()
        .map(|ch| if ch.is_ascii() { ch } else { '?' })
        .collect()
}

/// One feed source is initialized up front and reused for the document
/// and every photo cut.
#[cfg(not(feature = "local-feed"))]
struct FeedSource {
    client: reqwest::blocking::Client,
}

#[cfg(not(feature = "local-feed"))]
impl FeedSource {
    fn new() -> eyre::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("recap-runtime/", env!("CARGO_PKG_VERSION")))
            .build()
            .wrap_err("initializing http client")?;
        Ok(Self { client })
    }

    fn feed_document(&self) -> eyre::Result<String> {
        let response = self
            .client
            .get(FEED_URL)
            .send()
            .and_then(|response| response.error_for_status())
            .wrap_err("downloading schedule feed")?;
        response.text().wrap_err("reading schedule feed body")
    }

    fn photo_bytes(&self, src: &str) -> eyre::Result<Vec<u8>> {
        let response = self
            .client
            .get(src)
            .send()
            .and_then(|response| response.error_for_status())?;
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(feature = "local-feed")]
struct FeedSource;

#[cfg(feature = "local-feed")]
impl FeedSource {
    fn new() -> eyre::Result<Self> {
        Ok(Self)
    }

    fn feed_document(&self) -> eyre::Result<String> {
        std::fs::read_to_string(FEED_PATH).wrap_err_with(|| format!("reading {FEED_PATH}"))
    }

    /// In local mode, photo `src` values are file paths.
    fn photo_bytes(&self, src: &str) -> eyre::Result<Vec<u8>> {
        Ok(std::fs::read(src)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "dates": [{
            "games": [
                {
                    "content": {
                        "editorial": {
                            "recap": {
                                "mlb": {
                                    "headline": "Dodgers Win Thriller",
                                    "subhead": "Walk-off single caps comeback",
                                    "photo": {
                                        "cuts": {
                                            "270x154": { "src": "http://example.test/a.jpg" },
                                            "135x77": { "src": "http://example.test/small.jpg" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                { "content": {} },
                {
                    "content": {
                        "editorial": {
                            "recap": {
                                "mlb": {
                                    "headline": "Peña homers twice",
                                    "subhead": "Rout in the Bronx",
                                    "photo": {
                                        "cuts": {
                                            "270x154": { "src": "http://example.test/b.jpg" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            ]
        }]
    }"#;

    #[test]
    fn parses_games_and_skips_missing_recaps() {
        let games = parse_schedule(SAMPLE).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].headline, "Dodgers Win Thriller");
        assert_eq!(games[0].subhead, "Walk-off single caps comeback");
        assert_eq!(games[0].photo_src, "http://example.test/a.jpg");
    }

    #[test]
    fn sanitizes_non_ascii_feed_text() {
        let games = parse_schedule(SAMPLE).unwrap();
        assert_eq!(games[1].headline, "Pe?a homers twice");
    }

    #[test]
    fn empty_document_parses_to_no_games() {
        let games = parse_schedule("{}").unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_schedule("not json").is_err());
    }

    #[test]
    fn sanitize_keeps_ascii_untouched() {
        assert_eq!(sanitize_ascii("Plain text."), "Plain text.");
        assert_eq!(sanitize_ascii("café"), "caf?");
    }
}
