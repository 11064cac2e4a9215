use super::Article;
use crate::search::lenient;
use serde::Deserialize;

/// One article record as the provider sends it.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient::value")]
    article_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    source_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    source_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    published_datetime_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    snippet: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    link: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    authors: Option<Vec<String>>,
}

pub fn normalize_article(raw: RawArticle) -> Article {
    let image = raw
        .photo_url
        .filter(|url| !url.is_empty())
        .or(raw.thumbnail_url)
        .unwrap_or_default();
    let author = raw
        .authors
        .and_then(|authors| authors.into_iter().next())
        .unwrap_or_default();

    Article {
        id: raw.article_id.unwrap_or_default(),
        title: raw.title.unwrap_or_else(|| "Untitled".to_string()),
        source_name: raw.source_name.unwrap_or_else(|| "Unknown".to_string()),
        source_url: raw.source_url.unwrap_or_default(),
        published: raw.published_datetime_utc.unwrap_or_default(),
        summary: raw.snippet.unwrap_or_default(),
        image,
        link: raw.link.unwrap_or_default(),
        author,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn normalize(value: Value) -> Article {
        normalize_article(serde_json::from_value(value).expect("raw article decodes"))
    }

    #[test]
    fn empty_record_gets_every_default() {
        let rendered = serde_json::to_value(normalize(json!({}))).unwrap();
        assert_eq!(
            rendered,
            json!({
                "id": "",
                "title": "Untitled",
                "source_name": "Unknown",
                "source_url": "",
                "published": "",
                "summary": "",
                "image": "",
                "link": "",
                "author": ""
            })
        );
    }

    #[test]
    fn image_prefers_photo_then_thumbnail() {
        let photo = normalize(json!({ "photo_url": "p.jpg", "thumbnail_url": "t.jpg" }));
        assert_eq!(photo.image, "p.jpg");

        let thumbnail = normalize(json!({ "photo_url": "", "thumbnail_url": "t.jpg" }));
        assert_eq!(thumbnail.image, "t.jpg");

        let null_photo = normalize(json!({ "photo_url": null, "thumbnail_url": "t.jpg" }));
        assert_eq!(null_photo.image, "t.jpg");

        let neither = normalize(json!({ "title": "No pictures" }));
        assert_eq!(neither.image, "");
    }

    #[test]
    fn author_is_first_listed_author() {
        let article = normalize(json!({ "authors": ["Ada Lovelace", "Grace Hopper"] }));
        assert_eq!(article.author, "Ada Lovelace");

        let empty = normalize(json!({ "authors": [] }));
        assert_eq!(empty.author, "");
    }

    #[test]
    fn maps_provider_fields_onto_canonical_names() {
        let article = normalize(json!({
            "article_id": "a-1",
            "title": "Rust 2.0?",
            "source_name": "The Register",
            "source_url": "https://theregister.example",
            "published_datetime_utc": "2025-03-01T10:00:00.000Z",
            "snippet": "Not yet.",
            "link": "https://theregister.example/rust"
        }));

        assert_eq!(article.id, "a-1");
        assert_eq!(article.source_name, "The Register");
        assert_eq!(article.published, "2025-03-01T10:00:00.000Z");
        assert_eq!(article.summary, "Not yet.");
        assert_eq!(article.link, "https://theregister.example/rust");
    }
}
