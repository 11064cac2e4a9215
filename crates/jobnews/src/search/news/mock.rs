use super::{Article, NewsSearchEnvelope};
use crate::search::SearchSource;

const SOURCES: [&str; 4] = ["TechNews", "BusinessDaily", "NewsHub", "MediaCorp"];

/// Exactly `limit` synthetic articles about `query`.
pub fn generate_mock_news(query: &str, limit: u32) -> NewsSearchEnvelope {
    let articles = (1..=limit as usize)
        .map(|index| Article {
            id: format!("mock-{index}"),
            title: format!("Latest news about {query} - Article {index}"),
            source_name: SOURCES[index % SOURCES.len()].to_string(),
            source_url: format!("https://news.example{index}.com"),
            published: "2 hours ago".to_string(),
            summary: format!(
                "Breaking news regarding {query}: Companies are advancing their initiatives..."
            ),
            image: String::new(),
            link: format!("https://example.com/article/{index}"),
            author: "News Team".to_string(),
        })
        .collect();

    NewsSearchEnvelope {
        error: None,
        source: Some(SearchSource::Mock),
        query: Some(query.to_string()),
        news_available: true,
        articles,
    }
}
