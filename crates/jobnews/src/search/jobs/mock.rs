use super::{ApplyOption, Job, JobSearchEnvelope, SalaryValue};
use crate::search::SearchSource;

pub const MOCK_JOB_COUNT: usize = 20;

const LOCATIONS: [&str; 4] = ["Remote", "New York", "San Francisco", "London"];

fn mock_job(index: usize, query: &str, keyword: &str) -> Job {
    let step = 10_000 * index as u64;

    Job {
        id: format!("mock-{index}"),
        title: format!("Senior {keyword} Engineer"),
        company: format!("TechCorp {index}"),
        location: LOCATIONS[index % LOCATIONS.len()].to_string(),
        is_remote: index % 2 == 0,
        employment_type: "Full-time".to_string(),
        posted: "2 days ago".to_string(),
        posted_utc: String::new(),
        description: format!("We're looking for a talented {query} professional..."),
        salary: None,
        min_salary: Some(SalaryValue::Amount((100_000 + step).into())),
        max_salary: Some(SalaryValue::Amount((150_000 + step).into())),
        salary_period: "YEAR".to_string(),
        apply_link: "https://example.com/apply".to_string(),
        apply_options: vec![
            ApplyOption {
                publisher: "LinkedIn".to_string(),
                link: "https://linkedin.com".to_string(),
                is_direct: false,
            },
            ApplyOption {
                publisher: "Company Site".to_string(),
                link: "https://company.com".to_string(),
                is_direct: true,
            },
        ],
        qualifications: strings(&["Bachelor's degree", "5+ years experience", "Problem solving"]),
        responsibilities: strings(&["Design systems", "Lead team", "Code reviews"]),
        benefits: strings(&["Health insurance", "401k", "Remote work"]),
        company_logo: String::new(),
        company_website: "https://example.com".to_string(),
        google_link: String::new(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Twenty synthetic listings for `query`; `page` is only echoed back.
pub fn generate_mock_jobs(query: &str, page: u32) -> JobSearchEnvelope {
    let keyword = query.split_whitespace().next().unwrap_or("Software");
    let results: Vec<Job> = (1..=MOCK_JOB_COUNT)
        .map(|index| mock_job(index, query, keyword))
        .collect();

    JobSearchEnvelope {
        source: SearchSource::Mock,
        query: query.to_string(),
        page,
        total: results.len(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_twenty_results_regardless_of_page() {
        for page in [1, 2, 50] {
            let envelope = generate_mock_jobs("rust developer", page);
            assert_eq!(envelope.source, SearchSource::Mock);
            assert_eq!(envelope.results.len(), 20);
            assert_eq!(envelope.total, 20);
            assert_eq!(envelope.page, page);
        }
    }

    #[test]
    fn title_uses_first_query_token() {
        let envelope = generate_mock_jobs("python backend", 1);
        assert!(envelope
            .results
            .iter()
            .all(|job| job.title == "Senior python Engineer"));
        assert_eq!(
            envelope.results[0].description,
            "We're looking for a talented python backend professional..."
        );

        let blank = generate_mock_jobs("   ", 1);
        assert_eq!(blank.results[0].title, "Senior Software Engineer");
    }

    #[test]
    fn salaries_and_locations_follow_the_index() {
        let envelope = generate_mock_jobs("go", 1);
        let first = &envelope.results[0];
        assert_eq!(first.id, "mock-1");
        assert_eq!(first.location, "New York");
        assert!(!first.is_remote);
        assert_eq!(serde_json::to_value(&first.min_salary).unwrap(), 110_000);
        assert_eq!(serde_json::to_value(&first.max_salary).unwrap(), 160_000);
        assert!(first.salary.is_none());

        let fourth = &envelope.results[3];
        assert_eq!(fourth.location, "Remote");
        assert!(fourth.is_remote);
    }

    #[test]
    fn output_is_deterministic() {
        let first = serde_json::to_vec(&generate_mock_jobs("data", 3)).unwrap();
        let second = serde_json::to_vec(&generate_mock_jobs("data", 3)).unwrap();
        assert_eq!(first, second);
    }
}
