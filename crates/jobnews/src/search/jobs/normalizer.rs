use super::{ApplyOption, Job, SalaryValue};
use crate::search::lenient;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

pub const QUALIFICATIONS: &str = "Qualifications";
pub const RESPONSIBILITIES: &str = "Responsibilities";
pub const BENEFITS: &str = "Benefits";

/// One job record as the provider sends it. Every field is optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawJob {
    #[serde(default, deserialize_with = "lenient::value")]
    job_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    employer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_is_remote: Option<bool>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_employment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_posted_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_posted_at_datetime_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_salary: Option<SalaryValue>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_min_salary: Option<SalaryValue>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_max_salary: Option<SalaryValue>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_salary_period: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_apply_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    apply_options: Option<Vec<RawApplyOption>>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_highlights: Option<HashMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient::value")]
    employer_logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    employer_website: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    job_google_link: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
struct RawApplyOption {
    #[serde(default, deserialize_with = "lenient::value")]
    publisher: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    apply_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    is_direct: Option<bool>,
}

impl RawJob {
    /// Strings listed under `section` in `job_highlights`, empty when either is missing.
    fn highlight(&self, section: &str) -> Vec<String> {
        self.job_highlights
            .as_ref()
            .and_then(|highlights| highlights.get(section))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn or(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_string())
}

fn salary_or_unspecified(value: Option<SalaryValue>) -> Option<SalaryValue> {
    Some(value.unwrap_or_else(SalaryValue::not_specified))
}

pub fn normalize_job(raw: RawJob) -> Job {
    let qualifications = raw.highlight(QUALIFICATIONS);
    let responsibilities = raw.highlight(RESPONSIBILITIES);
    let benefits = raw.highlight(BENEFITS);

    let apply_options = raw
        .apply_options
        .unwrap_or_default()
        .into_iter()
        .map(|option| ApplyOption {
            publisher: option.publisher.unwrap_or_default(),
            link: option.apply_link.unwrap_or_default(),
            is_direct: option.is_direct.unwrap_or(false),
        })
        .collect();

    Job {
        id: raw.job_id.unwrap_or_default(),
        title: or(raw.job_title, "Untitled"),
        company: or(raw.employer_name, "Unknown"),
        location: or(raw.job_location, "Not specified"),
        is_remote: raw.job_is_remote.unwrap_or(false),
        employment_type: or(raw.job_employment_type, "Full-time"),
        posted: or(raw.job_posted_at, "Recently"),
        posted_utc: raw.job_posted_at_datetime_utc.unwrap_or_default(),
        description: or(raw.job_description, "No description"),
        salary: salary_or_unspecified(raw.job_salary),
        min_salary: salary_or_unspecified(raw.job_min_salary),
        max_salary: salary_or_unspecified(raw.job_max_salary),
        salary_period: or(raw.job_salary_period, "YEAR"),
        apply_link: raw.job_apply_link.unwrap_or_default(),
        apply_options,
        qualifications,
        responsibilities,
        benefits,
        company_logo: raw.employer_logo.unwrap_or_default(),
        company_website: raw.employer_website.unwrap_or_default(),
        google_link: raw.job_google_link.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Job {
        normalize_job(serde_json::from_value(value).expect("raw job decodes"))
    }

    #[test]
    fn empty_record_gets_every_default() {
        let job = normalize(json!({}));
        let rendered = serde_json::to_value(&job).expect("job serializes");

        assert_eq!(
            rendered,
            json!({
                "id": "",
                "title": "Untitled",
                "company": "Unknown",
                "location": "Not specified",
                "is_remote": false,
                "employment_type": "Full-time",
                "posted": "Recently",
                "posted_utc": "",
                "description": "No description",
                "salary": "Not specified",
                "min_salary": "Not specified",
                "max_salary": "Not specified",
                "salary_period": "YEAR",
                "apply_link": "",
                "apply_options": [],
                "qualifications": [],
                "responsibilities": [],
                "benefits": [],
                "company_logo": "",
                "company_website": "",
                "google_link": ""
            })
        );
    }

    #[test]
    fn maps_provider_fields_onto_canonical_names() {
        let job = normalize(json!({
            "job_id": "abc123",
            "job_title": "Rust Engineer",
            "employer_name": "Ferris Inc",
            "job_location": "Berlin",
            "job_is_remote": true,
            "job_employment_type": "Contractor",
            "job_posted_at": "3 days ago",
            "job_posted_at_datetime_utc": "2025-01-02T03:04:05.000Z",
            "job_description": "Write Rust.",
            "job_min_salary": 90000,
            "job_max_salary": 120000.5,
            "job_salary_period": "HOUR",
            "job_apply_link": "https://ferris.example/apply",
            "employer_logo": "https://ferris.example/logo.png",
            "employer_website": "https://ferris.example",
            "job_google_link": "https://google.example/job"
        }));

        assert_eq!(job.id, "abc123");
        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.company, "Ferris Inc");
        assert!(job.is_remote);
        assert_eq!(job.employment_type, "Contractor");
        assert_eq!(job.posted_utc, "2025-01-02T03:04:05.000Z");
        assert_eq!(job.salary, Some(SalaryValue::not_specified()));
        assert_eq!(serde_json::to_value(&job.min_salary).unwrap(), json!(90000));
        assert_eq!(serde_json::to_value(&job.max_salary).unwrap(), json!(120000.5));
        assert_eq!(job.salary_period, "HOUR");
        assert_eq!(job.company_website, "https://ferris.example");
    }

    #[test]
    fn apply_options_keep_order_and_default_missing_parts() {
        let job = normalize(json!({
            "apply_options": [
                { "publisher": "LinkedIn", "apply_link": "https://linkedin.example", "is_direct": false },
                { "apply_link": "https://direct.example", "is_direct": true },
                { "publisher": "Indeed" }
            ]
        }));

        assert_eq!(
            job.apply_options,
            vec![
                ApplyOption {
                    publisher: "LinkedIn".to_string(),
                    link: "https://linkedin.example".to_string(),
                    is_direct: false,
                },
                ApplyOption {
                    publisher: String::new(),
                    link: "https://direct.example".to_string(),
                    is_direct: true,
                },
                ApplyOption {
                    publisher: "Indeed".to_string(),
                    link: String::new(),
                    is_direct: false,
                },
            ]
        );
    }

    #[test]
    fn highlights_are_read_per_section() {
        let job = normalize(json!({
            "job_highlights": {
                "Qualifications": ["Rust", "Tokio"],
                "Benefits": ["Remote"]
            }
        }));

        assert_eq!(job.qualifications, vec!["Rust", "Tokio"]);
        assert!(job.responsibilities.is_empty());
        assert_eq!(job.benefits, vec!["Remote"]);
    }

    #[test]
    fn null_and_mistyped_fields_fall_back_to_defaults() {
        let job = normalize(json!({
            "job_title": null,
            "employer_name": 7,
            "job_is_remote": "yes",
            "job_min_salary": null,
            "job_highlights": "none"
        }));

        assert_eq!(job.title, "Untitled");
        assert_eq!(job.company, "Unknown");
        assert!(!job.is_remote);
        assert_eq!(job.min_salary, Some(SalaryValue::not_specified()));
        assert!(job.qualifications.is_empty());
    }
}
