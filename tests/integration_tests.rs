//! Integration tests for the career matcher

use career_matcher::advice::{advice_or_fallback, RuleBasedAdvisor, ADVICE_FALLBACK};
use career_matcher::config::OutputFormat;
use career_matcher::error::CareerMatcherError;
use career_matcher::input::text_extractor::{PdfExtractor, TextExtractor};
use career_matcher::input::InputManager;
use career_matcher::matching::{HashingEmbedder, JobCatalog, JobListing, JobMatcher, DEFAULT_TOP_N};
use career_matcher::output::{MatchReport, ReportGenerator};
use career_matcher::processing::{ManualProfile, ProfileText, ResumeParser};
use career_matcher::service::CareerService;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_matcher() -> JobMatcher {
    let catalog = JobCatalog::load(&fixture("jobs.csv")).unwrap();
    JobMatcher::new(catalog, Arc::new(HashingEmbedder::default())).unwrap()
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[test]
fn test_parse_plain_text_resume() {
    let record = ResumeParser::default()
        .parse(&fixture("sample_resume.txt"))
        .unwrap();

    assert_eq!(record.name, "Jane Smith");
    assert_eq!(record.email, "jane.smith@example.com");
    assert_eq!(record.phone, "(555) 123-4567");
    assert_eq!(
        record.skills,
        vec!["Aws", "Docker", "Kubernetes", "Postgresql", "Python", "Rust", "Sql"]
    );
    assert!(record.experience.starts_with("Senior Software Engineer at Acme Cloud"));
    assert_eq!(record.education, "BSc Computer Science, State University");
    assert_eq!(record.source_file, "sample_resume.txt");
}

#[test]
fn test_parse_docx_resume() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    write_docx(
        &path,
        &[
            "John Doe",
            "john.doe@example.com",
            "SKILLS: Python, SQL &amp; Tableau",
            "",
            "EDUCATION: MSc Statistics",
        ],
    );

    let record = ResumeParser::default().parse(&path).unwrap();

    assert_eq!(record.name, "John Doe");
    assert_eq!(record.email, "john.doe@example.com");
    assert_eq!(record.skills, vec!["Python", "Sql", "Tableau"]);
    assert_eq!(record.education, "MSc Statistics");
}

#[test]
fn test_empty_file_is_rejected() {
    let err = ResumeParser::default()
        .parse(&fixture("empty.txt"))
        .unwrap_err();

    assert!(matches!(err, CareerMatcherError::EmptyInput(_)));
    assert!(err.to_string().starts_with("Empty file or no text could be extracted"));
}

#[test]
fn test_parse_pdf_resume_pages_are_separate_lines() {
    let path = fixture("two_page_resume.pdf");

    let text = PdfExtractor.extract(&path).unwrap();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    assert_eq!(lines, vec!["Jane Smith", "SKILLS: Rust"]);

    let record = ResumeParser::default().parse(&path).unwrap();
    assert_eq!(record.name, "Jane Smith");
    assert_eq!(record.skills, vec!["Rust"]);
    assert_eq!(record.source_file, "two_page_resume.pdf");
}

#[test]
fn test_corrupt_pdf_falls_back_to_plain_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, "Jane Smith\nSKILLS: Rust").unwrap();

    let text = InputManager::new().extract_text(&path);
    assert!(text.contains("Jane Smith"));

    let record = ResumeParser::default().parse(&path).unwrap();
    assert_eq!(record.skills, vec!["Rust"]);
}

#[test]
fn test_name_fallbacks() {
    let parser = ResumeParser::default();

    let named = parser.parse_text("Jane Smith\nSoftware Engineer", "a.txt").unwrap();
    assert_eq!(named.name, "Jane Smith");

    let unnamed = parser.parse_text("no capitalized words here 42", "b.txt").unwrap();
    assert_eq!(unnamed.name, "Unknown");
}

#[test]
fn test_skill_extraction_is_idempotent() {
    let parser = ResumeParser::default();
    let text = std::fs::read_to_string(fixture("sample_resume.txt")).unwrap();

    let first = parser.parse_text(&text, "a.txt").unwrap();
    let second = parser.parse_text(&text, "a.txt").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_match_ranks_by_shared_vocabulary() {
    let matcher = fixture_matcher();
    let record = ResumeParser::default()
        .parse(&fixture("sample_resume.txt"))
        .unwrap();

    let matches = matcher.match_profile(&record.profile_text(), DEFAULT_TOP_N);

    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0].title, "Rust Backend Engineer");
    assert_eq!(matches[0].link, "https://jobs.example.com/1");
    for pair in matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
}

#[test]
fn test_data_profile_prefers_data_analyst() {
    let catalog = JobCatalog::from_listings(vec![
        JobListing::new("Software Developer", "Tech Co", "Remote", "#"),
        JobListing::new("Data Analyst", "Data Corp", "NY", "#"),
    ]);
    let matcher = JobMatcher::new(catalog, Arc::new(HashingEmbedder::default())).unwrap();
    let profile = ManualProfile::from_form("python, sql", "2 years data analysis", "");

    let matches = matcher.match_profile(&profile.profile_text(), 5);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].title, "Data Analyst");
    assert!(matches[0].match_score > matches[1].match_score);
}

#[test]
fn test_matching_is_repeatable() {
    let matcher = fixture_matcher();
    let profile = ManualProfile::from_form("rust, kubernetes", "platform work", "");

    let first = matcher.match_profile(&profile.profile_text(), 3);
    let second = matcher.match_profile(&profile.profile_text(), 3);

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn test_catalog_missing_column_is_fatal() {
    let err = JobCatalog::load(&fixture("bad_jobs.csv")).unwrap_err();
    assert!(matches!(err, CareerMatcherError::CatalogLoad(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_service_end_to_end() {
    let service = CareerService::new(
        ResumeParser::default(),
        Arc::new(fixture_matcher()),
        Box::new(RuleBasedAdvisor),
    );

    let recommendation = service
        .recommend_for_file(&fixture("sample_resume.txt"), 2)
        .unwrap();

    assert_eq!(recommendation.matches.len(), 2);
    let advice = recommendation.advice.clone().unwrap();
    assert!(advice.contains("Data Scientist / ML Engineer"));
    assert_ne!(advice, ADVICE_FALLBACK);

    let report = MatchReport::from_recommendation(recommendation, "hashing", 4, 2, 1);
    let json = ReportGenerator::with_options(false, false, true, true, true)
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["candidate"]["name"], "Jane Smith");
    assert_eq!(value["matches"].as_array().unwrap().len(), 2);
}

#[test]
fn test_upload_is_parsed_and_cleaned_up() {
    let upload_dir = TempDir::new().unwrap();
    let parser = ResumeParser::default()
        .with_input_manager(InputManager::new().with_upload_dir(upload_dir.path()));

    let record = parser
        .parse_upload("resume.txt", b"John Doe\n\nSKILLS: JavaScript, React")
        .unwrap();

    // the skills section is scanned for substrings, so `java` rides along
    assert_eq!(record.skills, vec!["Java", "Javascript", "React"]);
    assert!(advice_or_fallback(&RuleBasedAdvisor, &record).contains("Full-Stack Developer"));
    assert_eq!(std::fs::read_dir(upload_dir.path()).unwrap().count(), 0);
}
