//! Resume text processing and field extraction

pub mod text_processor;
pub mod patterns;
pub mod taxonomy;
pub mod sections;
pub mod candidate;
pub mod field_extractor;
pub mod resume_parser;

pub use candidate::{build_profile_text, CandidateRecord, ManualProfile, ProfileText};
pub use resume_parser::ResumeParser;
