//! Structured course identifiers.
//!
//! Two spellings are accepted and round-trip through `Display` unchanged:
//! - `course-v1:{org}+{course}+{run}`
//! - `{org}/{course}/{run}` (legacy)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const V1_PREFIX: &str = "course-v1:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Notation {
    V1,
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
    notation: Notation,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseKeyError {
    #[error("course key must have exactly three parts")]
    WrongPartCount,
    #[error("course key part '{0}' is empty")]
    EmptyPart(&'static str),
    #[error("course key part '{0}' contains invalid characters")]
    InvalidChars(&'static str),
}

impl CourseKey {
    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn run(&self) -> &str {
        &self.run
    }

    fn from_parts(parts: &[&str], notation: Notation) -> Result<Self, CourseKeyError> {
        let [org, course, run] = parts else {
            return Err(CourseKeyError::WrongPartCount);
        };

        for (name, value) in [("org", org), ("course", course), ("run", run)] {
            validate_part(name, value)?;
        }

        Ok(Self {
            org: org.to_string(),
            course: course.to_string(),
            run: run.to_string(),
            notation,
        })
    }
}

fn validate_part(name: &'static str, value: &str) -> Result<(), CourseKeyError> {
    if value.is_empty() {
        return Err(CourseKeyError::EmptyPart(name));
    }
    let ok = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '~' | '-'));
    if !ok {
        return Err(CourseKeyError::InvalidChars(name));
    }
    Ok(())
}

impl FromStr for CourseKey {
    type Err = CourseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix(V1_PREFIX) {
            let parts: Vec<&str> = rest.split('+').collect();
            Self::from_parts(&parts, Notation::V1)
        } else {
            let parts: Vec<&str> = s.split('/').collect();
            Self::from_parts(&parts, Notation::Legacy)
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation {
            Notation::V1 => write!(f, "{}{}+{}+{}", V1_PREFIX, self.org, self.course, self.run),
            Notation::Legacy => write!(f, "{}/{}/{}", self.org, self.course, self.run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v1_keys() {
        let key: CourseKey = "course-v1:edx+verified+2024_T1".parse().unwrap();
        assert_eq!(key.org(), "edx");
        assert_eq!(key.course(), "verified");
        assert_eq!(key.run(), "2024_T1");
        assert_eq!(key.to_string(), "course-v1:edx+verified+2024_T1");
    }

    #[test]
    fn parses_legacy_keys() {
        let key: CourseKey = "MITx/6.002x/2012_Fall".parse().unwrap();
        assert_eq!(key.org(), "MITx");
        assert_eq!(key.to_string(), "MITx/6.002x/2012_Fall");
    }

    #[test]
    fn rejects_malformed_keys() {
        assert_eq!(
            "course-v1:edx+verified".parse::<CourseKey>(),
            Err(CourseKeyError::WrongPartCount)
        );
        assert_eq!(
            "course-v1:edx++run".parse::<CourseKey>(),
            Err(CourseKeyError::EmptyPart("course"))
        );
        assert_eq!(
            "edx/ver ified/run".parse::<CourseKey>(),
            Err(CourseKeyError::InvalidChars("course"))
        );
        assert!("not-a-course".parse::<CourseKey>().is_err());
    }
}
