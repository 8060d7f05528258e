//! Homework status codes and their notification texts

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::WatcherError;

/// Review verdict reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Fixed human-readable text for the verdict
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for Verdict {
    type Err = WatcherError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(WatcherError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Approved => write!(f, "approved"),
            Verdict::Reviewing => write!(f, "reviewing"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}

/// Build the notification text for one homework
pub fn parse_status(homework: &Value) -> crate::Result<String> {
    if !homework.is_object() {
        return Err(WatcherError::MalformedResponse(
            "homework entry is not a JSON object".to_string(),
        ));
    }

    let name = text_field(homework, "homework_name")?;
    let verdict: Verdict = text_field(homework, "status")?.parse()?;

    Ok(format!(
        "Status changed for work \"{}\". {}",
        name,
        verdict.text()
    ))
}

fn text_field<'a>(homework: &'a Value, field: &str) -> crate::Result<&'a str> {
    homework
        .get(field)
        .ok_or_else(|| WatcherError::MissingField(field.to_string()))?
        .as_str()
        .ok_or_else(|| WatcherError::WrongType {
            field: field.to_string(),
            expected: "string",
        })
}
