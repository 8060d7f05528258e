//! Shape checks for review service responses and homework selection

use serde_json::Value;

use crate::config::SelectionPolicy;
use crate::WatcherError;

/// A response that passed validation
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Server time to use as `from_date` on the next fetch
    pub current_date: i64,
    pub homeworks: &'a [Value],
}

/// Verify the structure of a response before anything reads from it.
///
/// The response must be an object with an integer `current_date` and a
/// `homeworks` array. The array is returned untouched, possibly empty.
pub fn check_response(response: &Value) -> crate::Result<Snapshot<'_>> {
    let object = response.as_object().ok_or_else(|| {
        WatcherError::MalformedResponse("response is not a JSON object".to_string())
    })?;

    let (current_date, homeworks) = match (object.get("current_date"), object.get("homeworks")) {
        (Some(current_date), Some(homeworks)) => (current_date, homeworks),
        (None, _) => return Err(WatcherError::MissingField("current_date".to_string())),
        (_, None) => return Err(WatcherError::MissingField("homeworks".to_string())),
    };

    let homeworks = homeworks.as_array().ok_or_else(|| WatcherError::WrongType {
        field: "homeworks".to_string(),
        expected: "array",
    })?;
    let current_date = current_date.as_i64().ok_or_else(|| WatcherError::WrongType {
        field: "current_date".to_string(),
        expected: "integer",
    })?;

    Ok(Snapshot {
        current_date,
        homeworks,
    })
}

/// Pick the homeworks that should be announced this cycle
pub fn select(homeworks: &[Value], policy: SelectionPolicy) -> crate::Result<Vec<&Value>> {
    match policy {
        SelectionPolicy::AllItems => Ok(homeworks.iter().collect()),
        SelectionPolicy::LatestOnly => {
            let mut latest: Option<(i64, &Value)> = None;
            for homework in homeworks {
                let id = homework_id(homework)?;
                // `>=` keeps the last of equal ids, like the tail of a stable sort
                if latest.map_or(true, |(best, _)| id >= best) {
                    latest = Some((id, homework));
                }
            }
            Ok(latest.map(|(_, homework)| homework).into_iter().collect())
        }
    }
}

fn homework_id(homework: &Value) -> crate::Result<i64> {
    let id = homework
        .get("id")
        .ok_or_else(|| WatcherError::MissingField("id".to_string()))?;
    id.as_i64().ok_or_else(|| WatcherError::WrongType {
        field: "id".to_string(),
        expected: "integer",
    })
}
