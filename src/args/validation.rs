use serde_json::Value;
use std::{fs, path::PathBuf};

use crate::error::GameError;
use crate::model::GameSnapshot;

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The snapshot file '{file}' is not readable."));
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not valid json
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    check_readable_file(file)?;
    let contents =
        fs::read_to_string(file).map_err(|e| format!("Could not read '{file}': {e}"))?;
    let json: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("The file '{file}' is not valid json: {e}"))?;
    validate_json_format(&json)?;
    Ok(json)
}

/// A snapshot is an object with at least `settings` and `players`:
/// { "settings": { "hole_count": 18, "pars": [...], "format": { "type": "nassau", ... } },
///   "players": [{ "id": "p1", "name": "...", "handicap": 10.0, "position": 0 }, ...],
///   "scores": [...], "bets": [...], "wolf_choices": [...], "round": "in_progress" }
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(object) = json.as_object() else {
        return Err("The snapshot is not in the correct format. Expected an object.".to_string());
    };
    for key in ["settings", "players"] {
        if !object.contains_key(key) {
            return Err(format!("The snapshot is missing the required key {key}."));
        }
    }
    if !object["settings"].is_object() {
        return Err(
            "The json key settings is not in the correct format. Expected an object.".to_string(),
        );
    }
    if !object["players"].is_array() {
        return Err(
            "The json key players is not in the correct format. Expected an array.".to_string(),
        );
    }
    let expected_keys = [
        "settings",
        "players",
        "scores",
        "bets",
        "wolf_choices",
        "round",
    ];
    for key in object.keys() {
        if !expected_keys.contains(&key.as_str()) {
            return Err(format!(
                "The snapshot is not in the correct format. Expected keys: {expected_keys:?}"
            ));
        }
    }
    Ok(())
}

/// Read, check and deserialize a snapshot file.
///
/// # Errors
///
/// `Config` if the file is unreadable or malformed, `Parse` if it does not
/// deserialize.
pub fn load_snapshot(file: &str) -> Result<GameSnapshot, GameError> {
    let json = check_readable_file_and_json(file).map_err(GameError::Config)?;
    Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_shape_checks() {
        let ok = json!({ "settings": {}, "players": [] });
        assert!(validate_json_format(&ok).is_ok());

        let missing = json!({ "settings": {} });
        assert!(validate_json_format(&missing).is_err());

        let extra = json!({ "settings": {}, "players": [], "event": 1 });
        assert!(validate_json_format(&extra).is_err());

        assert!(validate_json_format(&json!([])).is_err());
    }

    #[test]
    fn unreadable_file_is_rejected() {
        assert!(check_readable_file("/definitely/not/here.json").is_err());
        assert!(matches!(
            load_snapshot("/definitely/not/here.json"),
            Err(GameError::Config(_))
        ));
    }
}
