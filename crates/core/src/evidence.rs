//! Photo and geotag evidence checks for inspection checklists.

use crate::error::CoreError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Validate a single coordinate pair.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "Latitude {latitude} is out of range ({MIN_LATITUDE}..{MAX_LATITUDE})"
        )));
    }
    if !longitude.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "Longitude {longitude} is out of range ({MIN_LONGITUDE}..{MAX_LONGITUDE})"
        )));
    }
    Ok(())
}

/// Photos may omit a geotag entirely, but never carry only half of one.
pub fn validate_optional_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(), CoreError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => validate_coordinates(lat, lon),
        _ => Err(CoreError::Validation(
            "Latitude and longitude must be provided together".to_string(),
        )),
    }
}

/// Validate the `photogeotag_data` attached to a checklist response.
///
/// Must be a JSON object with numeric `latitude` and `longitude`; other keys
/// (photo URL, accuracy, capture time) are passed through untouched.
pub fn validate_photogeotag(data: &serde_json::Value) -> Result<(), CoreError> {
    let obj = data.as_object().ok_or_else(|| {
        CoreError::Validation("photogeotag_data must be a JSON object".to_string())
    })?;
    let coord = |key: &str| {
        obj.get(key).and_then(|v| v.as_f64()).ok_or_else(|| {
            CoreError::Validation(format!("photogeotag_data.{key} must be a number"))
        })
    };
    validate_coordinates(coord("latitude")?, coord("longitude")?)
}
