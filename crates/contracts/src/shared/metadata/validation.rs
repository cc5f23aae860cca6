//! Validation rules for metadata fields

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    pub custom_error: Option<&'static str>,
}

/// Compiled patterns, keyed by their static source
static PATTERN_CACHE: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn pattern_matches(pattern: &'static str, value: &str) -> bool {
    let mut cache = match PATTERN_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(re) = cache.get(pattern) {
        return re.is_match(value);
    }
    match Regex::new(pattern) {
        Ok(re) => {
            let matched = re.is_match(value);
            cache.insert(pattern, re);
            matched
        }
        // Invalid pattern silently passes
        Err(_) => true,
    }
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            custom_error: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn max_length(self, max: usize) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    pub const fn min_length(self, min: usize) -> Self {
        Self {
            min_length: Some(min),
            ..self
        }
    }

    /// Regex format with the message shown on mismatch
    pub const fn pattern(self, pattern: &'static str, message: &'static str) -> Self {
        Self {
            pattern: Some(pattern),
            custom_error: Some(message),
            ..self
        }
    }

    pub const fn range(self, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..self
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules.
    ///
    /// An empty value of an optional field is accepted without further checks.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(());
        }

        let length = value.chars().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Err(format!(
                    "{} must be at least {} characters",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(format!(
                    "{} must not exceed {} characters",
                    field_label, max
                ));
            }
        }

        if let Some(pattern) = self.pattern {
            if !pattern_matches(pattern, value) {
                return Err(self
                    .custom_error
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} has an invalid format", field_label)));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: Option<f64>, field_label: &str) -> Result<(), String> {
        let Some(value) = value else {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(());
        };

        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} must be at most {}", field_label, max));
            }
        }

        Ok(())
    }

    /// Validate a foreign-key reference; ids are positive
    pub fn validate_reference(&self, value: Option<i64>, field_label: &str) -> Result<(), String> {
        match value {
            Some(id) if id > 0 => Ok(()),
            _ if self.required => Err(format!("{} is required", field_label)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let rules = ValidationRules::required();
        assert_eq!(
            rules.validate_string("   ", "Bank Name"),
            Err("Bank Name is required".to_string())
        );
        assert!(rules.validate_string("Test Bank", "Bank Name").is_ok());
    }

    #[test]
    fn test_optional_empty_skips_format_checks() {
        let rules = ValidationRules::none()
            .min_length(6)
            .pattern(r"^\d{6}$", "Pincode must be 6 digits");
        assert!(rules.validate_string("", "Pincode").is_ok());
        assert_eq!(
            rules.validate_string("12a456", "Pincode"),
            Err("Pincode must be 6 digits".to_string())
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = ValidationRules::required().max_length(3);
        assert!(rules.validate_string("äöü", "Code").is_ok());
        assert_eq!(
            rules.validate_string("abcd", "Code"),
            Err("Code must not exceed 3 characters".to_string())
        );
    }

    #[test]
    fn test_numeric_range() {
        let rules = ValidationRules::required().range(1.0, 10.0);
        assert!(rules.validate_number(Some(5.0), "Padding").is_ok());
        assert_eq!(
            rules.validate_number(Some(11.0), "Padding"),
            Err("Padding must be at most 10".to_string())
        );
        assert_eq!(
            rules.validate_number(None, "Padding"),
            Err("Padding is required".to_string())
        );
    }

    #[test]
    fn test_reference_requires_positive_id() {
        let rules = ValidationRules::required();
        assert!(rules.validate_reference(Some(3), "State").is_ok());
        assert!(rules.validate_reference(Some(0), "State").is_err());
        assert!(ValidationRules::none().validate_reference(None, "Vendor").is_ok());
    }

    #[test]
    fn test_invalid_pattern_passes() {
        let rules = ValidationRules::none().pattern("([", "never shown");
        assert!(rules.validate_string("anything", "Field").is_ok());
    }
}
