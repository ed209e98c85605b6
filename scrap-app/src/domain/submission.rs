use super::ScrapType;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_SELLER_NAME_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 200;
/// Upper bound on a single quote request, in kilograms.
pub const MAX_QUANTITY_KG: f64 = 1_000_000.0;

/// Scrap sale details as entered by the seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapSubmission {
    pub seller_name: String,
    pub scrap_type: ScrapType,
    /// Kilograms.
    pub quantity: f64,
    pub location: String,
}

impl Default for ScrapSubmission {
    fn default() -> Self {
        Self {
            seller_name: String::new(),
            scrap_type: ScrapType::Paper,
            quantity: 0.0,
            location: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScrapField {
    SellerName,
    ScrapType,
    Quantity,
    Location,
}

impl ScrapField {
    pub const ALL: [ScrapField; 4] = [
        Self::SellerName,
        Self::ScrapType,
        Self::Quantity,
        Self::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SellerName => "sellerName",
            Self::ScrapType => "scrapType",
            Self::Quantity => "quantity",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for ScrapField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ScrapField,
    pub message: String,
}

impl FieldError {
    fn new(field: ScrapField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ScrapSubmission {
    pub fn new(
        seller_name: impl Into<String>,
        scrap_type: ScrapType,
        quantity: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            seller_name: seller_name.into(),
            scrap_type,
            quantity,
            location: location.into(),
        }
    }

    /// Checks every field, reporting at most one error per field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = ScrapField::ALL
            .iter()
            .filter_map(|field| self.validate_field(*field))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn validate_field(&self, field: ScrapField) -> Option<FieldError> {
        match field {
            ScrapField::SellerName => {
                required_text(field, &self.seller_name, "Seller name", MAX_SELLER_NAME_LEN)
            }
            // The enum cannot hold anything outside the allowed set.
            ScrapField::ScrapType => None,
            ScrapField::Quantity => {
                if !self.quantity.is_finite() {
                    Some(FieldError::new(field, "Quantity must be a number"))
                } else if self.quantity < 0.0 {
                    Some(FieldError::new(field, "Quantity cannot be negative"))
                } else if self.quantity > MAX_QUANTITY_KG {
                    Some(FieldError::new(
                        field,
                        format!("Quantity must be at most {MAX_QUANTITY_KG} kg"),
                    ))
                } else {
                    None
                }
            }
            ScrapField::Location => {
                required_text(field, &self.location, "Location", MAX_LOCATION_LEN)
            }
        }
    }
}

fn required_text(field: ScrapField, value: &str, label: &str, max_len: usize) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, format!("{label} is required")))
    } else if value.chars().count() > max_len {
        Some(FieldError::new(
            field,
            format!("{label} must be at most {max_len} characters"),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ScrapSubmission {
        ScrapSubmission::new("John Doe", ScrapType::Metal, 12.5, "NY")
    }

    fn fields(errors: &[FieldError]) -> Vec<ScrapField> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_submission() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_is_allowed() {
        let submission = ScrapSubmission {
            quantity: 0.0,
            ..valid()
        };
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_default_draft_reports_required_fields() {
        let errors = ScrapSubmission::default().validate().unwrap_err();
        assert_eq!(fields(&errors), vec![ScrapField::SellerName, ScrapField::Location]);
        assert_eq!(errors[0].message, "Seller name is required");
    }

    #[test]
    fn test_whitespace_only_text_is_missing() {
        let submission = ScrapSubmission {
            seller_name: "   ".to_string(),
            location: "\t".to_string(),
            ..valid()
        };
        let errors = submission.validate().unwrap_err();
        assert_eq!(fields(&errors), vec![ScrapField::SellerName, ScrapField::Location]);
    }

    #[test]
    fn test_each_missing_field_is_reported_alone() {
        let no_name = ScrapSubmission {
            seller_name: String::new(),
            ..valid()
        };
        assert_eq!(fields(&no_name.validate().unwrap_err()), vec![ScrapField::SellerName]);

        let no_location = ScrapSubmission {
            location: String::new(),
            ..valid()
        };
        assert_eq!(fields(&no_location.validate().unwrap_err()), vec![ScrapField::Location]);
    }

    #[test]
    fn test_bad_quantities() {
        for quantity in [-1.0, f64::NAN, f64::INFINITY] {
            let submission = ScrapSubmission {
                quantity,
                ..valid()
            };
            assert_eq!(
                fields(&submission.validate().unwrap_err()),
                vec![ScrapField::Quantity]
            );
        }
    }

    #[test]
    fn test_quantity_upper_bound() {
        let at_limit = ScrapSubmission {
            quantity: MAX_QUANTITY_KG,
            ..valid()
        };
        assert!(at_limit.validate().is_ok());

        let huge = ScrapSubmission {
            quantity: 1e308,
            ..valid()
        };
        let errors = huge.validate().unwrap_err();
        assert_eq!(fields(&errors), vec![ScrapField::Quantity]);
        assert_eq!(errors[0].message, "Quantity must be at most 1000000 kg");
    }

    #[test]
    fn test_overlong_text() {
        let submission = ScrapSubmission {
            location: "x".repeat(MAX_LOCATION_LEN + 1),
            ..valid()
        };
        let errors = submission.validate().unwrap_err();
        assert_eq!(errors[0].message, "Location must be at most 200 characters");
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(valid()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sellerName": "John Doe",
                "scrapType": "metal",
                "quantity": 12.5,
                "location": "NY"
            })
        );
    }
}
