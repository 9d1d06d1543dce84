//! Order addon reference data.

use crate::ids::AddonId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a customer supplies the value for an addon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddonInput {
    /// Free text.
    #[default]
    Text,
    /// Numeric input.
    Number,
    /// One of the listed options, radio-style.
    Radio,
    /// One of the listed options, dropdown-style.
    Select,
    /// An uploaded image path.
    Image,
}

impl AddonInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddonInput::Text => "text",
            AddonInput::Number => "number",
            AddonInput::Radio => "radio",
            AddonInput::Select => "select",
            AddonInput::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(AddonInput::Text),
            "number" => Some(AddonInput::Number),
            "radio" => Some(AddonInput::Radio),
            "select" => Some(AddonInput::Select),
            "image" => Some(AddonInput::Image),
            _ => None,
        }
    }

    /// Whether the addon value is an uploaded file path.
    pub fn is_upload(&self) -> bool {
        *self == AddonInput::Image
    }
}

/// A priced extra attached to orders by reference.
///
/// Immutable reference data; the order stores the addon id plus the
/// customer-supplied value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    /// Unique addon identifier.
    pub id: AddonId,
    /// Display title.
    pub title: String,
    /// Price added to the order total.
    pub price: Money,
    /// Input style presented to the customer.
    pub input_type: AddonInput,
    /// Selectable options for radio/select addons.
    pub options: Vec<String>,
}

impl Addon {
    /// Create a new addon.
    pub fn new(title: impl Into<String>, price: Money, input_type: AddonInput) -> Self {
        Self {
            id: AddonId::generate(),
            title: title.into(),
            price,
            input_type,
            options: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_input_type_round_trip() {
        for input in [
            AddonInput::Text,
            AddonInput::Number,
            AddonInput::Radio,
            AddonInput::Select,
            AddonInput::Image,
        ] {
            assert_eq!(AddonInput::from_str(input.as_str()), Some(input));
        }
        assert_eq!(AddonInput::from_str("checkbox"), None);
    }

    #[test]
    fn test_image_addon_is_upload() {
        let addon = Addon::new(
            "Engraved QR",
            Money::from_decimal(2.0, Currency::JOD),
            AddonInput::Image,
        );
        assert!(addon.input_type.is_upload());
    }
}
