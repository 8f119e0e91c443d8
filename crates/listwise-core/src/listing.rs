//! Property input types collected from the listing forms.
//!
//! Numeric fields arrive as free-form text and stay text: validation checks
//! that they coerce, but prompts embed what the user typed (trimmed).

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// Earliest accepted construction year.
pub const MIN_YEAR_BUILT: i32 = 1800;

macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $id:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Returns all choices in form order.
            pub fn all() -> &'static [$name] {
                &[$($name::$variant,)+]
            }

            /// Returns the identifier posted by the form.
            pub fn id(&self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }

        impl FromStr for $name {
            type Err = AdapterError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_lowercase().replace('_', "-");
                if normalized.is_empty() {
                    return Err(AdapterError::required($field));
                }
                $name::all()
                    .iter()
                    .copied()
                    .find(|choice| choice.id() == normalized)
                    .ok_or_else(|| {
                        let valid: Vec<&str> = $name::all().iter().map($name::id).collect();
                        AdapterError::invalid(
                            $field,
                            format!("unknown value '{}'. Valid options: {}", value.trim(), valid.join(", ")),
                        )
                    })
            }
        }
    };
}

form_choice! {
    /// Property type offered by the description generator.
    PropertyType, "property_type" {
        House => "house";
        Apartment => "apartment";
        Condo => "condo";
        Townhouse => "townhouse";
    }
}

form_choice! {
    /// Writing tone for generated descriptions.
    Tone, "tone" {
        Professional => "professional";
        Luxury => "luxury";
        Modern => "modern";
        FamilyFriendly => "family-friendly";
    }
}

form_choice! {
    /// Property type offered by the market analysis tool.
    MarketPropertyType, "property_type" {
        SingleFamily => "single-family";
        MultiFamily => "multi-family";
        Condo => "condo";
        Townhouse => "townhouse";
        Commercial => "commercial";
    }
}

form_choice! {
    /// Physical condition of the property.
    Condition, "condition" {
        Excellent => "excellent";
        Good => "good";
        Fair => "fair";
        NeedsWork => "needs-work";
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Professional
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Good
    }
}

/// Details for the property description generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptionInput {
    pub bedrooms: String,
    pub bathrooms: String,
    pub square_feet: String,
    pub property_type: PropertyType,
    pub features: String,
    #[serde(default)]
    pub tone: Tone,
}

/// Details for the market analysis tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysisInput {
    pub address: String,
    pub property_type: MarketPropertyType,
    pub square_feet: String,
    pub year_built: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default = "default_recent_sales")]
    pub recent_sales: bool,
}

fn default_recent_sales() -> bool {
    true
}

/// An existing listing to optimize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOptimizationInput {
    pub current_listing: String,
    /// Comma-separated keywords; blank means none.
    #[serde(default)]
    pub target_keywords: String,
}

/// Validated description fields, borrowed from the input.
#[derive(Debug, Serialize)]
pub struct DescriptionFields<'a> {
    pub bedrooms: &'a str,
    pub bathrooms: &'a str,
    pub square_feet: &'a str,
    pub property_type: &'static str,
    pub features: &'a str,
    pub tone: &'static str,
}

/// Validated market analysis fields, borrowed from the input.
#[derive(Debug, Serialize)]
pub struct MarketFields<'a> {
    pub address: &'a str,
    pub property_type: &'static str,
    pub square_feet: &'a str,
    pub year_built: &'a str,
    pub condition: &'static str,
    pub recent_sales: bool,
}

/// Validated optimization fields, borrowed from the input.
#[derive(Debug, Serialize)]
pub struct OptimizationFields<'a> {
    pub current_listing: &'a str,
    pub target_keywords: Option<&'a str>,
}

impl PropertyDescriptionInput {
    /// Checks every field and returns the trimmed values.
    ///
    /// # Errors
    /// Returns a validation error naming the first offending field.
    pub fn validate(&self) -> Result<DescriptionFields<'_>, AdapterError> {
        Ok(DescriptionFields {
            bedrooms: non_negative_number("bedrooms", &self.bedrooms)?,
            bathrooms: non_negative_number("bathrooms", &self.bathrooms)?,
            square_feet: non_negative_number("square_feet", &self.square_feet)?,
            property_type: self.property_type.id(),
            features: verbatim_text("features", &self.features)?,
            tone: self.tone.id(),
        })
    }
}

impl MarketAnalysisInput {
    /// Checks every field against the current local year.
    ///
    /// # Errors
    /// Returns a validation error naming the first offending field.
    pub fn validate(&self) -> Result<MarketFields<'_>, AdapterError> {
        self.validate_as_of(chrono::Local::now().year())
    }

    /// Checks every field, bounding the year built by `current_year`.
    ///
    /// # Errors
    /// Returns a validation error naming the first offending field.
    pub fn validate_as_of(&self, current_year: i32) -> Result<MarketFields<'_>, AdapterError> {
        Ok(MarketFields {
            address: required_text("address", &self.address)?,
            property_type: self.property_type.id(),
            square_feet: non_negative_number("square_feet", &self.square_feet)?,
            year_built: year_built(&self.year_built, current_year)?,
            condition: self.condition.id(),
            recent_sales: self.recent_sales,
        })
    }
}

impl ListingOptimizationInput {
    pub fn new(current_listing: impl Into<String>, target_keywords: impl Into<String>) -> Self {
        Self {
            current_listing: current_listing.into(),
            target_keywords: target_keywords.into(),
        }
    }

    /// Checks the listing text; keywords are optional.
    ///
    /// The listing is kept verbatim apart from surrounding blank lines.
    ///
    /// # Errors
    /// Returns a validation error if the listing is blank.
    pub fn validate(&self) -> Result<OptimizationFields<'_>, AdapterError> {
        if self.current_listing.trim().is_empty() {
            return Err(AdapterError::required("current_listing"));
        }
        let keywords = self.target_keywords.trim();
        Ok(OptimizationFields {
            current_listing: self.current_listing.trim_matches(|c| c == '\n' || c == '\r'),
            target_keywords: (!keywords.is_empty()).then_some(keywords),
        })
    }
}

fn required_text<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, AdapterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(AdapterError::required(field))
    } else {
        Ok(trimmed)
    }
}

/// Like [`required_text`], but returns the text untouched.
fn verbatim_text<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, AdapterError> {
    required_text(field, raw)?;
    Ok(raw)
}

fn non_negative_number<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, AdapterError> {
    let trimmed = required_text(field, raw)?;
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(trimmed),
        _ => Err(AdapterError::invalid(
            field,
            format!("'{trimmed}' is not a non-negative number"),
        )),
    }
}

fn year_built(raw: &str, current_year: i32) -> Result<&str, AdapterError> {
    let trimmed = required_text("year_built", raw)?;
    let year: i32 = trimmed.parse().map_err(|_| {
        AdapterError::invalid("year_built", format!("'{trimmed}' is not a whole year"))
    })?;
    if (MIN_YEAR_BUILT..=current_year).contains(&year) {
        Ok(trimmed)
    } else {
        Err(AdapterError::invalid(
            "year_built",
            format!("{year} is outside {MIN_YEAR_BUILT}..={current_year}"),
        ))
    }
}
