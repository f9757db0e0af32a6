//! Application configuration loading from config.toml
//!
//! The file is optional. It can tune the review rules and list the catalog
//! products that are seeded into the database on startup. Every section falls
//! back to its defaults when absent.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default path of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rules applied when submitting and retiring reviews
    pub reviews: ReviewRules,
    /// Catalog products to seed
    pub products: Vec<ProductConfig>,
}

/// Rules applied by the review service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReviewRules {
    /// Lowest accepted grade
    pub min_grade: i32,
    /// Highest accepted grade
    pub max_grade: i32,
    /// Recompute the product rating when a review is retired.
    /// Off by default: retiring leaves the stored rating untouched.
    pub recalculate_on_retire: bool,
}

impl Default for ReviewRules {
    fn default() -> Self {
        Self {
            min_grade: 1,
            max_grade: 5,
            recalculate_on_retire: false,
        }
    }
}

impl ReviewRules {
    /// Fails with [`Error::InvalidGrade`] unless `grade` lies within the bounds.
    pub fn check_grade(&self, grade: i32) -> Result<()> {
        if grade < self.min_grade || grade > self.max_grade {
            return Err(Error::InvalidGrade {
                grade,
                min: self.min_grade,
                max: self.max_grade,
            });
        }
        Ok(())
    }
}

/// Configuration for a single catalog product
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductConfig {
    /// Display name of the product
    pub name: String,
    /// Unique slug used in `/reviews/{slug}`
    pub slug: String,
}

impl AppConfig {
    fn validate(&self) -> Result<()> {
        if self.reviews.min_grade > self.reviews.max_grade {
            return Err(Error::Config {
                message: format!(
                    "reviews.min_grade ({}) is greater than reviews.max_grade ({})",
                    self.reviews.min_grade, self.reviews.max_grade
                ),
            });
        }
        if let Some(product) = self
            .products
            .iter()
            .find(|p| p.name.trim().is_empty() || p.slug.trim().is_empty())
        {
            return Err(Error::Config {
                message: format!("Product entry {product:?} needs a non-empty name and slug"),
            });
        }
        Ok(())
    }
}

/// Parses and validates configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The grade bounds are inverted or a product entry is blank
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads configuration from the default location (./config.toml), using
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)
    } else {
        info!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
        Ok(AppConfig::default())
    }
}
