use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Feature;

/// Values typed into the manual entry form
///
/// Field names on the wire are the schema column names. Missing fields take
/// the form defaults, so an empty JSON object is a valid request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ManualEntryRequest {
    #[validate(range(min = 0.0))]
    #[serde(rename = "number of bedrooms", alias = "bedrooms", default = "default_bedrooms")]
    pub bedrooms: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "number of bathrooms", alias = "bathrooms", default = "default_bathrooms")]
    pub bathrooms: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "living area", alias = "living_area", default = "default_living_area")]
    pub living_area: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "lot area", alias = "lot_area", default = "default_lot_area")]
    pub lot_area: f64,
    #[validate(range(min = 1.0))]
    #[serde(rename = "number of floors", alias = "floors", default = "default_floors")]
    pub floors: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "number of views", alias = "views", default = "default_views")]
    pub views: f64,
    #[validate(range(min = 0.0))]
    #[serde(
        rename = "Area of the house(excluding basement)",
        alias = "area_excluding_basement",
        default = "default_area_excluding_basement"
    )]
    pub area_excluding_basement: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "Area of the basement", alias = "basement_area", default = "default_basement_area")]
    pub basement_area: f64,
    #[validate(range(min = 1800.0, max = 2023.0))]
    #[serde(rename = "Built Year", alias = "built_year", default = "default_built_year")]
    pub built_year: f64,
    #[validate(range(min = 0.0, max = 2023.0))]
    #[serde(rename = "Renovation Year", alias = "renovation_year", default = "default_renovation_year")]
    pub renovation_year: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "living_area_renov", default = "default_living_area_renov")]
    pub living_area_renov: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "Number of schools nearby", alias = "schools_nearby", default = "default_schools_nearby")]
    pub schools_nearby: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "Distance from the airport", alias = "airport_distance", default = "default_airport_distance")]
    pub airport_distance: f64,
}

impl ManualEntryRequest {
    /// Value entered for a schema feature
    pub fn value_of(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Bedrooms => self.bedrooms,
            Feature::Bathrooms => self.bathrooms,
            Feature::LivingArea => self.living_area,
            Feature::LotArea => self.lot_area,
            Feature::Floors => self.floors,
            Feature::Views => self.views,
            Feature::AreaExcludingBasement => self.area_excluding_basement,
            Feature::BasementArea => self.basement_area,
            Feature::BuiltYear => self.built_year,
            Feature::RenovationYear => self.renovation_year,
            Feature::LivingAreaRenov => self.living_area_renov,
            Feature::SchoolsNearby => self.schools_nearby,
            Feature::AirportDistance => self.airport_distance,
        }
    }
}

impl Default for ManualEntryRequest {
    fn default() -> Self {
        Self {
            bedrooms: default_bedrooms(),
            bathrooms: default_bathrooms(),
            living_area: default_living_area(),
            lot_area: default_lot_area(),
            floors: default_floors(),
            views: default_views(),
            area_excluding_basement: default_area_excluding_basement(),
            basement_area: default_basement_area(),
            built_year: default_built_year(),
            renovation_year: default_renovation_year(),
            living_area_renov: default_living_area_renov(),
            schools_nearby: default_schools_nearby(),
            airport_distance: default_airport_distance(),
        }
    }
}

fn default_bedrooms() -> f64 { Feature::Bedrooms.bounds().default }
fn default_bathrooms() -> f64 { Feature::Bathrooms.bounds().default }
fn default_living_area() -> f64 { Feature::LivingArea.bounds().default }
fn default_lot_area() -> f64 { Feature::LotArea.bounds().default }
fn default_floors() -> f64 { Feature::Floors.bounds().default }
fn default_views() -> f64 { Feature::Views.bounds().default }
fn default_area_excluding_basement() -> f64 { Feature::AreaExcludingBasement.bounds().default }
fn default_basement_area() -> f64 { Feature::BasementArea.bounds().default }
fn default_built_year() -> f64 { Feature::BuiltYear.bounds().default }
fn default_renovation_year() -> f64 { Feature::RenovationYear.bounds().default }
fn default_living_area_renov() -> f64 { Feature::LivingAreaRenov.bounds().default }
fn default_schools_nearby() -> f64 { Feature::SchoolsNearby.bounds().default }
fn default_airport_distance() -> f64 { Feature::AirportDistance.bounds().default }
