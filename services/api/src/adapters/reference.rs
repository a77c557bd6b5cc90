//! services/api/src/adapters/reference.rs
//!
//! The reference-data adapter. Two public read-only catalogs stand in for
//! the selection lists: a creature catalog supplies material names and a
//! country catalog supplies locations. Either fetch failing yields the
//! hardcoded fallback list, never an error.

use async_trait::async_trait;
use material_tracker_core::domain::SelectOption;
use material_tracker_core::ports::ReferenceDataService;
use material_tracker_core::view::capitalize_first;
use serde::Deserialize;
use tracing::warn;

/// How many creature entries to turn into material options.
const MATERIALS_LIMIT: usize = 20;
/// How many countries to turn into location options.
const COUNTRIES_LIMIT: usize = 15;

//=========================================================================================
// Catalog Response Shapes
//=========================================================================================

#[derive(Deserialize)]
struct CreaturePage {
    results: Vec<NamedResource>,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct Country {
    name: CountryName,
    #[serde(default)]
    capital: Vec<String>,
}

#[derive(Deserialize)]
struct CountryName {
    common: String,
}

//=========================================================================================
// Pure Mapping Helpers
//=========================================================================================

fn material_options(page: CreaturePage) -> Vec<SelectOption> {
    page.results
        .into_iter()
        .map(|resource| SelectOption {
            display_name: capitalize_first(&resource.name),
            value: resource.name,
        })
        .collect()
}

/// One option per country plus one per capital, `"<Capital>, <Country>"`
/// style, capped to the first `COUNTRIES_LIMIT` countries.
fn location_options(countries: Vec<Country>) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for country in countries.into_iter().take(COUNTRIES_LIMIT) {
        let country_name = country.name.common;
        options.push(SelectOption {
            display_name: country_name.clone(),
            value: country_name.to_lowercase(),
        });
        if let Some(capital) = country.capital.first() {
            options.push(SelectOption {
                display_name: format!("{}, {}", capital, country_name),
                value: format!(
                    "{}-{}",
                    capital.to_lowercase(),
                    country_name.to_lowercase()
                ),
            });
        }
    }
    options
}

fn fallback_materials() -> Vec<SelectOption> {
    [("Oro", "oro"), ("Plata", "plata"), ("Cobre", "cobre")]
        .into_iter()
        .map(|(display_name, value)| SelectOption {
            display_name: display_name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

fn fallback_locations() -> Vec<SelectOption> {
    [
        ("Mina Norte - Sector A", "mina-norte-a"),
        ("Mina Sur - Sector B", "mina-sur-b"),
        ("Almacén Central", "almacen-central"),
    ]
    .into_iter()
    .map(|(display_name, value)| SelectOption {
        display_name: display_name.to_string(),
        value: value.to_string(),
    })
    .collect()
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ReferenceDataService` port over the two
/// public catalog APIs.
#[derive(Clone)]
pub struct CatalogAdapter {
    http: reqwest::Client,
    creature_api_url: String,
    countries_api_url: String,
}

impl CatalogAdapter {
    /// Creates a new `CatalogAdapter`.
    pub fn new(http: reqwest::Client, creature_api_url: String, countries_api_url: String) -> Self {
        Self {
            http,
            creature_api_url,
            countries_api_url,
        }
    }

    async fn fetch_materials(&self) -> Result<Vec<SelectOption>, reqwest::Error> {
        let page = self
            .http
            .get(format!("{}/pokemon", self.creature_api_url))
            .query(&[("limit", MATERIALS_LIMIT)])
            .send()
            .await?
            .error_for_status()?
            .json::<CreaturePage>()
            .await?;
        Ok(material_options(page))
    }

    async fn fetch_locations(&self) -> Result<Vec<SelectOption>, reqwest::Error> {
        let countries = self
            .http
            .get(format!("{}/region/americas", self.countries_api_url))
            .query(&[("fields", "name,capital")])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Country>>()
            .await?;
        Ok(location_options(countries))
    }
}

//=========================================================================================
// `ReferenceDataService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReferenceDataService for CatalogAdapter {
    async fn load_materials(&self) -> Vec<SelectOption> {
        match self.fetch_materials().await {
            Ok(options) => options,
            Err(e) => {
                warn!("material catalog unavailable, serving fallback list: {}", e);
                fallback_materials()
            }
        }
    }

    async fn load_locations(&self) -> Vec<SelectOption> {
        match self.fetch_locations().await {
            Ok(options) => options,
            Err(e) => {
                warn!("location catalog unavailable, serving fallback list: {}", e);
                fallback_locations()
            }
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_options_capitalize_for_display_and_keep_raw_values() {
        let page = CreaturePage {
            results: vec![
                NamedResource {
                    name: "bulbasaur".to_string(),
                },
                NamedResource {
                    name: "charmander".to_string(),
                },
            ],
        };
        let options = material_options(page);
        assert_eq!(options[0].display_name, "Bulbasaur");
        assert_eq!(options[0].value, "bulbasaur");
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn location_options_pair_each_country_with_its_capital() {
        let countries = vec![
            Country {
                name: CountryName {
                    common: "Chile".to_string(),
                },
                capital: vec!["Santiago".to_string()],
            },
            Country {
                name: CountryName {
                    common: "Bouvet".to_string(),
                },
                capital: vec![],
            },
        ];
        let options = location_options(countries);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].display_name, "Chile");
        assert_eq!(options[0].value, "chile");
        assert_eq!(options[1].display_name, "Santiago, Chile");
        assert_eq!(options[1].value, "santiago-chile");
        assert_eq!(options[2].display_name, "Bouvet");
    }

    #[test]
    fn location_options_cap_the_country_count() {
        let countries = (0..30)
            .map(|i| Country {
                name: CountryName {
                    common: format!("Country{}", i),
                },
                capital: vec![],
            })
            .collect();
        assert_eq!(location_options(countries).len(), COUNTRIES_LIMIT);
    }

    #[test]
    fn fallback_lists_are_non_empty() {
        assert!(!fallback_materials().is_empty());
        assert!(!fallback_locations().is_empty());
    }
}
