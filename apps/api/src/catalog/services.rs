//! Service catalog: the generic marketing copy for every service we sell.
//!
//! The documents are embedded at compile time from `data/services.json` and parsed once at
//! startup. Text fields may carry `[City Name]` / `[Your Area]` placeholders; see `localize`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

const SERVICES_JSON: &str = include_str!("../../data/services.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDocument {
    pub slug: String,
    pub title: String,
    pub meta_description: String,
    pub short_description: String,
    pub icon_identifier: String,
    pub hero_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    pub content: ServiceContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    pub introduction: String,
    pub call_to_action_number: String,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_choose_us: Option<WhyChooseUs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessBlock>,
    pub final_call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Vec<Subsection>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhyChooseUs {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessBlock {
    pub title: String,
    pub steps: Vec<String>,
}

/// Card-sized view of a service, used by listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCard {
    pub slug: String,
    pub hero_title: String,
    pub short_description: String,
    pub icon_identifier: String,
}

impl From<&ServiceDocument> for ServiceCard {
    fn from(doc: &ServiceDocument) -> Self {
        Self {
            slug: doc.slug.clone(),
            hero_title: doc.hero_title.clone(),
            short_description: doc.short_description.clone(),
            icon_identifier: doc.icon_identifier.clone(),
        }
    }
}

/// Immutable registry of service documents, in registration order.
#[derive(Debug)]
pub struct ServiceCatalog {
    documents: Vec<ServiceDocument>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Builds a catalog, rejecting duplicate or empty slugs.
    pub fn new(documents: Vec<ServiceDocument>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            if doc.slug.trim().is_empty() {
                return Err(CatalogError::EmptyServiceSlug { position: i });
            }
            if index.insert(doc.slug.clone(), i).is_some() {
                return Err(CatalogError::DuplicateServiceSlug(doc.slug.clone()));
            }
        }
        Ok(Self { documents, index })
    }

    /// Parses the catalog embedded in the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(SERVICES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let documents: Vec<ServiceDocument> = serde_json::from_str(json)?;
        Self::new(documents)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&ServiceDocument> {
        self.index.get(slug).map(|&i| &self.documents[i])
    }

    /// Every routable service slug, in catalog order.
    pub fn slugs(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.slug.as_str()).collect()
    }

    pub fn all(&self) -> &[ServiceDocument] {
        &self.documents
    }

    pub fn cards(&self) -> Vec<ServiceCard> {
        self.documents.iter().map(ServiceCard::from).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal document with every optional block absent.
    pub(crate) fn bare_document(slug: &str) -> ServiceDocument {
        ServiceDocument {
            slug: slug.to_string(),
            title: format!("{slug} in [City Name]"),
            meta_description: "Call us".to_string(),
            short_description: "Short".to_string(),
            icon_identifier: "mdi:wrench".to_string(),
            hero_title: "Hero".to_string(),
            hero_subtitle: None,
            content: ServiceContent {
                introduction: "Intro".to_string(),
                call_to_action_number: "(609) 361-2727".to_string(),
                sections: vec![],
                why_choose_us: None,
                process: None,
                final_call_to_action: "Call".to_string(),
            },
        }
    }

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = ServiceCatalog::embedded().unwrap();
        assert!(catalog.len() >= 9);
        assert!(catalog.slugs().contains(&"cooling"));
    }

    #[test]
    fn test_find_plumbing() {
        let catalog = ServiceCatalog::embedded().unwrap();
        let plumbing = catalog.find_by_slug("plumbing").unwrap();
        assert_eq!(plumbing.hero_title, "Plumbing");
        assert_eq!(plumbing.content.call_to_action_number, "(609) 361-2727");
    }

    #[test]
    fn test_find_nonexistent_is_none() {
        let catalog = ServiceCatalog::embedded().unwrap();
        assert!(catalog.find_by_slug("nonexistent").is_none());
    }

    #[test]
    fn test_embedded_slugs_are_unique() {
        let catalog = ServiceCatalog::embedded().unwrap();
        let mut slugs = catalog.slugs();
        let before = slugs.len();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), before);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = ServiceCatalog::new(vec![bare_document("roof-repair"), bare_document("roof-repair")])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateServiceSlug(s) if s == "roof-repair"));
    }

    #[test]
    fn test_empty_slug_rejected() {
        let err = ServiceCatalog::new(vec![bare_document("  ")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyServiceSlug { position: 0 }));
    }

    #[test]
    fn test_absent_blocks_stay_absent_in_json() {
        let json = serde_json::to_value(bare_document("x")).unwrap();
        let content = json.get("content").unwrap();
        assert!(content.get("whyChooseUs").is_none());
        assert!(content.get("process").is_none());
        assert!(json.get("heroSubtitle").is_none());
    }

    #[test]
    fn test_section_without_points_parses() {
        let catalog = ServiceCatalog::embedded().unwrap();
        let heating = catalog.find_by_slug("heating").unwrap();
        let heat_pump = heating
            .content
            .sections
            .iter()
            .find(|s| s.title == "Heat Pump Services")
            .unwrap();
        assert!(heat_pump.points.is_none());
        assert!(heat_pump.subsections.is_none());
    }
}
