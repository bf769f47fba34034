// Marketing page assembly: catalog lookup + localization + SEO metadata.
// Handlers live in `handlers`; everything here is pure and synchronous.

pub mod handlers;

use serde::Serialize;

use crate::catalog::services::ServiceCard;
use crate::catalog::{LocationEntry, ServiceDocument, SiteCatalog};
use crate::localize::{fallback_city_name, localize, substitute_placeholders, LocationLabel};

pub const SITE_NAME: &str = "Express Plumbing";

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationEntry>,
    pub label: String,
    pub meta: PageMeta,
    pub service: ServiceDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceLink {
    #[serde(flatten)]
    pub card: ServiceCard,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationPage {
    pub location: LocationEntry,
    pub county: Option<String>,
    pub services: Vec<ServiceLink>,
}

/// Statewide page for a service.
pub fn generic_service_page(doc: &ServiceDocument) -> ServicePage {
    let label = LocationLabel::Default.render();
    let hero = substitute_placeholders(&doc.hero_title, &label);
    ServicePage {
        location: None,
        meta: PageMeta {
            title: format!("{hero} | {SITE_NAME}"),
            description: substitute_placeholders(&doc.meta_description, &label),
        },
        service: localize(doc, &label),
        label,
    }
}

/// Page for a service in a specific town. Metadata uses the bare town name; body copy uses
/// the `"<Town>, NJ"` label.
pub fn city_service_page(doc: &ServiceDocument, location: &LocationEntry) -> ServicePage {
    let label = LocationLabel::City(&location.name).render();
    ServicePage {
        location: Some(location.clone()),
        meta: PageMeta {
            title: format!("{} in {} | {SITE_NAME}", doc.hero_title, location.name),
            description: substitute_placeholders(&doc.meta_description, &location.name),
        },
        service: localize(doc, &label),
        label,
    }
}

/// Resolves a city path segment. On a miss, returns the display name derived from the segment.
pub fn resolve_city<'a>(catalog: &'a SiteCatalog, segment: &str) -> Result<&'a LocationEntry, String> {
    catalog
        .locations
        .find_by_slug(segment)
        .ok_or_else(|| fallback_city_name(segment))
}

pub fn location_page(catalog: &SiteCatalog, location: &LocationEntry) -> LocationPage {
    let county = catalog
        .locations
        .counties()
        .iter()
        .find(|c| c.towns.iter().any(|t| *t == location.name))
        .map(|c| c.name.clone());

    let services = catalog
        .services
        .all()
        .iter()
        .map(|doc| ServiceLink {
            card: ServiceCard::from(doc),
            path: format!("/{}/services/{}", location.slug, doc.slug),
        })
        .collect();

    LocationPage {
        location: location.clone(),
        county,
        services,
    }
}

/// Every statically renderable path: generic service pages, service-area pages and the
/// location × service cross product.
pub fn static_paths(catalog: &SiteCatalog) -> Vec<String> {
    let services = catalog.services.slugs();
    let locations = catalog.locations.entries();

    let mut paths = Vec::with_capacity(services.len() + locations.len() * (services.len() + 1));
    paths.extend(services.iter().map(|s| format!("/services/{s}")));
    paths.extend(locations.iter().map(|l| format!("/service-area/{}", l.slug)));
    for location in locations {
        paths.extend(
            services
                .iter()
                .map(|s| format!("/{}/services/{s}", location.slug)),
        );
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SiteCatalog {
        SiteCatalog::load().unwrap()
    }

    #[test]
    fn test_generic_page_uses_default_label() {
        let catalog = catalog();
        let page = generic_service_page(catalog.services.find_by_slug("plumbing").unwrap());
        assert_eq!(page.label, "NJ");
        assert_eq!(page.meta.title, "Plumbing | Express Plumbing");
        assert_eq!(page.service.title, "Comprehensive Plumbing Services in NJ, NJ");
        assert!(page.meta.description.contains("in NJ."));
        assert!(page.location.is_none());
    }

    #[test]
    fn test_city_page_labels() {
        let catalog = catalog();
        let brick = catalog.locations.find_by_slug("brick").unwrap();
        let page = city_service_page(catalog.services.find_by_slug("heating").unwrap(), brick);

        assert_eq!(page.label, "Brick, NJ");
        assert_eq!(page.meta.title, "Heating in Brick | Express Plumbing");
        assert!(page.meta.description.ends_with("winter comfort in Brick."));
        assert_eq!(page.service.content.introduction.matches("Brick, NJ").count(), 1);
    }

    #[test]
    fn test_resolve_city_fallback() {
        let catalog = catalog();
        assert_eq!(resolve_city(&catalog, "brick").unwrap().name, "Brick");
        assert_eq!(resolve_city(&catalog, "point-pleasant").unwrap_err(), "Point Pleasant");
    }

    #[test]
    fn test_location_page_links_every_service() {
        let catalog = catalog();
        let lakewood = catalog.locations.find_by_slug("lakewood").unwrap();
        let page = location_page(&catalog, lakewood);
        assert_eq!(page.county.as_deref(), Some("Ocean"));
        assert_eq!(page.services.len(), catalog.services.len());
        assert!(page
            .services
            .iter()
            .any(|l| l.path == "/lakewood/services/plumbing"));
    }

    #[test]
    fn test_static_paths_cover_cross_product() {
        let catalog = catalog();
        let paths = static_paths(&catalog);
        let s = catalog.services.len();
        let l = catalog.locations.len();
        assert_eq!(paths.len(), s + l + s * l);
        assert!(paths.contains(&"/services/cooling".to_string()));
        assert!(paths.contains(&"/service-area/toms-river".to_string()));
        assert!(paths.contains(&"/washington-twp-warren/services/roof-repair".to_string()));
    }
}
