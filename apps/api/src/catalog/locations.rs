//! Location catalog: the towns we serve, grouped by county.
//!
//! Raw municipality names carry governmental suffixes ("TWP.", "BORO"), legacy names and
//! cross-county collisions ("Washington Twp" exists in several counties). `clean_name`
//! normalizes one raw name; `LocationCatalog::from_raw` turns the whole county table into
//! display names and unique URL slugs.
//!
//! Disambiguation always runs before slug derivation, so two colliding towns end up with
//! distinct parentheticals and therefore distinct slugs.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// County → raw town names, in display order.
pub type RawServiceAreas<'a> = &'a [(&'a str, &'a [&'a str])];

/// Curated list of representative municipalities per county.
pub const SERVICE_AREAS: RawServiceAreas<'static> = &[
    ("Ocean", &["Toms River", "Brick", "Lakewood", "Jackson", "Lacey", "Manchester", "Berkeley", "Stafford"]),
    ("Monmouth", &["Middletown", "Howell", "Freehold Twp", "Manalapan", "Wall Twp", "Neptune Twp", "Long Branch", "Asbury Park"]),
    ("Atlantic", &["Egg Harbor Twp", "Galloway", "Hamilton Twp", "Pleasantville", "Hammonton", "Somers Point", "Atlantic City", "Margate"]),
    ("Burlington", &["Mount Laurel", "Evesham (Marlton)", "Medford", "Moorestown", "Burlington Twp", "Willingboro", "Cinnaminson", "Pemberton Twp"]),
    ("Bergen", &["Hackensack", "Teaneck", "Fort Lee", "Paramus", "Ridgewood", "Fair Lawn", "Garfield", "Englewood"]),
    ("Camden", &["Camden", "Cherry Hill", "Gloucester Twp", "Pennsauken", "Voorhees", "Winslow", "Haddonfield", "Collingswood"]),
    ("Cape May", &["Ocean City", "Lower Twp", "Middle Twp", "Upper Twp", "Wildwood", "Cape May", "Sea Isle City", "Avalon"]),
    ("Cumberland", &["Vineland", "Millville", "Bridgeton", "Upper Deerfield", "Fairfield", "Maurice River", "Commercial", "Lawrence Twp"]),
    ("Essex", &["Newark", "East Orange", "Irvington", "West Orange", "Bloomfield", "Montclair", "Belleville", "Livingston"]),
    ("Gloucester", &["Washington Twp", "Deptford", "Monroe", "Glassboro", "West Deptford", "Franklin Twp", "Woolwich", "Harrison"]),
    ("Hudson", &["Jersey City", "Union City", "North Bergen", "Bayonne", "Hoboken", "West New York", "Kearny", "Secaucus"]),
    ("Hunterdon", &["Raritan Twp", "Readington", "Clinton Twp", "Flemington", "Tewksbury", "Alexandria", "Delaware", "Union Twp"]),
    ("Mercer", &["Hamilton Twp", "Trenton", "Ewing", "Lawrence Twp", "Princeton", "West Windsor", "East Windsor", "Hopewell Twp"]),
    ("Middlesex", &["Edison", "Woodbridge", "Old Bridge", "Piscataway", "New Brunswick", "Perth Amboy", "East Brunswick", "South Brunswick"]),
    ("Morris", &["Parsippany-Troy Hills", "Mount Olive", "Randolph", "Rockaway Twp", "Morris Twp", "Morristown", "Denville", "Roxbury"]),
    ("Passaic", &["Paterson", "Clifton", "Wayne", "Passaic", "Hawthorne", "West Milford", "Woodland Park", "Ringwood"]),
    ("Salem", &["Pennsville", "Carneys Point", "Salem", "Penns Grove", "Pilesgrove", "Upper Pittsgrove", "Woodstown", "Oldmans"]),
    ("Somerset", &["Franklin Twp", "Bridgewater", "Hillsborough", "Bernards", "Montgomery", "North Plainfield", "Somerville", "Warren"]),
    ("Sussex", &["Vernon", "Sparta", "Hopatcong", "Wantage", "Newton", "Hardyston", "Frankford", "Byram"]),
    ("Union", &["Elizabeth", "Union Twp", "Plainfield", "Linden", "Westfield", "Rahway", "Cranford", "Summit"]),
    ("Warren", &["Phillipsburg", "Washington Twp", "Hackettstown", "Lopatcong", "Mansfield Twp", "Greenwich Twp", "Blairstown", "White"]),
];

/// Exact (case-insensitive) rewrites applied before anything else. An empty target drops the town.
const RENAMES: &[(&str, &str)] = &[
    ("DOVER TWP.", "Toms River"),
    ("SOUTH BELMAR BORO", "Lake Como"),
    ("PRINCETON BORO", "Princeton"),
    // merged into Princeton
    ("PRINCETON TWP.", ""),
    ("WEST PATERSON BORO", "Woodland Park"),
];

/// Town names that exist in more than one county and get a "(County)" suffix.
const COLLIDING_PREFIXES: &[&str] = &[
    "Washington Twp",
    "Greenwich Twp",
    "Franklin Twp",
    "Mansfield Twp",
    "Springfield Twp",
    "Union Twp",
    "Hamilton Twp",
    "Hopewell Twp",
    "Lawrence Twp",
];

static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i) (CITY|BORO|TWP\.?|TOWN|VILLAGE)$").expect("suffix pattern is valid")
});
static EVESHAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevesham\b").expect("evesham pattern is valid"));
static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \(([^)]+)\)").expect("parenthetical pattern is valid"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("slug pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationEntry {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct County {
    pub name: String,
    pub towns: Vec<String>,
}

/// Normalizes one raw municipality name. Returns an empty string for towns that must be dropped.
pub fn clean_name(raw: &str, county: Option<&str>) -> String {
    let upper = raw.trim().to_uppercase();

    if let Some((_, renamed)) = RENAMES.iter().find(|(from, _)| *from == upper) {
        return renamed.to_string();
    }
    if upper == "OCEAN TWP." && county.is_some_and(|c| c.eq_ignore_ascii_case("Ocean")) {
        return "Waretown (Ocean Twp)".to_string();
    }

    if let Some(county) = county {
        if let Some(prefix) = COLLIDING_PREFIXES
            .iter()
            .find(|p| upper.starts_with(&p.to_uppercase()))
        {
            return format!("{prefix} ({county})");
        }
        if upper.starts_with("CHESTER TWP") {
            if county.eq_ignore_ascii_case("Morris") {
                return format!("Chester Twp ({county})");
            }
            if county.eq_ignore_ascii_case("Burlington") {
                return "Chesterfield".to_string();
            }
        }
        if upper.starts_with("OCEAN TWP") && county.eq_ignore_ascii_case("Monmouth") {
            return format!("Ocean Twp ({county})");
        }
    }

    let cleaned = SUFFIX_RE.replace(raw.trim(), "").trim().to_string();

    if !cleaned.to_lowercase().contains("(marlton)") {
        return EVESHAM_RE
            .replace_all(&cleaned, "Evesham (Marlton)")
            .into_owned();
    }
    cleaned
}

/// Derives a URL slug from a display name, keeping any parenthetical as a trailing segment.
///
/// `"Washington Twp (Warren)"` → `"washington-twp-warren"`.
pub fn generate_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let base = slugify(&PARENTHETICAL_RE.replace_all(&lower, ""));
    match PARENTHETICAL_RE.captures(&lower) {
        Some(caps) => format!("{base}-{}", slugify(&caps[1])),
        None => base,
    }
}

fn slugify(text: &str) -> String {
    let hyphenated = WHITESPACE_RE.replace_all(text.trim(), "-");
    NON_SLUG_RE.replace_all(&hyphenated, "").into_owned()
}

/// Cleaned, deduplicated, sorted display names for one county.
fn clean_county(county: &str, raw_towns: &[&str]) -> Vec<String> {
    let mut towns: Vec<String> = raw_towns
        .iter()
        .map(|raw| clean_name(raw, Some(county)))
        .filter(|name| !name.is_empty())
        .collect();
    towns.sort();
    towns.dedup();
    towns
}

/// Read-only catalog of every serviceable town.
#[derive(Debug)]
pub struct LocationCatalog {
    counties: Vec<County>,
    entries: Vec<LocationEntry>,
    index: HashMap<String, usize>,
}

impl LocationCatalog {
    pub fn embedded() -> Self {
        Self::from_raw(SERVICE_AREAS)
    }

    /// Builds the catalog from a raw county table.
    ///
    /// Entries whose slugs collide after disambiguation are collapsed; the first one seen
    /// (in county order) wins. The result is sorted by display name.
    pub fn from_raw(raw: RawServiceAreas<'_>) -> Self {
        let mut counties: Vec<County> = raw
            .iter()
            .map(|(county, towns)| County {
                name: county.to_string(),
                towns: clean_county(county, towns),
            })
            .collect();

        // Collision losers leave their county's town list as well.
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for County { name: county, towns } in counties.iter_mut() {
            towns.retain(|town| {
                let slug = generate_slug(town);
                if !seen.insert(slug.clone()) {
                    warn!(
                        "Location slug collision for '{town}' ({slug}) in {county}; keeping first entry"
                    );
                    return false;
                }
                entries.push(LocationEntry {
                    slug,
                    name: town.clone(),
                });
                true
            });
        }
        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.slug.clone(), i))
            .collect();

        Self {
            counties,
            entries,
            index,
        }
    }

    /// All locations, unique by slug, sorted by display name.
    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&LocationEntry> {
        self.index.get(slug).map(|&i| &self.entries[i])
    }

    pub fn counties(&self) -> &[County] {
        &self.counties
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
