//! City and neighborhood registry.

use itertools::Itertools as _;

use crate::domain::listing::City;

/// Registered city with its named zones.
#[derive(Clone, Copy, Debug)]
struct Entry {
    /// Name of the city.
    city: &'static str,

    /// Named zones of the city, in declaration order.
    zones: &'static [Zone],
}

/// Named zone of a city.
#[derive(Clone, Copy, Debug)]
struct Zone {
    /// Name of this [`Zone`].
    #[expect(dead_code, reason = "zone names group the configuration data")]
    name: &'static str,

    /// Neighborhoods of this [`Zone`], in declaration order.
    neighborhoods: &'static [&'static str],
}

/// Returns the registered city names, in declaration order.
pub fn cities() -> impl Iterator<Item = &'static str> {
    CITIES.iter().map(|e| e.city)
}

/// Returns the flattened, de-duplicated neighborhoods of the given [`City`].
///
/// Order is zone declaration order, then within-zone order; duplicates keep
/// their first occurrence. An unknown `city` yields an empty list — callers
/// must treat "no neighborhoods" as valid, not exceptional.
#[must_use]
pub fn neighborhoods(city: &City) -> Vec<&'static str> {
    let name: &str = city.as_ref();
    CITIES
        .iter()
        .find(|e| e.city == name)
        .map(|e| {
            e.zones
                .iter()
                .flat_map(|z| z.neighborhoods.iter().copied())
                .unique()
                .collect()
        })
        .unwrap_or_default()
}

/// Registered cities.
static CITIES: &[Entry] = &[
    Entry {
        city: "Libreville",
        zones: &[
            Zone {
                name: "Centre & Administratif",
                neighborhoods: &[
                    "Centre-ville",
                    "Boulevard Triomphal",
                    "Batterie IV",
                    "Montagne Sainte",
                    "Derrière l'Assemblée",
                    "Derrière l'Ambassade de Chine",
                ],
            },
            Zone {
                name: "Nord de Libreville",
                neighborhoods: &[
                    "Angondjé",
                    "Okala",
                    "Okala Alibandeng",
                    "Okala Petit Paris",
                    "Okala Carrefour",
                    "Mindoubé",
                    "Mikolongo",
                    "Nzeng-Ayong Nord",
                ],
            },
            Zone {
                name: "Est & Périphérie",
                neighborhoods: &[
                    "Nzeng-Ayong",
                    "Derrière la Prison",
                    "Derrière la Sobraga",
                    "PK5",
                    "PK6",
                    "PK7",
                    "PK8",
                    "PK9",
                    "PK10",
                    "PK11",
                    "PK12",
                ],
            },
            Zone {
                name: "Sud de Libreville",
                neighborhoods: &[
                    "Glass",
                    "Lalala",
                    "Lalala Carrefour",
                    "Akébé",
                    "Akébé Ville",
                    "Akébé Plaine",
                    "Kinguélé",
                    "Plein Ciel",
                ],
            },
            Zone {
                name: "Quartiers populaires",
                neighborhoods: &[
                    "Mont-Bouët",
                    "Nkembo",
                    "Avorbam",
                    "Cocotiers",
                    "Derrière la Gare",
                    "Baraka",
                    "Belle Vue",
                ],
            },
        ],
    },
    Entry {
        city: "Akanda",
        zones: &[Zone {
            name: "Akanda",
            neighborhoods: &[
                "Angondjé (zone Akanda)",
                "Sablière",
                "La Baie des Rois",
                "Derrière la Sablière",
                "Malibé",
                "Cap Estérias",
                "Cap Caravane",
                "Igoumié",
                "Bambouchine",
                "Avorbam Akanda",
            ],
        }],
    },
    Entry {
        city: "Owendo",
        zones: &[Zone {
            name: "Owendo",
            neighborhoods: &[
                "Owendo Centre",
                "Owendo Port",
                "Owendo Gare",
                "Owendo Sud",
                "Owendo Nord",
                "SNI Owendo",
                "Derrière la Sobraga Owendo",
                "Zone Industrielle Owendo",
                "Derrière la Poste Owendo",
                "Pont Nomba",
            ],
        }],
    },
];

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use crate::domain::listing::City;

    use super::{cities, neighborhoods};

    fn city(name: &str) -> City {
        City::new(name).unwrap()
    }

    #[test]
    fn cities_keep_declaration_order() {
        assert_eq!(
            cities().collect::<Vec<_>>(),
            ["Libreville", "Akanda", "Owendo"],
        );
    }

    #[test]
    fn neighborhoods_keep_zone_then_inner_order() {
        let all = neighborhoods(&city("Libreville"));
        let pos = |name: &str| {
            all.iter().position(|n| *n == name).unwrap_or_else(|| {
                panic!("`{name}` not found");
            })
        };

        assert_eq!(all.first().copied(), Some("Centre-ville"));
        assert!(pos("Angondjé") < pos("Nzeng-Ayong"));
        assert!(pos("Glass") < pos("Mont-Bouët"));
        assert_eq!(all.last().copied(), Some("Belle Vue"));
    }

    #[test]
    fn neighborhoods_are_deduplicated() {
        for name in ["Libreville", "Akanda", "Owendo"] {
            let all = neighborhoods(&city(name));
            let unique = all.iter().collect::<HashSet<_>>();
            assert_eq!(all.len(), unique.len(), "{name}");
        }
    }

    #[test]
    fn unknown_city_yields_empty_list() {
        assert!(neighborhoods(&city("Port-Gentil")).is_empty());
    }
}
