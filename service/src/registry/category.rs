//! Category [`Schema`] registry.

use crate::domain::listing::Category;

/// Intake schema of a [`Category`]: its sub-categories, applicable detail
/// fields and selectable option vocabularies.
///
/// Static configuration data, not computed.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    /// [`Category`] this [`Schema`] describes.
    pub category: Category,

    /// Displayed label of the [`Category`].
    pub label: &'static str,

    /// Selectable sub-categories, in declaration order.
    pub sub_categories: &'static [SubCategoryOption],

    /// Names of the detail-bag fields applicable to the [`Category`].
    pub detail_fields: &'static [&'static str],

    /// Named option [`Vocabulary`]s of the [`Category`].
    pub vocabularies: &'static [Vocabulary],
}

/// Selectable sub-category of a [`Category`].
#[derive(Clone, Copy, Debug)]
pub struct SubCategoryOption {
    /// Stored value of this sub-category.
    pub value: &'static str,

    /// Displayed label of this sub-category.
    pub label: &'static str,
}

/// Named vocabulary of selectable options.
#[derive(Clone, Copy, Debug)]
pub struct Vocabulary {
    /// Name of this [`Vocabulary`].
    pub name: &'static str,

    /// Selectable options, in declaration order.
    pub options: &'static [&'static str],
}

impl Schema {
    /// Indicates whether the given `value` is one of the sub-categories of
    /// this [`Schema`].
    #[must_use]
    pub fn has_sub_category(&self, value: &str) -> bool {
        self.sub_categories.iter().any(|o| o.value == value)
    }

    /// Looks up the [`Vocabulary`] with the given `name`.
    #[must_use]
    pub fn vocabulary(&self, name: &str) -> Option<&'static [&'static str]> {
        self.vocabularies
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.options)
    }

    /// Indicates whether the [`Vocabulary`] with the given `name` contains
    /// the given `value`.
    #[must_use]
    pub fn vocabulary_contains(&self, name: &str, value: &str) -> bool {
        self.vocabulary(name)
            .is_some_and(|options| options.contains(&value))
    }
}

/// Returns the [`Schema`] of the given [`Category`].
#[must_use]
pub const fn of(category: Category) -> &'static Schema {
    match category {
        Category::RealEstate => &REAL_ESTATE,
        Category::Land => &LAND,
        Category::Vehicle => &VEHICLE,
    }
}

/// Returns all the registered [`Schema`]s, in declaration order.
#[must_use]
pub const fn all() -> [&'static Schema; 3] {
    [&REAL_ESTATE, &LAND, &VEHICLE]
}

/// [`Schema`] of [`Category::RealEstate`].
static REAL_ESTATE: Schema = Schema {
    category: Category::RealEstate,
    label: "Immobilier",
    sub_categories: &[
        SubCategoryOption { value: "maison", label: "Maison" },
        SubCategoryOption { value: "appartement", label: "Appartement" },
        SubCategoryOption { value: "studio", label: "Studio" },
        SubCategoryOption { value: "villa", label: "Villa" },
        SubCategoryOption { value: "immeuble", label: "Immeuble" },
        SubCategoryOption {
            value: "local_commercial",
            label: "Local commercial",
        },
        SubCategoryOption { value: "bureau", label: "Bureau" },
    ],
    detail_fields: &[
        "bedrooms",
        "living_rooms",
        "bathrooms",
        "living_area",
        "land_area",
        "floors",
        "year_built",
    ],
    vocabularies: &[Vocabulary {
        name: "equipements",
        options: &[
            "Garage",
            "Parking",
            "Jardin",
            "Piscine",
            "Balcon/Terrasse",
            "Climatisation",
            "Meublé",
            "Cuisine équipée",
            "Sécurité/Gardien",
            "Eau",
            "Électricité",
        ],
    }],
};

/// [`Schema`] of [`Category::Land`].
static LAND: Schema = Schema {
    category: Category::Land,
    label: "Terrain",
    sub_categories: &[
        SubCategoryOption { value: "constructible", label: "Constructible" },
        SubCategoryOption { value: "agricole", label: "Agricole" },
        SubCategoryOption { value: "industriel", label: "Industriel" },
        SubCategoryOption { value: "commercial", label: "Commercial" },
    ],
    detail_fields: &[
        "area",
        "has_road_access",
        "is_flat",
        "is_surveyed",
        "has_deed",
        "is_subdivided",
    ],
    vocabularies: &[
        Vocabulary {
            name: "viabilisation",
            options: &["Eau", "Électricité", "Internet", "Égout"],
        },
        Vocabulary {
            name: "usages",
            options: &["Résidentiel", "Commercial", "Agricole", "Mixte"],
        },
    ],
};

/// [`Schema`] of [`Category::Vehicle`].
static VEHICLE: Schema = Schema {
    category: Category::Vehicle,
    label: "Véhicules",
    sub_categories: &[
        SubCategoryOption { value: "voiture", label: "Voiture" },
        SubCategoryOption { value: "moto", label: "Moto" },
        SubCategoryOption { value: "camion", label: "Camion" },
        SubCategoryOption { value: "utilitaire", label: "Utilitaire" },
    ],
    detail_fields: &[
        "make",
        "model",
        "year",
        "mileage",
        "fuel_type",
        "transmission",
        "doors",
        "color",
        "condition",
    ],
    vocabularies: &[
        Vocabulary {
            name: "marques",
            options: &[
                "Toyota",
                "Nissan",
                "Mercedes",
                "BMW",
                "Audi",
                "Volkswagen",
                "Peugeot",
                "Renault",
                "Hyundai",
                "Kia",
                "Honda",
                "Ford",
                "Autre",
            ],
        },
        Vocabulary {
            name: "carburants",
            options: &["Essence", "Diesel", "Électrique", "Hybride"],
        },
        Vocabulary {
            name: "boites",
            options: &["Manuelle", "Automatique"],
        },
        Vocabulary {
            name: "etats",
            options: &[
                "Neuf",
                "Occasion - Très bon état",
                "Occasion - Bon état",
                "À réparer",
            ],
        },
        Vocabulary {
            name: "options",
            options: &[
                "Climatisation",
                "GPS",
                "Caméra de recul",
                "Airbags",
                "Jantes alu",
                "Bluetooth",
                "ABS",
                "Régulateur de vitesse",
            ],
        },
    ],
};

#[cfg(test)]
mod spec {
    use crate::domain::listing::Category;

    use super::{all, of};

    #[test]
    fn every_category_has_sub_categories() {
        for schema in all() {
            assert!(!schema.sub_categories.is_empty(), "{:?}", schema.category);
        }
    }

    #[test]
    fn sub_category_lookup() {
        let schema = of(Category::RealEstate);
        assert!(schema.has_sub_category("local_commercial"));
        assert!(!schema.has_sub_category("voiture"));
    }

    #[test]
    fn vocabulary_lookup() {
        let schema = of(Category::Vehicle);
        assert!(schema.vocabulary_contains("marques", "Toyota"));
        assert!(schema.vocabulary_contains("carburants", "Diesel"));
        assert!(!schema.vocabulary_contains("marques", "Lada"));
        assert!(schema.vocabulary("equipements").is_none());
    }
}
