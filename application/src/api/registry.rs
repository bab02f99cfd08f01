//! Category and location registry definitions.

use juniper::GraphQLObject;
use service::registry;

use crate::{api, Context};

/// Intake schema of a category: its sub-categories, applicable detail fields
/// and selectable option vocabularies.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct CategorySchema {
    /// Category this schema describes.
    pub category: api::listing::Category,

    /// Displayed label of the category.
    pub label: String,

    /// Selectable sub-categories, in declaration order.
    pub sub_categories: Vec<SubCategoryOption>,

    /// Names of the detail fields applicable to the category.
    pub detail_fields: Vec<String>,

    /// Named option vocabularies of the category.
    pub vocabularies: Vec<Vocabulary>,
}

impl From<&'static registry::category::Schema> for CategorySchema {
    fn from(schema: &'static registry::category::Schema) -> Self {
        Self {
            category: schema.category.into(),
            label: schema.label.to_owned(),
            sub_categories: schema
                .sub_categories
                .iter()
                .map(|o| SubCategoryOption {
                    value: o.value.to_owned(),
                    label: o.label.to_owned(),
                })
                .collect(),
            detail_fields: schema
                .detail_fields
                .iter()
                .map(|f| (*f).to_owned())
                .collect(),
            vocabularies: schema
                .vocabularies
                .iter()
                .map(|v| Vocabulary {
                    name: v.name.to_owned(),
                    options: v.options.iter().map(|o| (*o).to_owned()).collect(),
                })
                .collect(),
        }
    }
}

/// Selectable sub-category of a category.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct SubCategoryOption {
    /// Stored value of the sub-category.
    pub value: String,

    /// Displayed label of the sub-category.
    pub label: String,
}

/// Named vocabulary of selectable options.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Vocabulary {
    /// Name of the vocabulary.
    pub name: String,

    /// Selectable options, in declaration order.
    pub options: Vec<String>,
}
