//! Draft form session definitions.

use common::{Money, Percent};
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use service::{
    domain::{
        self,
        draft,
        listing::details::{LandPatch, RealEstatePatch, VehiclePatch},
    },
    infra::sessions,
};
use uuid::Uuid;

use crate::{api, Context, Error};

/// State of a draft form session.
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the owning session.
    id: Id,

    /// Underlying domain draft.
    draft: domain::Draft,
}

impl Draft {
    /// Creates a new [`Draft`] view over the given session state.
    #[must_use]
    pub(crate) fn new(id: sessions::Id, draft: domain::Draft) -> Self {
        Self {
            id: id.into(),
            draft,
        }
    }
}

/// State of a draft form session.
#[graphql_object(context = Context)]
impl Draft {
    /// ID of the draft form session.
    #[must_use]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Current wizard step of the draft.
    #[must_use]
    pub fn step(&self) -> Step {
        self.draft.step().into()
    }

    /// Selected transaction kind.
    #[must_use]
    pub fn transaction_kind(&self) -> api::listing::TransactionKind {
        self.draft.transaction_kind().into()
    }

    /// Selected category, if any.
    #[must_use]
    pub fn category(&self) -> Option<api::listing::Category> {
        self.draft.category().map(Into::into)
    }

    /// Selected sub-category, if any.
    #[must_use]
    pub fn sub_category(&self) -> Option<api::listing::SubCategory> {
        self.draft.sub_category().cloned().map(Into::into)
    }

    /// Current title, either auto-derived or user-provided.
    #[must_use]
    pub fn title(&self) -> Option<api::listing::Title> {
        self.draft.title().cloned().map(Into::into)
    }

    /// Selected city, if any.
    #[must_use]
    pub fn city(&self) -> Option<api::listing::City> {
        self.draft.city().cloned().map(Into::into)
    }

    /// Selected neighborhood, if any.
    #[must_use]
    pub fn neighborhood(&self) -> Option<api::listing::Neighborhood> {
        self.draft.neighborhood().cloned().map(Into::into)
    }

    /// Sale price, if provided.
    #[must_use]
    pub fn price(&self) -> Option<Money> {
        self.draft.price()
    }

    /// Indicator whether the price is negotiable.
    #[must_use]
    pub fn is_negotiable(&self) -> bool {
        self.draft.is_negotiable()
    }

    /// Description, if provided.
    #[must_use]
    pub fn description(&self) -> Option<api::listing::Description> {
        self.draft.description().cloned().map(Into::into)
    }

    /// Monthly rent, if provided.
    #[must_use]
    pub fn monthly_rent(&self) -> Option<Money> {
        self.draft.rental().monthly_rent
    }

    /// Security deposit, if provided.
    #[must_use]
    pub fn deposit(&self) -> Option<Money> {
        self.draft.rental().deposit
    }

    /// Number of rent months to pay in advance.
    #[must_use]
    pub fn advance_months(&self) -> i32 {
        i32::from(self.draft.rental().advance_months)
    }

    /// Indicator whether utility charges are included into the rent.
    #[must_use]
    pub fn charges_included(&self) -> bool {
        self.draft.rental().charges_included
    }

    /// Category-specific details, present once a category is selected.
    #[must_use]
    pub fn details(&self) -> Option<api::listing::Details> {
        self.draft.details().cloned().map(Into::into)
    }

    /// Photos of the draft, in decode-completion order.
    #[must_use]
    pub fn photos(&self) -> Vec<Photo> {
        self.draft
            .photos()
            .iter()
            .map(|p| Photo {
                name: p.name.clone(),
                preview: p.preview.uri(),
            })
            .collect()
    }

    /// Continuously recomputed completeness score of the draft.
    #[must_use]
    pub fn quality(&self) -> Quality {
        self.draft.quality().into()
    }

    /// Neighborhoods selectable for the currently selected city.
    #[must_use]
    pub fn available_neighborhoods(&self) -> Vec<String> {
        self.draft
            .available_neighborhoods()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect()
    }

    /// ID of the listing being edited, if the draft was opened for editing.
    #[must_use]
    pub fn listing_id(&self) -> Option<api::listing::Id> {
        self.draft.listing_id().map(Into::into)
    }
}

/// ID of a draft form session.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(sessions::Id)]
#[into(sessions::Id)]
#[graphql(name = "DraftId", transparent)]
pub struct Id(Uuid);

/// Wizard step of a draft.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Step {
    /// A category must be selected.
    Category,

    /// A sub-category must be selected.
    SubCategory,

    /// All the remaining sections are editable.
    Unlocked,
}

impl From<draft::Step> for Step {
    fn from(step: draft::Step) -> Self {
        use draft::Step as S;
        match step {
            S::Category => Self::Category,
            S::SubCategory => Self::SubCategory,
            S::Unlocked => Self::Unlocked,
        }
    }
}

/// Completeness score of a draft.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context, name = "DraftQuality")]
pub struct Quality {
    /// Number of satisfied criteria.
    pub score: i32,

    /// Number of criteria applicable to the draft.
    pub total: i32,

    /// Score as a percentage.
    pub percent: Percent,

    /// Three-tier classification of the score.
    pub label: api::listing::QualityLabel,
}

impl From<draft::Quality> for Quality {
    fn from(quality: draft::Quality) -> Self {
        Self {
            score: i32::from(quality.score),
            total: i32::from(quality.total),
            percent: quality.percent(),
            label: quality.label().into(),
        }
    }
}

/// Photo attached to a draft.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "DraftPhoto")]
pub struct Photo {
    /// Display name of the photo.
    pub name: String,

    /// Previewable URI of the photo: a `data:` URI until uploaded, the
    /// public URL afterwards.
    pub preview: String,
}

/// Photo payload to decode and attach to a draft.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct PhotoUpload {
    /// Display name of the photo file.
    pub name: String,

    /// `data:` URI of the photo content.
    pub data_uri: String,
}

/// Field-by-field patch of a draft.
///
/// An absent field is left untouched. The clearable text fields (`title`,
/// `neighborhood`, `description`) interpret an empty string as removal.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct DraftPatch {
    /// New transaction kind.
    pub transaction_kind: Option<api::listing::TransactionKind>,

    /// New category.
    pub category: Option<api::listing::Category>,

    /// New sub-category.
    pub sub_category: Option<String>,

    /// New user-provided title, or an empty string to clear it.
    pub title: Option<String>,

    /// New city.
    pub city: Option<String>,

    /// New neighborhood, or an empty string to clear it.
    pub neighborhood: Option<String>,

    /// New sale price.
    pub price: Option<Money>,

    /// New negotiability indicator.
    pub is_negotiable: Option<bool>,

    /// New description, or an empty string to clear it.
    pub description: Option<String>,

    /// New monthly rent.
    pub monthly_rent: Option<Money>,

    /// New security deposit.
    pub deposit: Option<Money>,

    /// New number of rent months to pay in advance.
    pub advance_months: Option<i32>,

    /// New charges-included indicator.
    pub charges_included: Option<bool>,

    /// Patch of the real estate detail bag.
    pub real_estate: Option<RealEstateDetailsInput>,

    /// Patch of the land detail bag.
    pub land: Option<LandDetailsInput>,

    /// Patch of the vehicle detail bag.
    pub vehicle: Option<VehicleDetailsInput>,
}

/// Patch of the real estate detail bag.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct RealEstateDetailsInput {
    /// New number of bedrooms.
    pub bedrooms: Option<i32>,

    /// New number of living rooms.
    pub living_rooms: Option<i32>,

    /// New number of bathrooms.
    pub bathrooms: Option<i32>,

    /// New living area in square meters.
    pub living_area: Option<i32>,

    /// New land area in square meters.
    pub land_area: Option<i32>,

    /// New number of floors.
    pub floors: Option<i32>,

    /// New year the building was built.
    pub year_built: Option<i32>,

    /// New selection of amenities.
    pub amenities: Option<Vec<String>>,
}

/// Patch of the land detail bag.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct LandDetailsInput {
    /// New plot area in square meters.
    pub area: Option<i32>,

    /// New road access indicator.
    pub has_road_access: Option<bool>,

    /// New flatness indicator.
    pub is_flat: Option<bool>,

    /// New survey indicator.
    pub is_surveyed: Option<bool>,

    /// New land title deed indicator.
    pub has_deed: Option<bool>,

    /// New subdivision indicator.
    pub is_subdivided: Option<bool>,

    /// New selection of utilities.
    pub utilities: Option<Vec<String>>,
}

/// Patch of the vehicle detail bag.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct VehicleDetailsInput {
    /// New make of the vehicle.
    pub make: Option<String>,

    /// New model of the vehicle.
    pub model: Option<String>,

    /// New year of manufacture.
    pub year: Option<i32>,

    /// New mileage in kilometers.
    pub mileage: Option<i32>,

    /// New fuel type.
    pub fuel_type: Option<String>,

    /// New transmission.
    pub transmission: Option<String>,

    /// New number of doors.
    pub doors: Option<i32>,

    /// New color of the vehicle.
    pub color: Option<String>,

    /// New condition of the vehicle.
    pub condition: Option<String>,

    /// New selection of options.
    pub options: Option<Vec<String>>,
}

/// Converts the given [`i32`] into the unsigned integer a detail field
/// expects.
fn int<T: TryFrom<i32>>(field: &str, value: i32) -> Result<T, Error> {
    T::try_from(value)
        .map_err(|_| Error::invalid_input(&format!("`{field}` is out of range")))
}

/// Parses the given string through `T`'s [`FromStr`], rejecting invalid
/// values as `INVALID_INPUT`.
///
/// [`FromStr`]: std::str::FromStr
fn parse<T>(field: &str, value: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| {
        Error::invalid_input(&format!("`{field}`: {e}"))
    })
}

/// Parses a clearable text field: an empty string clears it.
fn parse_clearable<T>(
    field: &str,
    value: Option<String>,
) -> Result<Option<Option<T>>, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|s| {
            if s.is_empty() {
                Ok(None)
            } else {
                parse(field, &s).map(Some)
            }
        })
        .transpose()
}

impl TryFrom<DraftPatch> for draft::Patch {
    type Error = Error;

    fn try_from(patch: DraftPatch) -> Result<Self, Self::Error> {
        let DraftPatch {
            transaction_kind,
            category,
            sub_category,
            title,
            city,
            neighborhood,
            price,
            is_negotiable,
            description,
            monthly_rent,
            deposit,
            advance_months,
            charges_included,
            real_estate,
            land,
            vehicle,
        } = patch;

        Ok(Self {
            transaction_kind: transaction_kind.map(Into::into),
            category: category.map(Into::into),
            sub_category: sub_category
                .map(|s| parse("sub_category", &s))
                .transpose()?,
            title: parse_clearable("title", title)?,
            city: city.map(|s| parse("city", &s)).transpose()?,
            neighborhood: parse_clearable("neighborhood", neighborhood)?,
            price,
            is_negotiable,
            description: parse_clearable("description", description)?,
            monthly_rent,
            deposit,
            advance_months: advance_months
                .map(|v| int("advance_months", v))
                .transpose()?,
            charges_included,
            real_estate: real_estate.map(TryInto::try_into).transpose()?,
            land: land.map(TryInto::try_into).transpose()?,
            vehicle: vehicle.map(TryInto::try_into).transpose()?,
        })
    }
}

impl TryFrom<RealEstateDetailsInput> for RealEstatePatch {
    type Error = Error;

    fn try_from(input: RealEstateDetailsInput) -> Result<Self, Self::Error> {
        let RealEstateDetailsInput {
            bedrooms,
            living_rooms,
            bathrooms,
            living_area,
            land_area,
            floors,
            year_built,
            amenities,
        } = input;

        Ok(Self {
            bedrooms: bedrooms.map(|v| int("bedrooms", v)).transpose()?,
            living_rooms: living_rooms
                .map(|v| int("living_rooms", v))
                .transpose()?,
            bathrooms: bathrooms.map(|v| int("bathrooms", v)).transpose()?,
            living_area: living_area
                .map(|v| int("living_area", v))
                .transpose()?,
            land_area: land_area.map(|v| int("land_area", v)).transpose()?,
            floors: floors.map(|v| int("floors", v)).transpose()?,
            year_built: year_built.map(|v| int("year_built", v)).transpose()?,
            amenities,
        })
    }
}

impl TryFrom<LandDetailsInput> for LandPatch {
    type Error = Error;

    fn try_from(input: LandDetailsInput) -> Result<Self, Self::Error> {
        let LandDetailsInput {
            area,
            has_road_access,
            is_flat,
            is_surveyed,
            has_deed,
            is_subdivided,
            utilities,
        } = input;

        Ok(Self {
            area: area.map(|v| int("area", v)).transpose()?,
            has_road_access,
            is_flat,
            is_surveyed,
            has_deed,
            is_subdivided,
            utilities,
        })
    }
}

impl TryFrom<VehicleDetailsInput> for VehiclePatch {
    type Error = Error;

    fn try_from(input: VehicleDetailsInput) -> Result<Self, Self::Error> {
        let VehicleDetailsInput {
            make,
            model,
            year,
            mileage,
            fuel_type,
            transmission,
            doors,
            color,
            condition,
            options,
        } = input;

        Ok(Self {
            make,
            model,
            year: year.map(|v| int("year", v)).transpose()?,
            mileage: mileage.map(|v| int("mileage", v)).transpose()?,
            fuel_type,
            transmission,
            doors: doors.map(|v| int("doors", v)).transpose()?,
            color,
            condition,
            options,
        })
    }
}
