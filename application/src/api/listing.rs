//! [`Listing`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLObject, GraphQLScalar, GraphQLUnion,
};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// A published classified listing.
#[derive(Clone, Debug, From)]
pub struct Listing(domain::Listing);

/// A published classified listing.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// URL-safe slug of this `Listing`, derived from its title.
    #[must_use]
    pub fn slug(&self) -> Slug {
        self.0.slug.clone().into()
    }

    /// Title of this `Listing`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Transaction kind of this `Listing`.
    #[must_use]
    pub fn transaction_kind(&self) -> TransactionKind {
        self.0.transaction_kind.into()
    }

    /// Category of this `Listing`.
    #[must_use]
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// Sub-category of this `Listing`.
    #[must_use]
    pub fn sub_category(&self) -> SubCategory {
        self.0.sub_category.clone().into()
    }

    /// City this `Listing` is located in.
    #[must_use]
    pub fn city(&self) -> City {
        self.0.city.clone().into()
    }

    /// Neighborhood this `Listing` is located in, if provided.
    #[must_use]
    pub fn neighborhood(&self) -> Option<Neighborhood> {
        self.0.neighborhood.clone().map(Into::into)
    }

    /// Sale price of this `Listing`, absent for pure rentals.
    #[must_use]
    pub fn price(&self) -> Option<Money> {
        self.0.price
    }

    /// Indicator whether the price of this `Listing` is negotiable.
    #[must_use]
    pub fn is_negotiable(&self) -> bool {
        self.0.is_negotiable
    }

    /// Rental terms of this `Listing`, absent for pure sales.
    #[must_use]
    pub fn rental(&self) -> Option<RentalTerms> {
        self.0.rental.map(Into::into)
    }

    /// Description of this `Listing`.
    #[must_use]
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Category-specific details of this `Listing`.
    #[must_use]
    pub fn details(&self) -> Details {
        self.0.details.clone().into()
    }

    /// Public URLs of the photos of this `Listing`.
    #[must_use]
    pub fn photos(&self) -> Vec<MediaUrl> {
        self.0.photos.iter().cloned().map(Into::into).collect()
    }

    /// Completeness classification of this `Listing`.
    #[must_use]
    pub fn quality(&self) -> QualityLabel {
        self.0.quality.into()
    }

    /// Operator contact block of this `Listing`.
    #[must_use]
    pub fn contact(&self) -> Contact {
        self.0.contact.clone().into()
    }

    /// Status of this `Listing`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `DateTime` when this `Listing` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Listing` was updated the last time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Listing`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// URL-safe slug of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ListingSlug", with = scalar::Via::<domain::listing::Slug>)]
pub struct Slug(domain::listing::Slug);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Sub-category of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SubCategory",
    with = scalar::Via::<domain::listing::SubCategory>,
)]
pub struct SubCategory(domain::listing::SubCategory);

/// City a `Listing` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "City", with = scalar::Via::<domain::listing::City>)]
pub struct City(domain::listing::City);

/// Neighborhood a `Listing` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "Neighborhood",
    with = scalar::Via::<domain::listing::Neighborhood>,
)]
pub struct Neighborhood(domain::listing::Neighborhood);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Public URL of an uploaded media file.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MediaUrl",
    with = scalar::Via::<domain::listing::MediaUrl>,
)]
pub struct MediaUrl(domain::listing::MediaUrl);

/// Transaction kind of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum TransactionKind {
    /// The listed asset is for sale.
    Sale,

    /// The listed asset is for rent.
    Rental,

    /// The listed asset is both for sale and for rent.
    SaleOrRental,
}

impl From<domain::listing::TransactionKind> for TransactionKind {
    fn from(kind: domain::listing::TransactionKind) -> Self {
        use domain::listing::TransactionKind as K;
        match kind {
            K::Sale => Self::Sale,
            K::Rental => Self::Rental,
            K::SaleOrRental => Self::SaleOrRental,
        }
    }
}

impl From<TransactionKind> for domain::listing::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        use TransactionKind as K;
        match kind {
            K::Sale => Self::Sale,
            K::Rental => Self::Rental,
            K::SaleOrRental => Self::SaleOrRental,
        }
    }
}

/// Category of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Category {
    /// Real estate (houses, apartments, offices, ...).
    RealEstate,

    /// Land plots.
    Land,

    /// Vehicles.
    Vehicle,
}

impl From<domain::listing::Category> for Category {
    fn from(category: domain::listing::Category) -> Self {
        use domain::listing::Category as C;
        match category {
            C::RealEstate => Self::RealEstate,
            C::Land => Self::Land,
            C::Vehicle => Self::Vehicle,
        }
    }
}

impl From<Category> for domain::listing::Category {
    fn from(category: Category) -> Self {
        use Category as C;
        match category {
            C::RealEstate => Self::RealEstate,
            C::Land => Self::Land,
            C::Vehicle => Self::Vehicle,
        }
    }
}

/// Status of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Status {
    /// Visible to everyone.
    Active,

    /// Temporarily hidden by the admin.
    Paused,

    /// Archived by the admin.
    Archived,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;
        match status {
            S::Active => Self::Active,
            S::Paused => Self::Paused,
            S::Archived => Self::Archived,
        }
    }
}

impl From<Status> for domain::listing::Status {
    fn from(status: Status) -> Self {
        use Status as S;
        match status {
            S::Active => Self::Active,
            S::Paused => Self::Paused,
            S::Archived => Self::Archived,
        }
    }
}

/// Completeness classification of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum QualityLabel {
    /// At least 80% of the scored criteria are met.
    Complete,

    /// At least 50% of the scored criteria are met.
    Partial,

    /// Less than 50% of the scored criteria are met.
    Incomplete,
}

impl From<domain::listing::QualityLabel> for QualityLabel {
    fn from(label: domain::listing::QualityLabel) -> Self {
        use domain::listing::QualityLabel as L;
        match label {
            L::Complete => Self::Complete,
            L::Partial => Self::Partial,
            L::Incomplete => Self::Incomplete,
        }
    }
}

/// Rental terms of a `Listing`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct RentalTerms {
    /// Monthly rent.
    pub monthly_rent: Money,

    /// Security deposit, if required.
    pub deposit: Option<Money>,

    /// Number of months to pay in advance.
    pub advance_months: i32,

    /// Indicator whether utility charges are included into the rent.
    pub charges_included: bool,
}

impl From<domain::listing::RentalTerms> for RentalTerms {
    fn from(terms: domain::listing::RentalTerms) -> Self {
        Self {
            monthly_rent: terms.monthly_rent,
            deposit: terms.deposit,
            advance_months: i32::from(terms.advance_months),
            charges_included: terms.charges_included,
        }
    }
}

/// Operator contact block of a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Contact {
    /// Displayed operator name.
    pub name: String,

    /// Operator phone number.
    pub phone: String,

    /// Operator email address.
    pub email: String,
}

impl From<domain::listing::Contact> for Contact {
    fn from(contact: domain::listing::Contact) -> Self {
        Self {
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
        }
    }
}

/// Category-specific details of a `Listing`.
#[derive(Clone, Debug, From, GraphQLUnion)]
#[graphql(context = Context)]
pub enum Details {
    /// Details of a real estate `Listing`.
    RealEstate(RealEstateDetails),

    /// Details of a land plot `Listing`.
    Land(LandDetails),

    /// Details of a vehicle `Listing`.
    Vehicle(VehicleDetails),
}

impl From<domain::listing::Details> for Details {
    fn from(details: domain::listing::Details) -> Self {
        use domain::listing::Details as D;
        match details {
            D::RealEstate(d) => Self::RealEstate(d.into()),
            D::Land(d) => Self::Land(d.into()),
            D::Vehicle(d) => Self::Vehicle(d.into()),
        }
    }
}

/// Saturating [`i32`] representation of an unsigned counter.
fn int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Details of a real estate `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct RealEstateDetails {
    /// Number of bedrooms.
    pub bedrooms: Option<i32>,

    /// Number of living rooms.
    pub living_rooms: Option<i32>,

    /// Number of bathrooms.
    pub bathrooms: Option<i32>,

    /// Living area in square meters.
    pub living_area: Option<i32>,

    /// Land area in square meters.
    pub land_area: Option<i32>,

    /// Number of floors.
    pub floors: Option<i32>,

    /// Year the building was built.
    pub year_built: Option<i32>,

    /// Selected amenities.
    pub amenities: Vec<String>,
}

impl From<domain::listing::details::RealEstateDetails> for RealEstateDetails {
    fn from(d: domain::listing::details::RealEstateDetails) -> Self {
        Self {
            bedrooms: d.bedrooms.map(i32::from),
            living_rooms: d.living_rooms.map(i32::from),
            bathrooms: d.bathrooms.map(i32::from),
            living_area: d.living_area.map(int),
            land_area: d.land_area.map(int),
            floors: d.floors.map(i32::from),
            year_built: d.year_built.map(i32::from),
            amenities: d.amenities,
        }
    }
}

/// Details of a land plot `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct LandDetails {
    /// Plot area in square meters.
    pub area: Option<i32>,

    /// Indicator whether the plot has road access.
    pub has_road_access: bool,

    /// Indicator whether the plot is flat.
    pub is_flat: bool,

    /// Indicator whether the plot is surveyed.
    pub is_surveyed: bool,

    /// Indicator whether the plot has a land title deed.
    pub has_deed: bool,

    /// Indicator whether the plot is part of a subdivision.
    pub is_subdivided: bool,

    /// Available utilities.
    pub utilities: Vec<String>,
}

impl From<domain::listing::details::LandDetails> for LandDetails {
    fn from(d: domain::listing::details::LandDetails) -> Self {
        Self {
            area: d.area.map(int),
            has_road_access: d.has_road_access,
            is_flat: d.is_flat,
            is_surveyed: d.is_surveyed,
            has_deed: d.has_deed,
            is_subdivided: d.is_subdivided,
            utilities: d.utilities,
        }
    }
}

/// Details of a vehicle `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct VehicleDetails {
    /// Make of the vehicle.
    pub make: Option<String>,

    /// Model of the vehicle.
    pub model: Option<String>,

    /// Year of manufacture.
    pub year: Option<i32>,

    /// Mileage in kilometers.
    pub mileage: Option<i32>,

    /// Fuel type.
    pub fuel_type: Option<String>,

    /// Transmission.
    pub transmission: Option<String>,

    /// Number of doors.
    pub doors: Option<i32>,

    /// Color of the vehicle.
    pub color: Option<String>,

    /// Condition of the vehicle.
    pub condition: Option<String>,

    /// Selected options.
    pub options: Vec<String>,
}

impl From<domain::listing::details::VehicleDetails> for VehicleDetails {
    fn from(d: domain::listing::details::VehicleDetails) -> Self {
        Self {
            make: d.make,
            model: d.model,
            year: d.year.map(i32::from),
            mileage: d.mileage.map(int),
            fuel_type: d.fuel_type,
            transmission: d.transmission,
            doors: d.doors.map(i32::from),
            color: d.color,
            condition: d.condition,
            options: d.options,
        }
    }
}
