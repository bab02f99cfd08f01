//! [`Listing`] definitions.

pub mod details;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use unicode_normalization::{
    char::is_combining_mark, UnicodeNormalization as _,
};
use uuid::Uuid;

pub use self::details::Details;

/// Published classified listing.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// URL-safe [`Slug`] derived from the [`Title`] of this [`Listing`].
    pub slug: Slug,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`TransactionKind`] of this [`Listing`].
    pub transaction_kind: TransactionKind,

    /// [`Category`] of this [`Listing`].
    pub category: Category,

    /// [`SubCategory`] of this [`Listing`].
    pub sub_category: SubCategory,

    /// [`City`] this [`Listing`] is located in.
    pub city: City,

    /// [`Neighborhood`] this [`Listing`] is located in, if provided.
    pub neighborhood: Option<Neighborhood>,

    /// Sale price of this [`Listing`].
    ///
    /// Always present unless the [`TransactionKind`] is a pure rental.
    pub price: Option<Money>,

    /// Indicator whether the price of this [`Listing`] is negotiable.
    pub is_negotiable: bool,

    /// [`RentalTerms`] of this [`Listing`].
    ///
    /// Always present unless the [`TransactionKind`] is a pure sale.
    pub rental: Option<RentalTerms>,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// Category-specific [`Details`] of this [`Listing`].
    pub details: Details,

    /// Uploaded photos of this [`Listing`], in draft order.
    pub photos: Vec<MediaUrl>,

    /// [`QualityLabel`] this [`Listing`] was classified with on submission.
    pub quality: QualityLabel,

    /// Operator [`Contact`] block of this [`Listing`].
    pub contact: Contact,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// [`DateTime`] when this [`Listing`] was created.
    #[cfg_attr(
        feature = "serde",
        serde(with = "common::datetime::serde::unix_timestamp")
    )]
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Listing`] was updated the last time.
    #[cfg_attr(
        feature = "serde",
        serde(with = "common::datetime::serde::unix_timestamp")
    )]
    pub updated_at: UpdateDateTime,
}

/// New [`Listing`] record to be persisted.
///
/// The store assigns the [`Id`] and both timestamps, so this is a [`Listing`]
/// without them.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct New {
    /// URL-safe [`Slug`] of the new [`Listing`].
    pub slug: Slug,

    /// [`Title`] of the new [`Listing`].
    pub title: Title,

    /// [`TransactionKind`] of the new [`Listing`].
    pub transaction_kind: TransactionKind,

    /// [`Category`] of the new [`Listing`].
    pub category: Category,

    /// [`SubCategory`] of the new [`Listing`].
    pub sub_category: SubCategory,

    /// [`City`] of the new [`Listing`].
    pub city: City,

    /// [`Neighborhood`] of the new [`Listing`].
    pub neighborhood: Option<Neighborhood>,

    /// Sale price of the new [`Listing`].
    pub price: Option<Money>,

    /// Indicator whether the price is negotiable.
    pub is_negotiable: bool,

    /// [`RentalTerms`] of the new [`Listing`].
    pub rental: Option<RentalTerms>,

    /// [`Description`] of the new [`Listing`].
    pub description: Description,

    /// Category-specific [`Details`] of the new [`Listing`].
    pub details: Details,

    /// Uploaded photos of the new [`Listing`].
    pub photos: Vec<MediaUrl>,

    /// [`QualityLabel`] of the new [`Listing`].
    pub quality: QualityLabel,

    /// Operator [`Contact`] block of the new [`Listing`].
    pub contact: Contact,

    /// [`Status`] of the new [`Listing`].
    pub status: Status,
}

impl From<Listing> for New {
    fn from(listing: Listing) -> Self {
        let Listing {
            id: _,
            slug,
            title,
            transaction_kind,
            category,
            sub_category,
            city,
            neighborhood,
            price,
            is_negotiable,
            rental,
            description,
            details,
            photos,
            quality,
            contact,
            status,
            created_at: _,
            updated_at: _,
        } = listing;

        Self {
            slug,
            title,
            transaction_kind,
            category,
            sub_category,
            city,
            neighborhood,
            price,
            is_negotiable,
            rental,
            description,
            details,
            photos,
            quality,
            contact,
            status,
        }
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Listing`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// URL-safe slug of a [`Listing`], derived from its [`Title`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Slug(String);

impl Slug {
    /// Derives a new [`Slug`] from the given [`Title`]: lowercases it, strips
    /// diacritics (NFD normalization with combining marks removed), collapses
    /// every run of non-`[a-z0-9]` characters into a single hyphen, and trims
    /// leading/trailing hyphens.
    ///
    /// The derivation is total and idempotent.
    #[must_use]
    pub fn new(title: &Title) -> Self {
        let raw: &str = title.as_ref();
        let mut slug = String::with_capacity(raw.len());
        let mut gap = false;
        for c in raw.nfd() {
            if is_combining_mark(c) {
                continue;
            }
            for c in c.to_lowercase() {
                if c.is_ascii_alphanumeric() {
                    if gap && !slug.is_empty() {
                        slug.push('-');
                    }
                    gap = false;
                    slug.push(c);
                } else {
                    gap = true;
                }
            }
        }
        Self(slug)
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        let slug = slug.as_ref();
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::check(s)
            .then(|| Self(s.to_owned()))
            .ok_or("invalid `Slug`")
    }
}

/// Sub-category of a [`Listing`], drawn from the registry-defined list of its
/// [`Category`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct SubCategory(String);

impl SubCategory {
    /// Creates a new [`SubCategory`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `value` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a new [`SubCategory`] if the given `value` is valid.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Self::check(&value).then_some(Self(value))
    }

    /// Checks whether the given `value` is a valid [`SubCategory`].
    fn check(value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        !value.is_empty()
            && value.len() <= 64
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}

impl FromStr for SubCategory {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SubCategory`")
    }
}

/// City a [`Listing`] is located in.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct City(String);

impl City {
    /// Creates a new [`City`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `city` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        Self::check(&city).then_some(Self(city))
    }

    /// Checks whether the given `city` is a valid [`City`].
    fn check(city: impl AsRef<str>) -> bool {
        let city = city.as_ref();
        city.trim() == city && !city.is_empty() && city.len() <= 512
    }
}

impl FromStr for City {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `City`")
    }
}

/// Neighborhood a [`Listing`] is located in.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Neighborhood(String);

impl Neighborhood {
    /// Creates a new [`Neighborhood`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Neighborhood`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Neighborhood`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Neighborhood {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Neighborhood`")
    }
}

/// Description of a [`Listing`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Returns the number of characters in this [`Description`].
    #[must_use]
    pub fn chars_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 8192
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Public URL of an uploaded media file.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct MediaUrl(String);

impl MediaUrl {
    /// Creates a new [`MediaUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`MediaUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`MediaUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.trim() == url && !url.is_empty() && url.len() <= 2048
    }
}

impl FromStr for MediaUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `MediaUrl`")
    }
}

/// Rental terms of a [`Listing`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RentalTerms {
    /// Monthly rent.
    pub monthly_rent: Money,

    /// Security deposit, if required.
    pub deposit: Option<Money>,

    /// Number of months to pay in advance.
    pub advance_months: AdvanceMonths,

    /// Indicator whether utility charges are included into the rent.
    pub charges_included: bool,
}

/// Number of rent months to pay in advance.
pub type AdvanceMonths = u8;

/// Operator contact block of a [`Listing`].
///
/// Populated from the operator configuration, never from user input.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Contact {
    /// Displayed operator name.
    pub name: String,

    /// Operator phone number.
    pub phone: String,

    /// Operator email address.
    pub email: String,
}

define_kind! {
    #[doc = "Kind of the transaction a [`Listing`] is offered for."]
    enum TransactionKind {
        #[doc = "The listed asset is for sale."]
        Sale = 1,

        #[doc = "The listed asset is for rent."]
        Rental = 2,

        #[doc = "The listed asset is both for sale and for rent."]
        SaleOrRental = 3,
    }
}

impl TransactionKind {
    /// Indicates whether this [`TransactionKind`] includes a sale.
    #[must_use]
    pub const fn includes_sale(self) -> bool {
        matches!(self, Self::Sale | Self::SaleOrRental)
    }

    /// Indicates whether this [`TransactionKind`] includes a rental.
    #[must_use]
    pub const fn includes_rental(self) -> bool {
        matches!(self, Self::Rental | Self::SaleOrRental)
    }
}

define_kind! {
    #[doc = "Category of a [`Listing`]."]
    enum Category {
        #[doc = "Real estate (houses, apartments, offices, ...)."]
        RealEstate = 1,

        #[doc = "Land plots."]
        Land = 2,

        #[doc = "Vehicles."]
        Vehicle = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Listing`]."]
    enum Status {
        #[doc = "Visible to everyone."]
        Active = 1,

        #[doc = "Temporarily hidden by the admin."]
        Paused = 2,

        #[doc = "Archived by the admin."]
        Archived = 3,
    }
}

define_kind! {
    #[doc = "Completeness classification of a [`Listing`]."]
    enum QualityLabel {
        #[doc = "At least 80% of the scored criteria are met."]
        Complete = 1,

        #[doc = "At least 50% of the scored criteria are met."]
        Partial = 2,

        #[doc = "Less than 50% of the scored criteria are met."]
        Incomplete = 3,
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] was updated.
pub type UpdateDateTime = DateTimeOf<(Listing, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{Slug, Title};

    fn title(s: &str) -> Title {
        Title::new(s).unwrap()
    }

    fn slug(s: &str) -> String {
        Slug::new(&title(s)).to_string()
    }

    #[test]
    fn slug_from_plain_title() {
        assert_eq!(
            slug("Toyota Land Cruiser - Port-Gentil"),
            "toyota-land-cruiser-port-gentil",
        );
    }

    #[test]
    fn slug_strips_diacritics() {
        assert_eq!(
            slug("Maison 4 chambres à Nzeng-Ayong – Libreville"),
            "maison-4-chambres-a-nzeng-ayong-libreville",
        );
        assert_eq!(
            slug("Terrain borné à Akébé Plaine"),
            "terrain-borne-a-akebe-plaine",
        );
    }

    #[test]
    fn slug_collapses_separator_runs() {
        assert_eq!(slug("Studio   meublé -- Owendo !!"), "studio-meuble-owendo");
    }

    #[test]
    fn slug_never_keeps_boundary_hyphens() {
        for s in ["- Okala -", "(Glass)", "...PK8", "N°5, Centre-ville"] {
            let slug = slug(s);
            assert!(!slug.starts_with('-'), "{slug}");
            assert!(!slug.ends_with('-'), "{slug}");
        }
    }

    #[test]
    fn slug_is_total_over_printable_unicode() {
        for s in ["§±!@#$%^&*()", "日本語タイトル", "désolé, rien"] {
            let slug = slug(s);
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || c == '-'),
                "{slug}",
            );
        }
    }

    #[test]
    fn slug_is_idempotent() {
        for s in [
            "Toyota Land Cruiser - Port-Gentil",
            "Maison 4 chambres à Nzeng-Ayong – Libreville",
            "Terrain commercial 1200m² - Owendo",
        ] {
            let once = slug(s);
            let twice = slug(&once);
            assert_eq!(once, twice);
        }
    }
}
