//! [`Draft`] of a [`Listing`] under composition.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use common::{define_kind, Money, Percent};
use derive_more::{Debug, Display, Error};
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::domain::Listing;
use crate::registry;

use super::listing::{
    self,
    details::{LandPatch, RealEstatePatch, VehiclePatch},
    AdvanceMonths, Category, City, Description, Details, Neighborhood,
    QualityLabel, Title, TransactionKind,
};

/// Mutable draft of a [`Listing`], owned by a single form session.
///
/// The draft enforces the structural consistency of the intake wizard: its
/// detail bag always matches the selected [`Category`], the neighborhood
/// always belongs to the selected [`City`], and general fields only become
/// editable once the category and sub-category steps are completed.
#[derive(Clone, Debug, SmartDefault)]
pub struct Draft {
    /// Selected [`TransactionKind`].
    ///
    /// Pre-selected, so the wizard never blocks on it.
    #[default(TransactionKind::Sale)]
    transaction_kind: TransactionKind,

    /// Selected [`Category`], if any.
    category: Option<Category>,

    /// Selected [`SubCategory`], if any.
    ///
    /// [`SubCategory`]: listing::SubCategory
    sub_category: Option<listing::SubCategory>,

    /// Current [`Title`], either auto-derived or user-provided.
    title: Option<Title>,

    /// One-way latch: set the instant the user edits the title directly, and
    /// never re-enabled within the same draft.
    title_edited: bool,

    /// Selected [`City`], if any.
    city: Option<City>,

    /// Selected [`Neighborhood`], if any.
    neighborhood: Option<Neighborhood>,

    /// Sale price, if provided.
    price: Option<Money>,

    /// Indicator whether the price is negotiable.
    is_negotiable: bool,

    /// [`Description`], if provided.
    description: Option<Description>,

    /// Rental terms of this [`Draft`].
    rental: Rental,

    /// Category-specific detail bag.
    ///
    /// [`None`] until a [`Category`] is selected; always shaped after the
    /// selected one afterwards.
    details: Option<Details>,

    /// Photos of this [`Draft`], in decode-completion order.
    photos: Vec<Photo>,

    /// ID of the [`Listing`] this [`Draft`] was hydrated from, if any.
    listing_id: Option<listing::Id>,
}

/// In-progress rental terms of a [`Draft`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Rental {
    /// Monthly rent, if provided.
    pub monthly_rent: Option<Money>,

    /// Security deposit, if provided.
    pub deposit: Option<Money>,

    /// Number of months to pay in advance.
    #[default(1)]
    pub advance_months: AdvanceMonths,

    /// Indicator whether utility charges are included into the rent.
    pub charges_included: bool,
}

/// Photo attached to a [`Draft`].
#[derive(Clone, Debug)]
pub struct Photo {
    /// Display name of this [`Photo`].
    pub name: String,

    /// Previewable representation of this [`Photo`].
    pub preview: Preview,
}

/// Previewable representation of a [`Photo`].
#[derive(Clone, Debug)]
pub enum Preview {
    /// Freshly decoded photo content, not uploaded yet.
    Content {
        /// MIME type of the content.
        mime: String,

        /// Raw bytes of the content.
        #[debug(skip)]
        bytes: Vec<u8>,
    },

    /// Photo already uploaded to the media storage (edit flow).
    Url(listing::MediaUrl),
}

impl Preview {
    /// Returns the previewable URI of this [`Preview`]: a `data:` URI for
    /// not-yet-uploaded content, or the public URL otherwise.
    #[must_use]
    pub fn uri(&self) -> String {
        match self {
            Self::Content { mime, bytes } => {
                format!("data:{mime};base64,{}", BASE64.encode(bytes))
            }
            Self::Url(url) => url.to_string(),
        }
    }
}

define_kind! {
    #[doc = "Current step of the intake wizard of a [`Draft`]."]
    enum Step {
        #[doc = "A [`Category`] must be selected."]
        Category = 1,

        #[doc = "A sub-category must be selected."]
        SubCategory = 2,

        #[doc = "All the remaining sections are editable."]
        Unlocked = 3,
    }
}

/// Completeness score of a [`Draft`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quality {
    /// Number of satisfied criteria.
    pub score: u8,

    /// Number of criteria applicable to the current [`Draft`].
    pub total: u8,
}

impl Quality {
    /// Returns this [`Quality`] score as a [`Percent`].
    #[expect(clippy::missing_panics_doc, reason = "`total` is never zero")]
    #[must_use]
    pub fn percent(&self) -> Percent {
        Percent::from_ratio(self.score.into(), self.total.into())
            .expect("`total` is never zero")
    }

    /// Classifies this [`Quality`] score into a [`QualityLabel`].
    #[must_use]
    pub fn label(&self) -> QualityLabel {
        let pct = u32::from(self.score) * 100 / u32::from(self.total);
        if pct >= 80 {
            QualityLabel::Complete
        } else if pct >= 50 {
            QualityLabel::Partial
        } else {
            QualityLabel::Incomplete
        }
    }
}

/// Field-by-field patch of a [`Draft`].
///
/// `Option::Some` means "set this field"; the nested [`Option`]s of
/// clearable fields distinguish setting from clearing.
#[derive(Clone, Debug, Default)]
pub struct Patch {
    /// New [`TransactionKind`].
    pub transaction_kind: Option<TransactionKind>,

    /// New [`Category`].
    pub category: Option<Category>,

    /// New [`SubCategory`].
    ///
    /// [`SubCategory`]: listing::SubCategory
    pub sub_category: Option<listing::SubCategory>,

    /// New user-provided [`Title`] (or its removal).
    pub title: Option<Option<Title>>,

    /// New [`City`].
    pub city: Option<City>,

    /// New [`Neighborhood`] (or its removal).
    pub neighborhood: Option<Option<Neighborhood>>,

    /// New sale price.
    pub price: Option<Money>,

    /// New negotiability indicator.
    pub is_negotiable: Option<bool>,

    /// New [`Description`] (or its removal).
    pub description: Option<Option<Description>>,

    /// New monthly rent.
    pub monthly_rent: Option<Money>,

    /// New security deposit.
    pub deposit: Option<Money>,

    /// New number of advance months.
    pub advance_months: Option<AdvanceMonths>,

    /// New charges-included indicator.
    pub charges_included: Option<bool>,

    /// Patch of the real estate detail bag.
    pub real_estate: Option<RealEstatePatch>,

    /// Patch of the land detail bag.
    pub land: Option<LandPatch>,

    /// Patch of the vehicle detail bag.
    pub vehicle: Option<VehiclePatch>,
}

impl Draft {
    /// Creates a new empty [`Draft`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Draft`] pre-filled from an existing [`Listing`] (edit
    /// flow).
    ///
    /// The title latch is engaged: editing an existing record never
    /// re-derives its title.
    #[must_use]
    pub fn hydrate(listing: &listing::Listing) -> Self {
        Self {
            transaction_kind: listing.transaction_kind,
            category: Some(listing.category),
            sub_category: Some(listing.sub_category.clone()),
            title: Some(listing.title.clone()),
            title_edited: true,
            city: Some(listing.city.clone()),
            neighborhood: listing.neighborhood.clone(),
            price: listing.price,
            is_negotiable: listing.is_negotiable,
            description: Some(listing.description.clone()),
            rental: listing.rental.map_or_else(Rental::default, |r| Rental {
                monthly_rent: Some(r.monthly_rent),
                deposit: r.deposit,
                advance_months: r.advance_months,
                charges_included: r.charges_included,
            }),
            details: Some(listing.details.clone()),
            photos: listing
                .photos
                .iter()
                .map(|url| {
                    let path: &str = url.as_ref();
                    Photo {
                        name: path
                            .rsplit('/')
                            .next()
                            .unwrap_or("photo")
                            .to_owned(),
                        preview: Preview::Url(url.clone()),
                    }
                })
                .collect(),
            listing_id: Some(listing.id),
        }
    }

    /// Returns the current wizard [`Step`] of this [`Draft`].
    #[must_use]
    pub fn step(&self) -> Step {
        if self.category.is_none() {
            Step::Category
        } else if self.sub_category.is_none() {
            Step::SubCategory
        } else {
            Step::Unlocked
        }
    }

    /// Returns the selected [`TransactionKind`] of this [`Draft`].
    #[must_use]
    pub fn transaction_kind(&self) -> TransactionKind {
        self.transaction_kind
    }

    /// Returns the selected [`Category`] of this [`Draft`], if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Returns the selected sub-category of this [`Draft`], if any.
    #[must_use]
    pub fn sub_category(&self) -> Option<&listing::SubCategory> {
        self.sub_category.as_ref()
    }

    /// Returns the current [`Title`] of this [`Draft`], if any.
    #[must_use]
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Returns the selected [`City`] of this [`Draft`], if any.
    #[must_use]
    pub fn city(&self) -> Option<&City> {
        self.city.as_ref()
    }

    /// Returns the selected [`Neighborhood`] of this [`Draft`], if any.
    #[must_use]
    pub fn neighborhood(&self) -> Option<&Neighborhood> {
        self.neighborhood.as_ref()
    }

    /// Returns the sale price of this [`Draft`], if provided.
    #[must_use]
    pub fn price(&self) -> Option<Money> {
        self.price
    }

    /// Indicates whether the price of this [`Draft`] is negotiable.
    #[must_use]
    pub fn is_negotiable(&self) -> bool {
        self.is_negotiable
    }

    /// Returns the [`Description`] of this [`Draft`], if provided.
    #[must_use]
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the rental terms of this [`Draft`].
    #[must_use]
    pub fn rental(&self) -> &Rental {
        &self.rental
    }

    /// Returns the detail bag of this [`Draft`], if a [`Category`] is
    /// selected.
    #[must_use]
    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Returns the photos of this [`Draft`], in decode-completion order.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Returns the ID of the [`Listing`] this [`Draft`] was hydrated from,
    /// if any.
    #[must_use]
    pub fn listing_id(&self) -> Option<listing::Id> {
        self.listing_id
    }

    /// Returns the neighborhoods selectable for the current [`City`] of this
    /// [`Draft`].
    #[must_use]
    pub fn available_neighborhoods(&self) -> Vec<&'static str> {
        self.city
            .as_ref()
            .map(registry::location::neighborhoods)
            .unwrap_or_default()
    }

    /// Selects the [`TransactionKind`] of this [`Draft`].
    pub fn set_transaction_kind(&mut self, kind: TransactionKind) {
        self.transaction_kind = kind;
    }

    /// Selects the [`Category`] of this [`Draft`].
    ///
    /// Clears the selected sub-category and resets the detail bag to the
    /// empty shape of the new [`Category`].
    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
        self.sub_category = None;
        self.details = Some(Details::empty(category));
    }

    /// Selects the sub-category of this [`Draft`].
    ///
    /// # Errors
    ///
    /// - [`UpdateError::NoCategory`] if no [`Category`] is selected yet;
    /// - [`UpdateError::UnknownSubCategory`] if `value` is not in the
    ///   registry list of the selected [`Category`].
    pub fn set_sub_category(
        &mut self,
        value: listing::SubCategory,
    ) -> Result<(), UpdateError> {
        let category = self.category.ok_or(UpdateError::NoCategory)?;
        if !registry::category::of(category).has_sub_category(value.as_ref()) {
            return Err(UpdateError::UnknownSubCategory { category, value });
        }
        self.sub_category = Some(value);
        Ok(())
    }

    /// Sets (or clears) the user-provided [`Title`] of this [`Draft`],
    /// engaging the one-way auto-fill latch.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Locked`] if the wizard is not unlocked yet.
    pub fn set_title(
        &mut self,
        title: Option<Title>,
    ) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        self.title = title;
        self.title_edited = true;
        Ok(())
    }

    /// Selects the [`City`] of this [`Draft`], clearing the selected
    /// [`Neighborhood`].
    ///
    /// # Errors
    ///
    /// [`UpdateError::Locked`] if the wizard is not unlocked yet.
    pub fn set_city(&mut self, city: City) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        self.city = Some(city);
        self.neighborhood = None;
        Ok(())
    }

    /// Selects (or clears) the [`Neighborhood`] of this [`Draft`].
    ///
    /// # Errors
    ///
    /// - [`UpdateError::Locked`] if the wizard is not unlocked yet;
    /// - [`UpdateError::NoCity`] if no [`City`] is selected yet;
    /// - [`UpdateError::UnknownNeighborhood`] if `neighborhood` is not in the
    ///   registry list of the selected [`City`].
    pub fn set_neighborhood(
        &mut self,
        neighborhood: Option<Neighborhood>,
    ) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        let Some(neighborhood) = neighborhood else {
            self.neighborhood = None;
            return Ok(());
        };

        let city = self.city.clone().ok_or(UpdateError::NoCity)?;
        let name: &str = neighborhood.as_ref();
        if !registry::location::neighborhoods(&city)
            .iter()
            .any(|n| *n == name)
        {
            return Err(UpdateError::UnknownNeighborhood {
                city,
                value: neighborhood,
            });
        }
        self.neighborhood = Some(neighborhood);
        Ok(())
    }

    /// Patches the real estate detail bag of this [`Draft`].
    ///
    /// # Errors
    ///
    /// - [`UpdateError::Locked`] if the wizard is not unlocked yet;
    /// - [`UpdateError::DetailsMismatch`] if the current [`Category`] is not
    ///   [`Category::RealEstate`];
    /// - [`UpdateError::UnknownOption`] if an amenity is not in the registry
    ///   vocabulary.
    pub fn update_real_estate(
        &mut self,
        patch: RealEstatePatch,
    ) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        if let Some(amenities) = &patch.amenities {
            check_vocabulary(Category::RealEstate, "equipements", amenities)?;
        }
        match &mut self.details {
            Some(Details::RealEstate(details)) => {
                details.apply(patch);
                Ok(())
            }
            Some(Details::Land(_) | Details::Vehicle(_)) | None => {
                Err(UpdateError::DetailsMismatch {
                    patched: Category::RealEstate,
                })
            }
        }
    }

    /// Patches the land detail bag of this [`Draft`].
    ///
    /// # Errors
    ///
    /// Same as [`Draft::update_real_estate()`], for [`Category::Land`].
    pub fn update_land(&mut self, patch: LandPatch) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        if let Some(utilities) = &patch.utilities {
            check_vocabulary(Category::Land, "viabilisation", utilities)?;
        }
        match &mut self.details {
            Some(Details::Land(details)) => {
                details.apply(patch);
                Ok(())
            }
            Some(Details::RealEstate(_) | Details::Vehicle(_)) | None => {
                Err(UpdateError::DetailsMismatch {
                    patched: Category::Land,
                })
            }
        }
    }

    /// Patches the vehicle detail bag of this [`Draft`].
    ///
    /// # Errors
    ///
    /// Same as [`Draft::update_real_estate()`], for [`Category::Vehicle`].
    pub fn update_vehicle(
        &mut self,
        patch: VehiclePatch,
    ) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        let schema = registry::category::of(Category::Vehicle);
        for (vocabulary, value) in [
            ("marques", &patch.make),
            ("carburants", &patch.fuel_type),
            ("boites", &patch.transmission),
            ("etats", &patch.condition),
        ] {
            if let Some(value) = value {
                if !schema.vocabulary_contains(vocabulary, value) {
                    return Err(UpdateError::UnknownOption {
                        vocabulary,
                        value: value.clone(),
                    });
                }
            }
        }
        if let Some(options) = &patch.options {
            check_vocabulary(Category::Vehicle, "options", options)?;
        }
        match &mut self.details {
            Some(Details::Vehicle(details)) => {
                details.apply(patch);
                Ok(())
            }
            Some(Details::RealEstate(_) | Details::Land(_)) | None => {
                Err(UpdateError::DetailsMismatch {
                    patched: Category::Vehicle,
                })
            }
        }
    }

    /// Appends the given [`Photo`] to this [`Draft`].
    ///
    /// Photos arrive in decode-completion order, which is the order they are
    /// kept in.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Locked`] if the wizard is not unlocked yet.
    pub fn push_photo(&mut self, photo: Photo) -> Result<(), UpdateError> {
        self.ensure_unlocked()?;
        self.photos.push(photo);
        Ok(())
    }

    /// Removes the [`Photo`] at the given `index` from this [`Draft`].
    ///
    /// # Errors
    ///
    /// [`UpdateError::PhotoNotExists`] if no photo exists at the `index`.
    pub fn remove_photo(&mut self, index: usize) -> Result<(), UpdateError> {
        if index >= self.photos.len() {
            return Err(UpdateError::PhotoNotExists(index));
        }
        drop(self.photos.remove(index));
        Ok(())
    }

    /// Applies the given [`Patch`] to this [`Draft`] field-by-field
    /// (selection steps first, then general fields, then detail bags), and
    /// re-derives the title afterwards.
    ///
    /// # Errors
    ///
    /// See [`UpdateError`]. The draft may be left partially patched on an
    /// error; callers wanting all-or-nothing semantics apply the patch to a
    /// clone.
    pub fn apply(&mut self, patch: Patch) -> Result<(), UpdateError> {
        let Patch {
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

        if let Some(kind) = transaction_kind {
            self.set_transaction_kind(kind);
        }
        if let Some(category) = category {
            self.set_category(category);
        }
        if let Some(value) = sub_category {
            self.set_sub_category(value)?;
        }
        if let Some(city) = city {
            self.set_city(city)?;
        }
        if let Some(neighborhood) = neighborhood {
            self.set_neighborhood(neighborhood)?;
        }
        if let Some(title) = title {
            self.set_title(title)?;
        }
        if let Some(price) = price {
            self.ensure_unlocked()?;
            self.price = Some(price);
        }
        if let Some(is_negotiable) = is_negotiable {
            self.ensure_unlocked()?;
            self.is_negotiable = is_negotiable;
        }
        if let Some(description) = description {
            self.ensure_unlocked()?;
            self.description = description;
        }
        if let Some(monthly_rent) = monthly_rent {
            self.ensure_unlocked()?;
            self.rental.monthly_rent = Some(monthly_rent);
        }
        if let Some(deposit) = deposit {
            self.ensure_unlocked()?;
            self.rental.deposit = Some(deposit);
        }
        if let Some(advance_months) = advance_months {
            self.ensure_unlocked()?;
            self.rental.advance_months = advance_months;
        }
        if let Some(charges_included) = charges_included {
            self.ensure_unlocked()?;
            self.rental.charges_included = charges_included;
        }
        if let Some(patch) = real_estate {
            self.update_real_estate(patch)?;
        }
        if let Some(patch) = land {
            self.update_land(patch)?;
        }
        if let Some(patch) = vehicle {
            self.update_vehicle(patch)?;
        }

        self.refresh_title();
        Ok(())
    }

    /// Re-derives the auto-generated title of this [`Draft`], unless the
    /// user has edited the title directly (one-way latch).
    pub fn refresh_title(&mut self) {
        if !self.title_edited {
            if let Some(title) = self.auto_title() {
                self.title = Some(title);
            }
        }
    }

    /// Derives the auto-generated [`Title`] of this [`Draft`], if its
    /// category, sub-category, city and salient detail fields allow one.
    #[must_use]
    pub fn auto_title(&self) -> Option<Title> {
        let sub_category = self.sub_category.as_ref()?;
        let city = self.city.as_ref()?;
        let details = self.details.as_ref()?;

        let location = self
            .neighborhood
            .as_ref()
            .map_or_else(|| city.to_string(), |n| format!("{n} – {city}"));
        let connector = if self.neighborhood.is_some() { "à" } else { "-" };

        let raw = match details {
            Details::RealEstate(d) => {
                let rooms = d
                    .bedrooms
                    .map(|n| format!("{n} chambres"))
                    .unwrap_or_default();
                format!("{sub_category} {rooms} {connector} {location}")
            }
            Details::Land(d) => {
                let area =
                    d.area.map(|a| format!("{a}m²")).unwrap_or_default();
                format!("Terrain {sub_category} {area} {connector} {location}")
            }
            Details::Vehicle(d) => {
                let make = d.make.as_deref().unwrap_or_default();
                let model = d.model.as_deref().unwrap_or_default();
                if make.is_empty() && model.is_empty() {
                    return None;
                }
                format!("{make} {model} - {city}")
            }
        };

        Title::new(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Computes the weighted completeness [`Quality`] of this [`Draft`].
    ///
    /// Base criteria: title, city, price or rent, description longer than 50
    /// characters, at least 3 photos. Category-specific criteria add up to 3
    /// more (real estate: bedrooms, living area, amenities; land: area,
    /// deed; vehicle: make, year, mileage).
    #[must_use]
    pub fn quality(&self) -> Quality {
        let mut score = 0;
        let mut total = 5;

        score += u8::from(self.title.is_some());
        score += u8::from(self.city.is_some());
        score += u8::from(
            self.price.is_some() || self.rental.monthly_rent.is_some(),
        );
        score += u8::from(
            self.description
                .as_ref()
                .is_some_and(|d| d.chars_count() > 50),
        );
        score += u8::from(self.photos.len() >= 3);

        match &self.details {
            Some(Details::RealEstate(d)) => {
                total += 3;
                score += u8::from(d.bedrooms.is_some());
                score += u8::from(d.living_area.is_some());
                score += u8::from(!d.amenities.is_empty());
            }
            Some(Details::Land(d)) => {
                total += 2;
                score += u8::from(d.area.is_some());
                score += u8::from(d.has_deed);
            }
            Some(Details::Vehicle(d)) => {
                total += 3;
                score += u8::from(d.make.is_some());
                score += u8::from(d.year.is_some());
                score += u8::from(d.mileage.is_some());
            }
            None => {}
        }

        Quality { score, total }
    }

    /// Ensures the wizard of this [`Draft`] is unlocked.
    fn ensure_unlocked(&self) -> Result<(), UpdateError> {
        match self.step() {
            Step::Unlocked => Ok(()),
            step @ (Step::Category | Step::SubCategory) => {
                Err(UpdateError::Locked(step))
            }
        }
    }
}

/// Checks that all the given `values` are contained in the `vocabulary` of
/// the given [`Category`].
fn check_vocabulary(
    category: Category,
    vocabulary: &'static str,
    values: &[String],
) -> Result<(), UpdateError> {
    let schema = registry::category::of(category);
    for value in values {
        if !schema.vocabulary_contains(vocabulary, value) {
            return Err(UpdateError::UnknownOption {
                vocabulary,
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Error of updating a [`Draft`].
#[derive(Clone, Debug, Display, Error)]
pub enum UpdateError {
    /// The wizard has not reached the edited section yet.
    #[display("draft is locked at the `{_0}` step")]
    Locked(#[error(not(source))] Step),

    /// No [`Category`] is selected yet.
    #[display("no `Category` is selected yet")]
    NoCategory,

    /// No [`City`] is selected yet.
    #[display("no `City` is selected yet")]
    NoCity,

    /// The sub-category is not in the registry list of its [`Category`].
    #[display("unknown `{category}` sub-category: {value}")]
    UnknownSubCategory {
        /// Selected [`Category`].
        category: Category,

        /// Rejected sub-category value.
        value: listing::SubCategory,
    },

    /// The neighborhood is not in the registry list of its [`City`].
    #[display("unknown `{city}` neighborhood: {value}")]
    UnknownNeighborhood {
        /// Selected [`City`].
        city: City,

        /// Rejected neighborhood value.
        value: Neighborhood,
    },

    /// An option value is not in its registry vocabulary.
    #[display("vocabulary `{vocabulary}` does not contain: {value}")]
    UnknownOption {
        /// Name of the vocabulary.
        vocabulary: &'static str,

        /// Rejected option value.
        value: String,
    },

    /// A detail-bag patch does not match the current [`Category`].
    #[display("`{patched}` details do not match the current category")]
    DetailsMismatch {
        /// [`Category`] of the rejected patch.
        patched: Category,
    },

    /// No photo exists at the given index.
    #[display("no photo exists at index {_0}")]
    PhotoNotExists(#[error(not(source))] usize),
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::listing::{
        self,
        details::{LandPatch, RealEstatePatch, VehicleDetails, VehiclePatch},
        Category, City, Contact, Description, Details, MediaUrl,
        Neighborhood, QualityLabel, Slug, Status, SubCategory, Title,
        TransactionKind,
    };

    use super::{Draft, Patch, Photo, Preview, Step, UpdateError};

    fn money(amount: u64) -> Money {
        Money {
            amount: Decimal::from(amount),
            currency: Currency::Xaf,
        }
    }

    fn photo(name: &str) -> Photo {
        Photo {
            name: name.to_owned(),
            preview: Preview::Content {
                mime: "image/jpeg".to_owned(),
                bytes: vec![0xff, 0xd8, 0xff],
            },
        }
    }

    fn vehicle_draft() -> Draft {
        let mut draft = Draft::new();
        draft
            .apply(Patch {
                category: Some(Category::Vehicle),
                sub_category: SubCategory::new("voiture"),
                ..Patch::default()
            })
            .unwrap();
        draft
            .apply(Patch {
                city: City::new("Port-Gentil"),
                vehicle: Some(VehiclePatch {
                    make: Some("Toyota".to_owned()),
                    model: Some("Land Cruiser".to_owned()),
                    ..VehiclePatch::default()
                }),
                ..Patch::default()
            })
            .unwrap();
        draft
    }

    #[test]
    fn starts_locked_at_category_step() {
        let mut draft = Draft::new();
        assert_eq!(draft.step(), Step::Category);

        let denied = draft.apply(Patch {
            title: Some(Title::new("Maison")),
            ..Patch::default()
        });
        assert!(matches!(denied, Err(UpdateError::Locked(Step::Category))));

        draft.set_category(Category::RealEstate);
        assert_eq!(draft.step(), Step::SubCategory);

        let denied = draft.apply(Patch {
            city: City::new("Libreville"),
            ..Patch::default()
        });
        assert!(matches!(
            denied,
            Err(UpdateError::Locked(Step::SubCategory)),
        ));
    }

    #[test]
    fn category_switch_clears_incompatible_details() {
        let mut draft = vehicle_draft();
        assert!(matches!(
            draft.details(),
            Some(Details::Vehicle(d)) if d.make.is_some(),
        ));

        draft.set_category(Category::RealEstate);

        assert_eq!(draft.sub_category(), None);
        assert!(matches!(
            draft.details(),
            Some(Details::RealEstate(d))
                if d.bedrooms.is_none() && d.amenities.is_empty(),
        ));
    }

    #[test]
    fn sub_category_must_come_from_the_registry() {
        let mut draft = Draft::new();
        draft.set_category(Category::Land);

        assert!(matches!(
            draft.set_sub_category(SubCategory::new("voiture").unwrap()),
            Err(UpdateError::UnknownSubCategory { .. }),
        ));
        draft
            .set_sub_category(SubCategory::new("constructible").unwrap())
            .unwrap();
        assert_eq!(draft.step(), Step::Unlocked);
    }

    #[test]
    fn city_switch_clears_neighborhood() {
        let mut draft = Draft::new();
        draft.set_category(Category::RealEstate);
        draft
            .set_sub_category(SubCategory::new("maison").unwrap())
            .unwrap();

        draft.set_city(City::new("Libreville").unwrap()).unwrap();
        draft
            .set_neighborhood(Neighborhood::new("Nzeng-Ayong"))
            .unwrap();
        assert!(draft.neighborhood().is_some());

        draft.set_city(City::new("Owendo").unwrap()).unwrap();
        assert_eq!(draft.neighborhood(), None);
    }

    #[test]
    fn neighborhood_must_belong_to_the_city() {
        let mut draft = Draft::new();
        draft.set_category(Category::RealEstate);
        draft
            .set_sub_category(SubCategory::new("maison").unwrap())
            .unwrap();
        draft.set_city(City::new("Owendo").unwrap()).unwrap();

        assert!(matches!(
            draft.set_neighborhood(Neighborhood::new("Nzeng-Ayong")),
            Err(UpdateError::UnknownNeighborhood { .. }),
        ));

        // A city absent from the registry has no selectable neighborhoods.
        draft.set_city(City::new("Port-Gentil").unwrap()).unwrap();
        assert!(draft.available_neighborhoods().is_empty());
        assert!(matches!(
            draft.set_neighborhood(Neighborhood::new("Centre")),
            Err(UpdateError::UnknownNeighborhood { .. }),
        ));
    }

    #[test]
    fn vehicle_title_and_slug() {
        let draft = vehicle_draft();

        let title = draft.title().unwrap();
        assert_eq!(title.to_string(), "Toyota Land Cruiser - Port-Gentil");
        assert_eq!(
            Slug::new(title).to_string(),
            "toyota-land-cruiser-port-gentil",
        );
    }

    #[test]
    fn real_estate_title_formats() {
        let mut draft = Draft::new();
        draft.set_category(Category::RealEstate);
        draft
            .set_sub_category(SubCategory::new("maison").unwrap())
            .unwrap();
        draft.set_city(City::new("Libreville").unwrap()).unwrap();
        draft
            .update_real_estate(RealEstatePatch {
                bedrooms: Some(4),
                ..RealEstatePatch::default()
            })
            .unwrap();
        draft.refresh_title();
        assert_eq!(
            draft.title().unwrap().to_string(),
            "maison 4 chambres - Libreville",
        );

        draft
            .set_neighborhood(Neighborhood::new("Nzeng-Ayong"))
            .unwrap();
        draft.refresh_title();
        assert_eq!(
            draft.title().unwrap().to_string(),
            "maison 4 chambres à Nzeng-Ayong – Libreville",
        );
    }

    #[test]
    fn land_title_format() {
        let mut draft = Draft::new();
        draft.set_category(Category::Land);
        draft
            .set_sub_category(SubCategory::new("commercial").unwrap())
            .unwrap();
        draft.set_city(City::new("Owendo").unwrap()).unwrap();
        draft
            .update_land(LandPatch {
                area: Some(1200),
                ..LandPatch::default()
            })
            .unwrap();
        draft.refresh_title();
        assert_eq!(
            draft.title().unwrap().to_string(),
            "Terrain commercial 1200m² - Owendo",
        );
    }

    #[test]
    fn title_latch_is_one_way() {
        let mut draft = vehicle_draft();
        assert_eq!(
            draft.title().unwrap().to_string(),
            "Toyota Land Cruiser - Port-Gentil",
        );

        // Until the user edits the title, it keeps following the draft.
        draft
            .apply(Patch {
                city: City::new("Libreville"),
                ..Patch::default()
            })
            .unwrap();
        assert_eq!(
            draft.title().unwrap().to_string(),
            "Toyota Land Cruiser - Libreville",
        );

        draft
            .apply(Patch {
                title: Some(Title::new("Belle voiture familiale")),
                ..Patch::default()
            })
            .unwrap();

        draft
            .apply(Patch {
                vehicle: Some(VehiclePatch {
                    make: Some("Nissan".to_owned()),
                    model: Some("Patrol".to_owned()),
                    ..VehiclePatch::default()
                }),
                ..Patch::default()
            })
            .unwrap();
        assert_eq!(draft.title().unwrap().to_string(), "Belle voiture familiale");
    }

    #[test]
    fn clearing_the_title_engages_the_latch_too() {
        let mut draft = vehicle_draft();

        draft.set_title(None).unwrap();
        draft
            .apply(Patch {
                city: City::new("Owendo"),
                ..Patch::default()
            })
            .unwrap();
        assert_eq!(draft.title(), None);
    }

    #[test]
    fn detail_patch_must_match_the_category() {
        let mut draft = Draft::new();
        draft.set_category(Category::RealEstate);
        draft
            .set_sub_category(SubCategory::new("villa").unwrap())
            .unwrap();

        assert!(matches!(
            draft.update_vehicle(VehiclePatch::default()),
            Err(UpdateError::DetailsMismatch {
                patched: Category::Vehicle,
            }),
        ));
    }

    #[test]
    fn vocabulary_values_are_validated() {
        let mut draft = Draft::new();
        draft.set_category(Category::Vehicle);
        draft
            .set_sub_category(SubCategory::new("voiture").unwrap())
            .unwrap();

        assert!(matches!(
            draft.update_vehicle(VehiclePatch {
                make: Some("Lada".to_owned()),
                ..VehiclePatch::default()
            }),
            Err(UpdateError::UnknownOption {
                vocabulary: "marques",
                ..
            }),
        ));
    }

    #[test]
    fn photo_removal_is_by_index() {
        let mut draft = vehicle_draft();
        draft.push_photo(photo("front.jpg")).unwrap();
        draft.push_photo(photo("back.jpg")).unwrap();

        draft.remove_photo(0).unwrap();
        assert_eq!(draft.photos().len(), 1);
        assert_eq!(draft.photos()[0].name, "back.jpg");

        assert!(matches!(
            draft.remove_photo(5),
            Err(UpdateError::PhotoNotExists(5)),
        ));
    }

    #[test]
    fn vehicle_example_scores_three_of_eight() {
        let mut draft = vehicle_draft();
        draft.push_photo(photo("front.jpg")).unwrap();

        // Auto-generated title, city and make are the only satisfied
        // criteria.
        let quality = draft.quality();
        assert_eq!(quality.score, 3);
        assert_eq!(quality.total, 8);
        assert_eq!(quality.label(), QualityLabel::Incomplete);
    }

    #[test]
    fn real_estate_example_scores_six_of_eight() {
        let mut draft = Draft::new();
        draft.set_category(Category::RealEstate);
        draft
            .set_sub_category(SubCategory::new("maison").unwrap())
            .unwrap();
        draft
            .apply(Patch {
                city: City::new("Libreville"),
                price: Some(money(25_000_000)),
                description: Some(Description::new("x".repeat(60))),
                real_estate: Some(RealEstatePatch {
                    bedrooms: Some(4),
                    ..RealEstatePatch::default()
                }),
                ..Patch::default()
            })
            .unwrap();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            draft.push_photo(photo(name)).unwrap();
        }

        let quality = draft.quality();
        assert_eq!(quality.score, 6);
        assert_eq!(quality.total, 8);
        assert_eq!(quality.percent(), "75".parse().unwrap());
        assert_eq!(quality.label(), QualityLabel::Partial);
    }

    #[test]
    fn quality_never_decreases_when_fields_are_added() {
        let mut draft = vehicle_draft();
        let mut last = draft.quality().score;

        draft
            .apply(Patch {
                vehicle: Some(VehiclePatch {
                    year: Some(2019),
                    ..VehiclePatch::default()
                }),
                ..Patch::default()
            })
            .unwrap();
        assert!(draft.quality().score >= last);
        last = draft.quality().score;

        draft
            .apply(Patch {
                price: Some(money(18_500_000)),
                description: Some(Description::new("y".repeat(80))),
                ..Patch::default()
            })
            .unwrap();
        assert!(draft.quality().score >= last);
        last = draft.quality().score;

        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            draft.push_photo(photo(name)).unwrap();
        }
        assert!(draft.quality().score >= last);
    }

    #[test]
    fn rental_advance_defaults_to_one_month() {
        let draft = Draft::new();
        assert_eq!(draft.rental().advance_months, 1);
        assert_eq!(draft.transaction_kind(), TransactionKind::Sale);
    }

    #[test]
    fn hydrated_drafts_keep_the_latch_engaged() {
        let title = Title::new("Toyota Land Cruiser - Port-Gentil").unwrap();
        let existing = listing::Listing {
            id: listing::Id::new(),
            slug: Slug::new(&title),
            title,
            transaction_kind: TransactionKind::Sale,
            category: Category::Vehicle,
            sub_category: SubCategory::new("voiture").unwrap(),
            city: City::new("Port-Gentil").unwrap(),
            neighborhood: None,
            price: Some(money(18_500_000)),
            is_negotiable: true,
            rental: None,
            description: Description::new("Très bon état général.").unwrap(),
            details: Details::Vehicle(VehicleDetails {
                make: Some("Toyota".to_owned()),
                model: Some("Land Cruiser".to_owned()),
                ..VehicleDetails::default()
            }),
            photos: vec![
                MediaUrl::new("/media/images/land-cruiser.jpg").unwrap(),
            ],
            quality: QualityLabel::Partial,
            contact: Contact {
                name: "auto-immo (Sonny)".to_owned(),
                phone: "+241 07 10 02 75".to_owned(),
                email: "contact@auto-immo.info".to_owned(),
            },
            status: Status::Active,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        };

        let mut draft = Draft::hydrate(&existing);
        assert_eq!(draft.step(), Step::Unlocked);
        assert_eq!(draft.listing_id(), Some(existing.id));
        assert_eq!(draft.photos().len(), 1);
        assert_eq!(draft.photos()[0].name, "land-cruiser.jpg");

        // The existing title is treated as user-provided: re-deriving never
        // overwrites it.
        draft
            .apply(Patch {
                vehicle: Some(VehiclePatch {
                    make: Some("Nissan".to_owned()),
                    model: Some("Patrol".to_owned()),
                    ..VehiclePatch::default()
                }),
                ..Patch::default()
            })
            .unwrap();
        assert_eq!(
            draft.title().unwrap().to_string(),
            "Toyota Land Cruiser - Port-Gentil",
        );
    }
}
