//! Category-specific [`Details`] of a [`Listing`].

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use super::Listing;
use super::Category;

/// Category-specific detail bag of a [`Listing`].
///
/// The variant always matches the [`Category`] of the owning record: switching
/// the category of a draft replaces the whole bag, so fields of different
/// categories are never live simultaneously.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Details {
    /// Details of a real estate [`Listing`].
    RealEstate(RealEstateDetails),

    /// Details of a land plot [`Listing`].
    Land(LandDetails),

    /// Details of a vehicle [`Listing`].
    Vehicle(VehicleDetails),
}

impl Details {
    /// Returns an empty [`Details`] bag matching the given [`Category`].
    #[must_use]
    pub fn empty(category: Category) -> Self {
        match category {
            Category::RealEstate => {
                Self::RealEstate(RealEstateDetails::default())
            }
            Category::Land => Self::Land(LandDetails::default()),
            Category::Vehicle => Self::Vehicle(VehicleDetails::default()),
        }
    }

    /// Returns the [`Category`] this [`Details`] bag belongs to.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::RealEstate(_) => Category::RealEstate,
            Self::Land(_) => Category::Land,
            Self::Vehicle(_) => Category::Vehicle,
        }
    }
}

/// Number of rooms of some kind in a real estate [`Listing`].
pub type RoomCount = u16;

/// Number of floors in a real estate [`Listing`].
pub type FloorCount = u16;

/// Surface in square meters.
pub type SquareMeters = u32;

/// Year of construction or manufacture.
pub type Year = u16;

/// Vehicle mileage in kilometers.
pub type Mileage = u32;

/// Number of doors of a vehicle.
pub type DoorCount = u8;

/// Details of a real estate [`Listing`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RealEstateDetails {
    /// Number of bedrooms.
    pub bedrooms: Option<RoomCount>,

    /// Number of living rooms.
    pub living_rooms: Option<RoomCount>,

    /// Number of bathrooms.
    pub bathrooms: Option<RoomCount>,

    /// Living area in square meters.
    pub living_area: Option<SquareMeters>,

    /// Land area in square meters.
    pub land_area: Option<SquareMeters>,

    /// Number of floors.
    pub floors: Option<FloorCount>,

    /// Year the building was built.
    pub year_built: Option<Year>,

    /// Selected amenities, drawn from the registry vocabulary.
    pub amenities: Vec<String>,
}

/// Details of a land plot [`Listing`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LandDetails {
    /// Plot area in square meters.
    pub area: Option<SquareMeters>,

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

    /// Available utilities, drawn from the registry vocabulary.
    pub utilities: Vec<String>,
}

/// Details of a vehicle [`Listing`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VehicleDetails {
    /// Make of the vehicle, drawn from the registry vocabulary.
    pub make: Option<String>,

    /// Model of the vehicle.
    pub model: Option<String>,

    /// Year of manufacture.
    pub year: Option<Year>,

    /// Mileage in kilometers.
    pub mileage: Option<Mileage>,

    /// Fuel type, drawn from the registry vocabulary.
    pub fuel_type: Option<String>,

    /// Transmission, drawn from the registry vocabulary.
    pub transmission: Option<String>,

    /// Number of doors.
    pub doors: Option<DoorCount>,

    /// Color of the vehicle.
    pub color: Option<String>,

    /// Condition, drawn from the registry vocabulary.
    pub condition: Option<String>,

    /// Selected options, drawn from the registry vocabulary.
    pub options: Vec<String>,
}

/// Shallow-merge patch of [`RealEstateDetails`].
#[derive(Clone, Debug, Default)]
pub struct RealEstatePatch {
    /// New number of bedrooms.
    pub bedrooms: Option<RoomCount>,

    /// New number of living rooms.
    pub living_rooms: Option<RoomCount>,

    /// New number of bathrooms.
    pub bathrooms: Option<RoomCount>,

    /// New living area in square meters.
    pub living_area: Option<SquareMeters>,

    /// New land area in square meters.
    pub land_area: Option<SquareMeters>,

    /// New number of floors.
    pub floors: Option<FloorCount>,

    /// New year the building was built.
    pub year_built: Option<Year>,

    /// New selection of amenities.
    pub amenities: Option<Vec<String>>,
}

impl RealEstateDetails {
    /// Applies the given [`RealEstatePatch`] to these details, replacing only
    /// the fields the patch carries.
    pub fn apply(&mut self, patch: RealEstatePatch) {
        let RealEstatePatch {
            bedrooms,
            living_rooms,
            bathrooms,
            living_area,
            land_area,
            floors,
            year_built,
            amenities,
        } = patch;

        if bedrooms.is_some() {
            self.bedrooms = bedrooms;
        }
        if living_rooms.is_some() {
            self.living_rooms = living_rooms;
        }
        if bathrooms.is_some() {
            self.bathrooms = bathrooms;
        }
        if living_area.is_some() {
            self.living_area = living_area;
        }
        if land_area.is_some() {
            self.land_area = land_area;
        }
        if floors.is_some() {
            self.floors = floors;
        }
        if year_built.is_some() {
            self.year_built = year_built;
        }
        if let Some(amenities) = amenities {
            self.amenities = amenities;
        }
    }
}

/// Shallow-merge patch of [`LandDetails`].
#[derive(Clone, Debug, Default)]
pub struct LandPatch {
    /// New plot area in square meters.
    pub area: Option<SquareMeters>,

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

impl LandDetails {
    /// Applies the given [`LandPatch`] to these details, replacing only the
    /// fields the patch carries.
    pub fn apply(&mut self, patch: LandPatch) {
        let LandPatch {
            area,
            has_road_access,
            is_flat,
            is_surveyed,
            has_deed,
            is_subdivided,
            utilities,
        } = patch;

        if area.is_some() {
            self.area = area;
        }
        if let Some(v) = has_road_access {
            self.has_road_access = v;
        }
        if let Some(v) = is_flat {
            self.is_flat = v;
        }
        if let Some(v) = is_surveyed {
            self.is_surveyed = v;
        }
        if let Some(v) = has_deed {
            self.has_deed = v;
        }
        if let Some(v) = is_subdivided {
            self.is_subdivided = v;
        }
        if let Some(utilities) = utilities {
            self.utilities = utilities;
        }
    }
}

/// Shallow-merge patch of [`VehicleDetails`].
#[derive(Clone, Debug, Default)]
pub struct VehiclePatch {
    /// New make of the vehicle.
    pub make: Option<String>,

    /// New model of the vehicle.
    pub model: Option<String>,

    /// New year of manufacture.
    pub year: Option<Year>,

    /// New mileage in kilometers.
    pub mileage: Option<Mileage>,

    /// New fuel type.
    pub fuel_type: Option<String>,

    /// New transmission.
    pub transmission: Option<String>,

    /// New number of doors.
    pub doors: Option<DoorCount>,

    /// New color of the vehicle.
    pub color: Option<String>,

    /// New condition.
    pub condition: Option<String>,

    /// New selection of options.
    pub options: Option<Vec<String>>,
}

impl VehicleDetails {
    /// Applies the given [`VehiclePatch`] to these details, replacing only the
    /// fields the patch carries.
    pub fn apply(&mut self, patch: VehiclePatch) {
        let VehiclePatch {
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
        } = patch;

        if make.is_some() {
            self.make = make;
        }
        if model.is_some() {
            self.model = model;
        }
        if year.is_some() {
            self.year = year;
        }
        if mileage.is_some() {
            self.mileage = mileage;
        }
        if fuel_type.is_some() {
            self.fuel_type = fuel_type;
        }
        if transmission.is_some() {
            self.transmission = transmission;
        }
        if doors.is_some() {
            self.doors = doors;
        }
        if color.is_some() {
            self.color = color;
        }
        if condition.is_some() {
            self.condition = condition;
        }
        if let Some(options) = options {
            self.options = options;
        }
    }
}
