//! [`Command`] for submitting a [`Draft`] as a [`Listing`].

use common::{
    operations::{Delete, Insert, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        draft::Preview,
        listing::{self, Details},
        Draft, Listing,
    },
    infra::{media, sessions, store, Media, Store},
    Service,
};

use super::Command;

/// [`Command`] for submitting the [`Draft`] of a form session as a
/// [`Listing`].
///
/// The whole submission is an all-or-nothing boundary: on any failure no
/// record is persisted, freshly uploaded files are removed best-effort, and
/// the draft is left in place for correction and manual retry.
#[derive(Clone, Copy, Debug)]
pub struct SubmitDraft {
    /// ID of the [`Draft`] session to submit.
    pub session_id: sessions::Id,
}

impl<S, M> Command<SubmitDraft> for Service<S, M>
where
    S: Store<Insert<listing::New>, Ok = Listing, Err = Traced<store::Error>>
        + Store<
            Update<(listing::Id, listing::New)>,
            Ok = Listing,
            Err = Traced<store::Error>,
        >,
    M: Media<media::Upload, Ok = listing::MediaUrl, Err = Traced<media::Error>>
        + Media<
            Delete<listing::MediaUrl>,
            Ok = (),
            Err = Traced<media::Error>,
        >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitDraft { session_id } = cmd;

        // Checking the draft out flags the session as submitting, so a
        // second submit while this one is in flight fails instead of
        // creating a duplicate.
        let draft = self
            .sessions()
            .begin_submit(session_id)
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let result = self.run_submission(&draft).await;
        self.sessions()
            .finish_submit(session_id, result.is_ok())
            .await;
        result
    }
}

impl<S, M> Service<S, M> {
    /// Validates, uploads and persists the given checked-out [`Draft`].
    async fn run_submission(
        &self,
        draft: &Draft,
    ) -> Result<Listing, Traced<ExecutionError>>
    where
        S: Store<
                Insert<listing::New>,
                Ok = Listing,
                Err = Traced<store::Error>,
            > + Store<
                Update<(listing::Id, listing::New)>,
                Ok = Listing,
                Err = Traced<store::Error>,
            >,
        M: Media<
                media::Upload,
                Ok = listing::MediaUrl,
                Err = Traced<media::Error>,
            > + Media<
                Delete<listing::MediaUrl>,
                Ok = (),
                Err = Traced<media::Error>,
            >,
    {
        use ExecutionError as E;

        let validated = validate(draft)
            .map_err(E::Validation)
            .map_err(|e| tracerr::new!(e))?;

        let mut urls = Vec::with_capacity(draft.photos().len());
        let mut uploaded = Vec::new();
        for photo in draft.photos() {
            match &photo.preview {
                Preview::Url(url) => urls.push(url.clone()),
                Preview::Content { bytes, .. } => {
                    match self
                        .media()
                        .execute(media::Upload {
                            file_name: photo.name.clone(),
                            content: bytes.clone(),
                            path_hint: "images",
                        })
                        .await
                    {
                        Ok(url) => {
                            uploaded.push(url.clone());
                            urls.push(url);
                        }
                        Err(e) => {
                            self.cleanup_uploads(&uploaded).await;
                            return Err(e)
                                .map_err(tracerr::map_from_and_wrap!(=> E));
                        }
                    }
                }
            }
        }

        let new = listing::New {
            slug: listing::Slug::new(validated.title),
            title: validated.title.clone(),
            transaction_kind: draft.transaction_kind(),
            category: validated.category,
            sub_category: validated.sub_category.clone(),
            city: validated.city.clone(),
            neighborhood: draft.neighborhood().cloned(),
            price: validated.price,
            is_negotiable: draft.is_negotiable(),
            rental: validated.rental,
            description: validated.description.clone(),
            details: validated.details.clone(),
            photos: urls,
            quality: draft.quality().label(),
            contact: self.config().contact.clone(),
            status: listing::Status::Active,
        };

        let saved = match draft.listing_id() {
            Some(id) => self.store().execute(Update((id, new))).await,
            None => self.store().execute(Insert(new)).await,
        };
        match saved {
            Ok(listing) => Ok(listing),
            Err(e) => {
                self.cleanup_uploads(&uploaded).await;
                Err(e).map_err(tracerr::map_from_and_wrap!(=> E))
            }
        }
    }

    /// Best-effort removal of freshly uploaded files after a failed
    /// submission. Failures are logged, never surfaced.
    async fn cleanup_uploads(&self, uploaded: &[listing::MediaUrl])
    where
        M: Media<
            Delete<listing::MediaUrl>,
            Ok = (),
            Err = Traced<media::Error>,
        >,
    {
        for url in uploaded {
            if let Err(e) = self.media().execute(Delete(url.clone())).await {
                log::warn!("failed to delete orphaned upload `{url}`: {e}");
            }
        }
    }
}

/// Required fields of a [`Draft`], extracted by [`validate()`].
struct Validated<'a> {
    /// Selected [`listing::Category`].
    category: listing::Category,

    /// Selected sub-category.
    sub_category: &'a listing::SubCategory,

    /// Provided title.
    title: &'a listing::Title,

    /// Selected city.
    city: &'a listing::City,

    /// Provided description.
    description: &'a listing::Description,

    /// Detail bag matching the selected category.
    details: &'a Details,

    /// Sale price, required unless the transaction is a pure rental.
    price: Option<Money>,

    /// Rental terms, required unless the transaction is a pure sale.
    rental: Option<listing::RentalTerms>,
}

/// Checks the submission preconditions of the given [`Draft`].
fn validate(draft: &Draft) -> Result<Validated<'_>, ValidationError> {
    use ValidationError as E;

    if draft.photos().is_empty() {
        return Err(E::NoPhotos);
    }

    let category = draft.category().ok_or(E::MissingField("category"))?;
    let sub_category =
        draft.sub_category().ok_or(E::MissingField("sub_category"))?;
    let details = draft.details().ok_or(E::MissingField("category"))?;
    let title = draft.title().ok_or(E::MissingField("title"))?;
    let city = draft.city().ok_or(E::MissingField("city"))?;
    let description =
        draft.description().ok_or(E::MissingField("description"))?;

    let kind = draft.transaction_kind();
    let price = if kind.includes_sale() {
        Some(draft.price().ok_or(E::MissingField("price"))?)
    } else {
        draft.price()
    };
    let rental = if kind.includes_rental() {
        let monthly_rent = draft
            .rental()
            .monthly_rent
            .ok_or(E::MissingField("monthly_rent"))?;
        Some(listing::RentalTerms {
            monthly_rent,
            deposit: draft.rental().deposit,
            advance_months: draft.rental().advance_months,
            charges_included: draft.rental().charges_included,
        })
    } else {
        None
    };

    match details {
        Details::RealEstate(_) => {}
        Details::Land(d) => {
            if d.area.is_none() {
                return Err(E::MissingField("area"));
            }
        }
        Details::Vehicle(d) => {
            for (field, missing) in [
                ("make", d.make.is_none()),
                ("model", d.model.is_none()),
                ("year", d.year.is_none()),
                ("mileage", d.mileage.is_none()),
                ("fuel_type", d.fuel_type.is_none()),
                ("transmission", d.transmission.is_none()),
            ] {
                if missing {
                    return Err(E::MissingField(field));
                }
            }
        }
    }

    Ok(Validated {
        category,
        sub_category,
        title,
        city,
        description,
        details,
        price,
        rental,
    })
}

/// Error of validating a [`Draft`] for submission.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ValidationError {
    /// The draft has no photos attached.
    #[display("at least one photo is required")]
    NoPhotos,

    /// A required field is missing.
    #[display("required field `{_0}` is missing")]
    MissingField(#[error(not(source))] &'static str),
}

/// Error of [`SubmitDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Draft session operation failed.
    #[display("draft session operation failed: {_0}")]
    Session(sessions::Error),

    /// The draft failed the submission preconditions.
    #[display("draft validation failed: {_0}")]
    Validation(ValidationError),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),

    /// [`Media`] storage error.
    #[display("`Media` operation failed: {_0}")]
    Media(media::Error),
}

#[cfg(test)]
mod spec {
    use common::{
        money::Currency,
        operations::{By, Select},
        Money,
    };
    use rust_decimal::Decimal;

    use crate::{
        command::{AddDraftPhotos, Command as _, CreateDraft, PhotoUpload},
        domain::{
            admin,
            draft::Patch,
            listing::{
                self, details::VehiclePatch, Category, City, Description,
                QualityLabel, Status, SubCategory,
            },
            Listing,
        },
        infra::{media, memory, Local, Memory},
        read, Service,
    };

    use super::{ExecutionError, SubmitDraft};

    fn service(dir: &std::path::Path) -> Service<Memory, Local> {
        let secret = b"secret";
        let config = crate::Config {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(secret),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(secret),
            admin: admin::Credentials {
                login: admin::Login::new("admin@auto-immo.ga").unwrap(),
                password_hash: admin::PasswordHash::new(
                    &admin::Password::from("admin"),
                ),
            },
            contact: listing::Contact {
                name: "auto-immo (Sonny)".to_owned(),
                phone: "+241 07 10 02 75".to_owned(),
                email: "contact@auto-immo.info".to_owned(),
            },
            clean_stale_drafts: crate::task::clean_stale_drafts::Config {
                interval: std::time::Duration::from_secs(60 * 60),
                timeout: std::time::Duration::from_secs(60 * 60),
            },
        };
        let store = Memory::new(memory::Config::default()).unwrap();
        let media = Local::new(media::local::Config {
            root: dir.to_path_buf(),
            base_url: "/media".to_owned(),
        })
        .unwrap();
        Service::new(config, store, media).0
    }

    fn money(amount: u64) -> Money {
        Money {
            amount: Decimal::from(amount),
            currency: Currency::Xaf,
        }
    }

    async fn complete_vehicle_session(
        service: &Service<Memory, Local>,
        photos: usize,
    ) -> crate::infra::sessions::Id {
        let opened = service.execute(CreateDraft::default()).await.unwrap();
        let session_id = opened.session_id;

        service
            .execute(crate::command::UpdateDraft {
                session_id,
                patch: Patch {
                    category: Some(Category::Vehicle),
                    sub_category: SubCategory::new("voiture"),
                    ..Patch::default()
                },
            })
            .await
            .unwrap();
        service
            .execute(crate::command::UpdateDraft {
                session_id,
                patch: Patch {
                    city: City::new("Port-Gentil"),
                    price: Some(money(18_500_000)),
                    description: Some(Description::new(
                        "Entretien suivi, climatisation, 4x4 fiable en ville \
                         comme en brousse.",
                    )),
                    vehicle: Some(VehiclePatch {
                        make: Some("Toyota".to_owned()),
                        model: Some("Land Cruiser".to_owned()),
                        year: Some(2019),
                        mileage: Some(85_000),
                        fuel_type: Some("Diesel".to_owned()),
                        transmission: Some("Manuelle".to_owned()),
                        ..VehiclePatch::default()
                    }),
                    ..Patch::default()
                },
            })
            .await
            .unwrap();

        if photos > 0 {
            use base64::{
                engine::general_purpose::STANDARD as BASE64, Engine as _,
            };
            service
                .execute(AddDraftPhotos {
                    session_id,
                    photos: (0..photos)
                        .map(|i| PhotoUpload {
                            name: format!("photo-{i}.jpg"),
                            data_uri: format!(
                                "data:image/jpeg;base64,{}",
                                BASE64.encode([0xff, 0xd8, 0xff, 0xe0]),
                            ),
                        })
                        .collect(),
                })
                .await
                .unwrap();
        }

        session_id
    }

    #[tokio::test]
    async fn submits_a_complete_draft() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let session_id = complete_vehicle_session(&service, 1).await;

        let listing = service
            .execute(SubmitDraft { session_id })
            .await
            .unwrap();

        assert_eq!(
            listing.title.to_string(),
            "Toyota Land Cruiser - Port-Gentil",
        );
        assert_eq!(
            listing.slug.to_string(),
            "toyota-land-cruiser-port-gentil",
        );
        assert_eq!(listing.status, Status::Active);
        assert_eq!(listing.quality, QualityLabel::Complete);
        assert_eq!(listing.photos.len(), 1);
        assert!(listing.photos[0].to_string().starts_with("/media/images/"));
        assert_eq!(listing.contact.email, "contact@auto-immo.info");

        // The session is consumed by a successful submission.
        assert!(service.execute(SubmitDraft { session_id }).await.is_err());
    }

    #[tokio::test]
    async fn zero_photos_fail_validation_without_persisting() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let session_id = complete_vehicle_session(&service, 0).await;

        let denied = service.execute(SubmitDraft { session_id }).await;
        assert!(matches!(
            denied.unwrap_err().as_ref(),
            ExecutionError::Validation(super::ValidationError::NoPhotos),
        ));

        let stored: Vec<Listing> = service
            .store()
            .execute(Select(By::new(read::listing::list::Filter::default())))
            .await
            .unwrap();
        assert!(stored.is_empty());

        // The draft is preserved for correction.
        let session = service.sessions().peek(session_id, Clone::clone).await;
        assert!(session.is_ok());
    }

    #[tokio::test]
    async fn missing_required_fields_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());

        let opened = service.execute(CreateDraft::default()).await.unwrap();
        let session_id = opened.session_id;
        service
            .execute(crate::command::UpdateDraft {
                session_id,
                patch: Patch {
                    category: Some(Category::Vehicle),
                    sub_category: SubCategory::new("voiture"),
                    ..Patch::default()
                },
            })
            .await
            .unwrap();
        service
            .execute(AddDraftPhotos {
                session_id,
                photos: vec![PhotoUpload {
                    name: "photo.jpg".to_owned(),
                    data_uri: "data:image/jpeg;base64,/9g=".to_owned(),
                }],
            })
            .await
            .unwrap();

        let denied = service.execute(SubmitDraft { session_id }).await;
        assert!(matches!(
            denied.unwrap_err().as_ref(),
            ExecutionError::Validation(
                super::ValidationError::MissingField(_),
            ),
        ));
    }
}
