//! In-memory [`Store`] with an optional JSON snapshot file.
//!
//! This is the "local device storage" backend of the marketplace: the whole
//! collection fits in memory, every mutation re-serializes it, and observers
//! receive full snapshots. A hosted document database slots in behind the
//! same operations.

use std::{collections::HashMap, io, path::PathBuf, sync::Arc};

use common::{
    operations::{By, Delete, Insert, Select, Subscribe, Update},
    DateTime,
};
use derive_more::{Display, Error as StdError, From};
use tokio::sync::{broadcast, RwLock};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{store, Store},
    read,
};

/// Configuration of a [`Memory`] store.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Path of the JSON snapshot file persisting the store across restarts.
    ///
    /// [`None`] keeps the store purely in-memory.
    pub snapshot_file: Option<PathBuf>,
}

/// Capacity of the snapshot broadcast channel.
const CHANNEL_CAPACITY: usize = 16;

/// Full snapshot of the stored [`Listing`]s, newest first.
pub type Snapshot = Vec<Listing>;

/// In-memory [`Store`] of [`Listing`]s.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Shared state of this [`Memory`] store.
    inner: Arc<Inner>,
}

/// Shared state of a [`Memory`] store.
#[derive(Debug)]
struct Inner {
    /// [`Config`] of the store.
    config: Config,

    /// Stored [`Listing`]s.
    listings: RwLock<HashMap<listing::Id, Listing>>,

    /// Broadcast channel of full [`Snapshot`]s.
    events: broadcast::Sender<Snapshot>,
}

impl Memory {
    /// Creates a new [`Memory`] store, loading the configured snapshot file
    /// if it exists.
    ///
    /// # Errors
    ///
    /// If the snapshot file cannot be read or parsed.
    pub fn new(config: Config) -> Result<Self, Traced<store::Error>> {
        let listings = match &config.snapshot_file {
            Some(path) if path.exists() => std::fs::read(path)
                .map_err(Error::Io)
                .map_err(tracerr::from_and_wrap!(=> store::Error))
                .and_then(|bytes| {
                    serde_json::from_slice::<Vec<Listing>>(&bytes)
                        .map_err(Error::Json)
                        .map_err(tracerr::from_and_wrap!(=> store::Error))
                })?
                .into_iter()
                .map(|l| (l.id, l))
                .collect(),
            Some(_) | None => HashMap::new(),
        };

        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                listings: RwLock::new(listings),
                events,
            }),
        })
    }

    /// Builds the full [`Snapshot`] of the given collection, newest first.
    fn snapshot(listings: &HashMap<listing::Id, Listing>) -> Snapshot {
        let mut all: Snapshot = listings.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Persists the `next` collection state and only then makes it visible:
    /// a failed snapshot write must not leave a visible mutation.
    async fn commit(
        &self,
        current: &mut HashMap<listing::Id, Listing>,
        next: HashMap<listing::Id, Listing>,
    ) -> Result<(), Traced<store::Error>> {
        let snapshot = Self::snapshot(&next);

        if let Some(path) = &self.inner.config.snapshot_file {
            let json = serde_json::to_vec_pretty(&snapshot)
                .map_err(Error::Json)
                .map_err(tracerr::from_and_wrap!(=> store::Error))?;
            tokio::fs::write(path, json)
                .await
                .map_err(Error::Io)
                .map_err(tracerr::from_and_wrap!(=> store::Error))?;
        }

        *current = next;
        _ = self.inner.events.send(snapshot);
        Ok(())
    }
}

impl Store<Insert<listing::New>> for Memory {
    type Ok = Listing;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<listing::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let now = DateTime::now();
        let listing =
            materialize(new, listing::Id::new(), now.coerce(), now.coerce());

        let mut current = self.inner.listings.write().await;
        let mut next = current.clone();
        drop(next.insert(listing.id, listing.clone()));
        self.commit(&mut current, next).await?;

        Ok(listing)
    }
}

impl Store<Update<(listing::Id, listing::New)>> for Memory {
    type Ok = Listing;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Update((id, new)): Update<(listing::Id, listing::New)>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut current = self.inner.listings.write().await;
        let created_at = current
            .get(&id)
            .ok_or_else(|| {
                tracerr::new!(store::Error::from(Error::ListingNotExists(id)))
            })?
            .created_at;

        let listing = materialize(new, id, created_at, DateTime::now().coerce());

        let mut next = current.clone();
        drop(next.insert(id, listing.clone()));
        self.commit(&mut current, next).await?;

        Ok(listing)
    }
}

impl Store<Delete<By<Listing, listing::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let mut current = self.inner.listings.write().await;
        let mut next = current.clone();
        if next.remove(&id).is_none() {
            return Err(tracerr::new!(store::Error::from(
                Error::ListingNotExists(id)
            )));
        }
        self.commit(&mut current, next).await
    }
}

impl Store<Select<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.inner.listings.read().await.get(&id).cloned())
    }
}

impl Store<Select<By<Vec<Listing>, read::listing::list::Filter>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, read::listing::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let listings = self.inner.listings.read().await;
        Ok(Self::snapshot(&listings)
            .into_iter()
            .filter(|l| filter.matches(l))
            .collect())
    }
}

impl Store<Subscribe> for Memory {
    type Ok = broadcast::Receiver<Snapshot>;
    type Err = Traced<store::Error>;

    async fn execute(&self, _: Subscribe) -> Result<Self::Ok, Self::Err> {
        Ok(self.inner.events.subscribe())
    }
}

/// Builds a [`Listing`] out of the given [`listing::New`] record and the
/// store-assigned ID and timestamps.
fn materialize(
    new: listing::New,
    id: listing::Id,
    created_at: listing::CreationDateTime,
    updated_at: listing::UpdateDateTime,
) -> Listing {
    let listing::New {
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
    } = new;

    Listing {
        id,
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
        created_at,
        updated_at,
    }
}

/// [`Memory`] store error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Listing`] with the given ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Snapshot file I/O failed.
    #[display("snapshot file I/O failed: {_0}")]
    Io(io::Error),

    /// Snapshot (de)serialization failed.
    #[display("snapshot (de)serialization failed: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select, Subscribe, Update};

    use crate::{
        domain::listing::{
            self,
            details::{Details, VehicleDetails},
            Category, City, Contact, Description, QualityLabel, Slug, Status,
            SubCategory, Title, TransactionKind,
        },
        infra::Store as _,
        read,
    };

    use super::{Config, Memory};

    fn new_record(title: &str) -> listing::New {
        let title = Title::new(title).unwrap();
        listing::New {
            slug: Slug::new(&title),
            title,
            transaction_kind: TransactionKind::Sale,
            category: Category::Vehicle,
            sub_category: SubCategory::new("voiture").unwrap(),
            city: City::new("Port-Gentil").unwrap(),
            neighborhood: None,
            price: None,
            is_negotiable: false,
            rental: None,
            description: Description::new("Very reliable car.").unwrap(),
            details: Details::Vehicle(VehicleDetails {
                make: Some("Toyota".to_owned()),
                model: Some("Land Cruiser".to_owned()),
                ..VehicleDetails::default()
            }),
            photos: vec![],
            quality: QualityLabel::Incomplete,
            contact: Contact {
                name: "auto-immo (Sonny)".to_owned(),
                phone: "+241 07 10 02 75".to_owned(),
                email: "contact@auto-immo.info".to_owned(),
            },
            status: Status::Active,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_notifies_subscribers() {
        let store = Memory::new(Config::default()).unwrap();
        let mut events = store.execute(Subscribe).await.unwrap();

        let listing = store
            .execute(Insert(new_record("Toyota Land Cruiser - Port-Gentil")))
            .await
            .unwrap();
        assert_eq!(listing.created_at, listing.updated_at.coerce());

        let snapshot = events.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, listing.id);
    }

    #[tokio::test]
    async fn update_keeps_creation_time() {
        let store = Memory::new(Config::default()).unwrap();
        let listing = store
            .execute(Insert(new_record("Toyota Land Cruiser - Port-Gentil")))
            .await
            .unwrap();

        let mut replacement = new_record("Nissan Patrol - Libreville");
        replacement.status = Status::Paused;
        let updated = store
            .execute(Update((listing.id, replacement)))
            .await
            .unwrap();

        assert_eq!(updated.id, listing.id);
        assert_eq!(updated.created_at, listing.created_at);
        assert_eq!(updated.status, Status::Paused);

        let missing = store
            .execute(Update((listing::Id::new(), new_record("Gone - Owendo"))))
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn select_filters_by_equality() {
        let store = Memory::new(Config::default()).unwrap();
        let active = store
            .execute(Insert(new_record("Toyota Land Cruiser - Port-Gentil")))
            .await
            .unwrap();
        let mut paused_record = new_record("Nissan Patrol - Libreville");
        paused_record.status = Status::Paused;
        let _paused =
            store.execute(Insert(paused_record)).await.unwrap();

        let only_active = store
            .execute(Select(By::<Vec<listing::Listing>, _>::new(
                read::listing::list::Filter {
                    status: Some(Status::Active),
                    ..read::listing::list::Filter::default()
                },
            )))
            .await
            .unwrap();
        assert_eq!(only_active.len(), 1);
        assert_eq!(only_active[0].id, active.id);

        let by_id = store
            .execute(Select(By::<Option<listing::Listing>, _>::new(active.id)))
            .await
            .unwrap();
        assert_eq!(by_id.map(|l| l.id), Some(active.id));
    }

    #[tokio::test]
    async fn delete_requires_an_existing_listing() {
        let store = Memory::new(Config::default()).unwrap();
        let listing = store
            .execute(Insert(new_record("Toyota Land Cruiser - Port-Gentil")))
            .await
            .unwrap();

        store
            .execute(Delete(By::<listing::Listing, _>::new(listing.id)))
            .await
            .unwrap();
        assert!(store
            .execute(Delete(By::<listing::Listing, _>::new(listing.id)))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn snapshot_file_survives_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            snapshot_file: Some(dir.path().join("listings.json")),
        };

        let store = Memory::new(config.clone()).unwrap();
        let listing = store
            .execute(Insert(new_record("Toyota Land Cruiser - Port-Gentil")))
            .await
            .unwrap();
        drop(store);

        let reopened = Memory::new(config).unwrap();
        let found = reopened
            .execute(Select(By::<Option<listing::Listing>, _>::new(listing.id)))
            .await
            .unwrap();
        assert_eq!(found.map(|l| l.slug), Some(listing.slug));
    }
}
