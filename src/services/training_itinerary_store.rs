//! Training Itinerary Store
//!
//! Storage for previously authored itineraries that the generator consults as
//! writing-style references. MongoDB is the production backend; an in-memory
//! store is used when no database is configured and in tests.
//!
//! Reference lookups match the tour style exactly and the trip length within
//! [`DAY_WINDOW`] days, closest length first, newest first among equals.

use crate::models::training::{ReferenceItinerary, TrainingItinerary};
use crate::models::trip::TourStyle;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    Client, Collection,
};
use std::{error::Error, fmt, sync::Arc};
use tokio::sync::RwLock;

pub const DAY_WINDOW: u32 = 2;

const DATABASE: &str = "Itineraries";
const COLLECTION: &str = "Training";

#[derive(Debug)]
pub enum StoreError {
    Database(mongodb::error::Error),
    Decode(mongodb::bson::de::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {}", err),
            StoreError::Decode(err) => write!(f, "Decode error: {}", err),
        }
    }
}

impl Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<mongodb::bson::de::Error> for StoreError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        StoreError::Decode(err)
    }
}

pub trait TrainingItineraryStore {
    /// Up to `limit` references for `tour_style` close to `days`, most relevant first.
    async fn find_reference_itineraries(
        &self,
        tour_style: TourStyle,
        days: u32,
        limit: usize,
    ) -> Result<Vec<ReferenceItinerary>, StoreError>;

    /// All training itineraries, newest first.
    async fn list(&self) -> Result<Vec<TrainingItinerary>, StoreError>;

    /// Store a new itinerary, returning it with its id and creation time set.
    async fn create(&self, itinerary: TrainingItinerary) -> Result<TrainingItinerary, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

fn day_distance(a: u32, b: u32) -> u32 {
    a.abs_diff(b)
}

pub struct MongoTrainingStore {
    client: Arc<Client>,
}

impl MongoTrainingStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<TrainingItinerary> {
        self.client.database(DATABASE).collection(COLLECTION)
    }

    fn reference_pipeline(tour_style: TourStyle, days: u32, limit: usize) -> Vec<Document> {
        let min_days = days.saturating_sub(DAY_WINDOW).max(1) as i64;
        let max_days = days.saturating_add(DAY_WINDOW) as i64;

        vec![
            doc! {
                "$match": {
                    "tour_type": tour_style.as_str(),
                    "days": { "$gte": min_days, "$lte": max_days },
                }
            },
            doc! {
                "$addFields": {
                    "day_distance": { "$abs": { "$subtract": ["$days", days as i64] } }
                }
            },
            doc! { "$sort": { "day_distance": 1, "created_at": -1 } },
            doc! { "$limit": limit as i64 },
        ]
    }
}

impl TrainingItineraryStore for MongoTrainingStore {
    async fn find_reference_itineraries(
        &self,
        tour_style: TourStyle,
        days: u32,
        limit: usize,
    ) -> Result<Vec<ReferenceItinerary>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let pipeline = Self::reference_pipeline(tour_style, days, limit);
        let mut cursor = self.collection().aggregate(pipeline).await?;

        let mut references = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            let itinerary: TrainingItinerary = mongodb::bson::from_document(document)?;
            references.push(ReferenceItinerary::from(itinerary));
        }
        Ok(references)
    }

    async fn list(&self) -> Result<Vec<TrainingItinerary>, StoreError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, mut itinerary: TrainingItinerary) -> Result<TrainingItinerary, StoreError> {
        itinerary.id = None;
        itinerary.created_at = Some(DateTime::now());

        let result = self.collection().insert_one(&itinerary).await?;
        itinerary.id = result.inserted_id.as_object_id();
        Ok(itinerary)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(DATABASE)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTrainingStore {
    itineraries: RwLock<Vec<TrainingItinerary>>,
}

impl InMemoryTrainingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrainingItineraryStore for InMemoryTrainingStore {
    async fn find_reference_itineraries(
        &self,
        tour_style: TourStyle,
        days: u32,
        limit: usize,
    ) -> Result<Vec<ReferenceItinerary>, StoreError> {
        let itineraries = self.itineraries.read().await;

        // Reversed so that equal timestamps still list the latest insert first.
        let mut matches: Vec<&TrainingItinerary> = itineraries
            .iter()
            .rev()
            .filter(|it| it.tour_type == tour_style && day_distance(it.days, days) <= DAY_WINDOW)
            .collect();
        matches.sort_by(|a, b| {
            day_distance(a.days, days)
                .cmp(&day_distance(b.days, days))
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(matches
            .into_iter()
            .take(limit)
            .cloned()
            .map(ReferenceItinerary::from)
            .collect())
    }

    async fn list(&self) -> Result<Vec<TrainingItinerary>, StoreError> {
        let mut itineraries: Vec<TrainingItinerary> =
            self.itineraries.read().await.iter().rev().cloned().collect();
        itineraries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(itineraries)
    }

    async fn create(&self, mut itinerary: TrainingItinerary) -> Result<TrainingItinerary, StoreError> {
        itinerary.id = Some(ObjectId::new());
        itinerary.created_at = Some(DateTime::now());

        self.itineraries.write().await.push(itinerary.clone());
        Ok(itinerary)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// The store chosen at startup.
pub enum TrainingStoreBackend {
    Mongo(MongoTrainingStore),
    InMemory(InMemoryTrainingStore),
}

impl TrainingStoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            TrainingStoreBackend::Mongo(_) => "mongodb",
            TrainingStoreBackend::InMemory(_) => "in_memory",
        }
    }
}

impl TrainingItineraryStore for TrainingStoreBackend {
    async fn find_reference_itineraries(
        &self,
        tour_style: TourStyle,
        days: u32,
        limit: usize,
    ) -> Result<Vec<ReferenceItinerary>, StoreError> {
        match self {
            TrainingStoreBackend::Mongo(store) => {
                store.find_reference_itineraries(tour_style, days, limit).await
            }
            TrainingStoreBackend::InMemory(store) => {
                store.find_reference_itineraries(tour_style, days, limit).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<TrainingItinerary>, StoreError> {
        match self {
            TrainingStoreBackend::Mongo(store) => store.list().await,
            TrainingStoreBackend::InMemory(store) => store.list().await,
        }
    }

    async fn create(&self, itinerary: TrainingItinerary) -> Result<TrainingItinerary, StoreError> {
        match self {
            TrainingStoreBackend::Mongo(store) => store.create(itinerary).await,
            TrainingStoreBackend::InMemory(store) => store.create(itinerary).await,
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            TrainingStoreBackend::Mongo(store) => store.ping().await,
            TrainingStoreBackend::InMemory(store) => store.ping().await,
        }
    }
}
