use crate::{
    models::training::NewTrainingItinerary,
    services::{
        training_examples::normalize_training_content,
        training_itinerary_store::TrainingItineraryStore,
    },
};
use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde_json::json;

/*
    GET /api/training-itineraries
*/
pub async fn get_all<S>(store: web::Data<S>) -> impl Responder
where
    S: TrainingItineraryStore + 'static,
{
    match store.list().await {
        Ok(itineraries) => HttpResponse::Ok().json(itineraries),
        Err(err) => {
            error!("Failed to load training itineraries: {}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to load training itineraries" }))
        }
    }
}

/*
    POST /api/training-itineraries
*/
pub async fn create<S>(store: web::Data<S>, input: web::Json<NewTrainingItinerary>) -> impl Responder
where
    S: TrainingItineraryStore + 'static,
{
    let mut itinerary = match input.into_inner().validate() {
        Some(itinerary) => itinerary,
        None => {
            return HttpResponse::BadRequest().json(json!({ "error": "Missing required fields" }))
        }
    };
    itinerary.content = normalize_training_content(&itinerary.content);

    match store.create(itinerary).await {
        Ok(saved) => HttpResponse::Ok().json(json!({
            "success": true,
            "id": saved.id.map(|id| id.to_hex()),
            "message": "Training itinerary added successfully",
        })),
        Err(err) => {
            error!("Failed to create training itinerary: {}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to create training itinerary" }))
        }
    }
}
