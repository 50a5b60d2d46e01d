use crate::{
    models::trip::{TripRequest, MAX_TOTAL_DAYS},
    services::{
        generation_client::TextGenerator, itinerary_generation_service::ItineraryGenerator,
        training_itinerary_store::TrainingItineraryStore,
    },
};
use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde_json::json;

/*
    /api/itineraries/generate
*/
pub async fn generate<G, S>(
    generator: web::Data<ItineraryGenerator<G, S>>,
    input: web::Json<TripRequest>,
) -> impl Responder
where
    G: TextGenerator + 'static,
    S: TrainingItineraryStore + 'static,
{
    info!("Generate itinerary request: {:?}", input);

    if input.exceeds_max_days() {
        return HttpResponse::BadRequest().json(json!({
            "error": format!("Trip length cannot exceed {} days", MAX_TOTAL_DAYS)
        }));
    }

    let itinerary = generator.generate_itinerary(input.into_inner()).await;
    HttpResponse::Ok().json(itinerary)
}
