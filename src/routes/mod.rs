pub mod health;
pub mod itinerary;
pub mod training_itinerary;

use crate::services::{
    generation_client::TextGenerator, training_itinerary_store::TrainingItineraryStore,
};
use actix_web::web;

/// Register every route. The app must carry `web::Data<ItineraryGenerator<G, S>>`
/// and `web::Data<S>`.
pub fn configure<G, S>(cfg: &mut web::ServiceConfig)
where
    G: TextGenerator + 'static,
    S: TrainingItineraryStore + 'static,
{
    cfg.route("/health", web::get().to(health::health_check::<S>))
        .service(
            web::scope("/api")
                .route(
                    "/itineraries/generate",
                    web::post().to(itinerary::generate::<G, S>),
                )
                .service(
                    web::scope("/training-itineraries")
                        .route("", web::get().to(training_itinerary::get_all::<S>))
                        .route("", web::post().to(training_itinerary::create::<S>)),
                ),
        );
}
