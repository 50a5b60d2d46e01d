use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use itinerary_ai_api::{
    db, routes,
    services::{
        generation_client::{GenerationClient, GenerationClientConfig},
        itinerary_generation_service::{
            GenerationMode, ItineraryGenerationConfig, ItineraryGenerator,
        },
        knowledge_base::KnowledgeBase,
        training_itinerary_store::{InMemoryTrainingStore, MongoTrainingStore, TrainingStoreBackend},
    },
};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

async fn select_training_store() -> TrainingStoreBackend {
    match std::env::var("MONGODB_URI") {
        Ok(uri) => match db::mongo::create_mongo_client(&uri).await {
            Ok(client) => TrainingStoreBackend::Mongo(MongoTrainingStore::new(client)),
            Err(e) => {
                warn!("MongoDB unavailable ({}), using in-memory training store", e);
                TrainingStoreBackend::InMemory(InMemoryTrainingStore::new())
            }
        },
        Err(_) => {
            warn!("MONGODB_URI not set, using in-memory training store");
            TrainingStoreBackend::InMemory(InMemoryTrainingStore::new())
        }
    }
}

fn generation_mode() -> GenerationMode {
    match std::env::var("GENERATION_MODE") {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!("{}, falling back to sequential", e);
            GenerationMode::Sequential
        }),
        Err(_) => GenerationMode::Sequential,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let client_config = GenerationClientConfig::from_env();
    info!(
        "Using AI API at {} (timeout {:?})",
        client_config.api_url, client_config.timeout
    );
    let generation_client = GenerationClient::new(client_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let store = Arc::new(select_training_store().await);
    info!("Training store: {}", store.kind());

    let generator = web::Data::new(ItineraryGenerator::with_config(
        Arc::new(generation_client),
        store.clone(),
        Arc::new(KnowledgeBase::turkey()),
        ItineraryGenerationConfig {
            mode: generation_mode(),
            ..Default::default()
        },
    ));
    let store_data = web::Data::from(store);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(generator.clone())
            .app_data(store_data.clone())
            .app_data(web::JsonConfig::default().limit(1 << 20))
            .configure(routes::configure::<GenerationClient, TrainingStoreBackend>)
    })
    .bind((host, port))?
    .run()
    .await
}
