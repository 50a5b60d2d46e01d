use crate::services::training_itinerary_store::TrainingItineraryStore;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check<S>(store: web::Data<S>) -> impl Responder
where
    S: TrainingItineraryStore + 'static,
{
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store_result = check_training_store(store.get_ref()).await;
    if store_result.status != "ok" {
        health.status = "degraded".to_string();
    }
    health
        .services
        .insert("training_store".to_string(), store_result);

    HttpResponse::Ok().json(health)
}

async fn check_training_store<S: TrainingItineraryStore>(store: &S) -> ServiceStatus {
    match store.ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(e) => ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("Training store ping failed: {}", e)),
        },
    }
}
