#![allow(dead_code)]

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use std::sync::{Arc, Mutex};

use itinerary_ai_api::{
    models::generation::GenerationOutcome,
    routes,
    services::{
        generation_client::TextGenerator, itinerary_generation_service::ItineraryGenerator,
        knowledge_base::KnowledgeBase, training_itinerary_store::InMemoryTrainingStore,
    },
};

/// Generator double that answers every prompt with the same outcome.
pub struct StubGenerator {
    reply: GenerationOutcome,
    pub calls: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(reply: GenerationOutcome) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, _temperature: f32) -> GenerationOutcome {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

pub struct TestApp {
    pub generator: Arc<StubGenerator>,
    pub store: Arc<InMemoryTrainingStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_reply(GenerationOutcome::Generated(
            "After breakfast, enjoy a guided tour.".to_string(),
        ))
    }

    pub fn with_reply(reply: GenerationOutcome) -> Self {
        Self {
            generator: Arc::new(StubGenerator::new(reply)),
            store: Arc::new(InMemoryTrainingStore::new()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let generator = ItineraryGenerator::new(
            self.generator.clone(),
            self.store.clone(),
            Arc::new(KnowledgeBase::turkey()),
        );

        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(generator))
            .app_data(web::Data::from(self.store.clone()))
            .configure(routes::configure::<StubGenerator, InMemoryTrainingStore>)
    }
}

/// Start a local stand-in for the text generation API on a random port and
/// return its endpoint URL. The handler echoes the prompt back in `result`
/// unless a fixed status and body are given.
pub fn spawn_generation_api(status: u16, body: Option<serde_json::Value>) -> String {
    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().route(
            "/v1/generate",
            web::post().to(move |request: web::Json<serde_json::Value>| {
                let body = body.clone();
                async move {
                    let status = actix_web::http::StatusCode::from_u16(status).unwrap();
                    let body = body.unwrap_or_else(|| {
                        serde_json::json!({
                            "result": format!(
                                "echo: {} @ {}",
                                request["prompt"].as_str().unwrap_or_default(),
                                request["temperature"]
                            )
                        })
                    });
                    HttpResponse::build(status).json(body)
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind test generation api");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{}/v1/generate", addr)
}
