pub mod day_allocation;
pub mod generation_client;
pub mod itinerary_generation_service;
pub mod knowledge_base;
pub mod prompt_builder;
pub mod training_examples;
pub mod training_itinerary_store;
