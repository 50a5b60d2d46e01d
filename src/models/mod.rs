pub mod destination;
pub mod generation;
pub mod itinerary;
pub mod training;
pub mod trip;
