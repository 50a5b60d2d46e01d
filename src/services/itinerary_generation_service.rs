use crate::models::{
    generation::GenerationOutcome,
    itinerary::{DayPlan, ItineraryResult},
    training::ReferenceItinerary,
    trip::{TripParameters, TripRequest},
};
use crate::services::day_allocation::{allocate_days, DestinationDays};
use crate::services::generation_client::TextGenerator;
use crate::services::knowledge_base::KnowledgeBase;
use crate::services::prompt_builder::{
    build_day_prompt, build_title_prompt, DayPromptContext, MAX_PROMPT_EXAMPLES,
};
use crate::services::training_examples::extract_day_examples;
use crate::services::training_itinerary_store::TrainingItineraryStore;
use chrono::{Days, Local, NaiveDate, Utc};
use futures::future::join_all;
use log::{info, warn};
use std::{str::FromStr, sync::Arc};

const TITLE_TEMPERATURE: f32 = 0.8;
const DAY_TEMPERATURE: f32 = 0.7;
const REFERENCE_LIMIT: usize = 3;
const EXAMPLES_PER_REFERENCE: usize = 2;
const ACTIVITIES_PER_DAY: usize = 2;

/// How the per-day generation calls are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// One call after another, in day order.
    #[default]
    Sequential,
    /// All day calls in flight together. Day prompts never depend on each
    /// other's output, so the result is the same.
    Concurrent,
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(GenerationMode::Sequential),
            "concurrent" => Ok(GenerationMode::Concurrent),
            other => Err(format!("unknown generation mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItineraryGenerationConfig {
    pub title_temperature: f32,
    pub day_temperature: f32,
    pub reference_limit: usize,
    pub examples_per_reference: usize,
    pub mode: GenerationMode,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            title_temperature: TITLE_TEMPERATURE,
            day_temperature: DAY_TEMPERATURE,
            reference_limit: REFERENCE_LIMIT,
            examples_per_reference: EXAMPLES_PER_REFERENCE,
            mode: GenerationMode::Sequential,
        }
    }
}

/// Position of one day within the trip, before any text is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlot {
    pub day_index: u32,
    pub date: NaiveDate,
    pub destination: String,
    pub previous_destination: Option<String>,
    pub is_first_day: bool,
    pub is_last_day: bool,
    pub is_destination_change: bool,
}

/// Walk the allocation in order and lay out one slot per day.
pub fn plan_day_slots(allocation: &[DestinationDays], start_date: NaiveDate) -> Vec<DaySlot> {
    let total_days: u32 = allocation.iter().map(|a| a.days).sum();
    let mut slots = Vec::with_capacity(total_days as usize);
    let mut previous: Option<&str> = None;
    let mut day_index = 1;

    for entry in allocation {
        for _ in 0..entry.days {
            slots.push(DaySlot {
                day_index,
                date: start_date
                    .checked_add_days(Days::new(u64::from(day_index - 1)))
                    .unwrap_or(NaiveDate::MAX),
                destination: entry.destination.clone(),
                previous_destination: previous.map(str::to_string),
                is_first_day: day_index == 1,
                is_last_day: day_index == total_days,
                is_destination_change: previous != Some(entry.destination.as_str()),
            });
            previous = Some(entry.destination.as_str());
            day_index += 1;
        }
    }

    slots
}

pub struct ItineraryGenerator<G, S> {
    generator: Arc<G>,
    store: Arc<S>,
    knowledge_base: Arc<KnowledgeBase>,
    config: ItineraryGenerationConfig,
}

impl<G: TextGenerator, S: TrainingItineraryStore> ItineraryGenerator<G, S> {
    pub fn new(generator: Arc<G>, store: Arc<S>, knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self::with_config(generator, store, knowledge_base, ItineraryGenerationConfig::default())
    }

    pub fn with_config(
        generator: Arc<G>,
        store: Arc<S>,
        knowledge_base: Arc<KnowledgeBase>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self {
            generator,
            store,
            knowledge_base,
            config,
        }
    }

    /// Generate an itinerary for a raw request, defaulting missing fields.
    pub async fn generate_itinerary(&self, request: TripRequest) -> ItineraryResult {
        let params = request.resolve(Local::now().date_naive());
        self.generate_for(&params).await
    }

    /// Generate an itinerary for fully resolved trip parameters.
    pub async fn generate_for(&self, params: &TripParameters) -> ItineraryResult {
        info!(
            "Generating {}-day {} itinerary for {:?}",
            params.total_days, params.tour_style, params.destinations
        );

        let references = self.fetch_reference_itineraries(params).await;
        let day_examples = self.collect_day_examples(&references);
        info!(
            "Found {} training examples in {} reference itineraries",
            day_examples.len(),
            references.len()
        );

        let title = self.generate_title(params, &references).await;

        let allocation = allocate_days(&self.knowledge_base, &params.destinations, params.total_days);
        let slots = plan_day_slots(&allocation, params.start_date);

        let prompts: Vec<String> = slots
            .iter()
            .map(|slot| self.day_prompt(slot, params, &day_examples))
            .collect();
        let descriptions = self.generate_descriptions(&prompts).await;

        let days: Vec<DayPlan> = slots
            .into_iter()
            .zip(descriptions)
            .map(|(slot, description)| self.build_day_plan(slot, description))
            .collect();

        let result = ItineraryResult {
            title,
            tour_style: params.tour_style,
            total_days: params.total_days,
            destinations: params.destinations.clone(),
            traveler_count: params.traveler_count,
            days,
            generated_at: Utc::now(),
            reference_itineraries_consulted: references.len(),
        };

        let degraded = result.degraded_count();
        if degraded > 0 {
            warn!("{} generation calls fell back to error text", degraded);
        }
        result
    }

    async fn fetch_reference_itineraries(&self, params: &TripParameters) -> Vec<ReferenceItinerary> {
        match self
            .store
            .find_reference_itineraries(params.tour_style, params.total_days, self.config.reference_limit)
            .await
        {
            Ok(references) => references,
            Err(e) => {
                warn!("Failed to fetch training itineraries, continuing without examples: {}", e);
                Vec::new()
            }
        }
    }

    fn collect_day_examples(&self, references: &[ReferenceItinerary]) -> Vec<String> {
        references
            .iter()
            .flat_map(|r| extract_day_examples(&r.content, self.config.examples_per_reference))
            .collect()
    }

    async fn generate_title(
        &self,
        params: &TripParameters,
        references: &[ReferenceItinerary],
    ) -> GenerationOutcome {
        let example_titles: Vec<String> = references
            .iter()
            .take(MAX_PROMPT_EXAMPLES)
            .filter_map(|r| r.title.clone())
            .collect();

        let prompt = build_title_prompt(
            self.knowledge_base.country(),
            &params.destinations,
            params.total_days,
            params.tour_style,
            &example_titles,
        );

        self.generator
            .generate(&prompt, self.config.title_temperature)
            .await
            .map_generated(|title| title.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string())
    }

    fn day_prompt(&self, slot: &DaySlot, params: &TripParameters, examples: &[String]) -> String {
        let context = DayPromptContext {
            destination: &slot.destination,
            previous_destination: slot.previous_destination.as_deref(),
            is_first_day: slot.is_first_day,
            is_last_day: slot.is_last_day,
            is_destination_change: slot.is_destination_change,
            tour_style: params.tour_style,
            interests: &params.interests,
            highlights: self.knowledge_base.highlights(&slot.destination),
        };
        build_day_prompt(&context, examples)
    }

    async fn generate_descriptions(&self, prompts: &[String]) -> Vec<GenerationOutcome> {
        let temperature = self.config.day_temperature;

        let outcomes = match self.config.mode {
            GenerationMode::Sequential => {
                let mut outcomes = Vec::with_capacity(prompts.len());
                for prompt in prompts {
                    outcomes.push(self.generator.generate(prompt, temperature).await);
                }
                outcomes
            }
            GenerationMode::Concurrent => {
                join_all(prompts.iter().map(|p| self.generator.generate(p, temperature))).await
            }
        };

        outcomes
            .into_iter()
            .map(|o| o.map_generated(|text| text.trim().to_string()))
            .collect()
    }

    fn build_day_plan(&self, slot: DaySlot, description: GenerationOutcome) -> DayPlan {
        let activities = self
            .knowledge_base
            .highlights(&slot.destination)
            .iter()
            .take(ACTIVITIES_PER_DAY)
            .cloned()
            .collect();

        DayPlan {
            day_index: slot.day_index,
            date: slot.date,
            meals: if slot.is_first_day {
                Vec::new()
            } else {
                vec!["Breakfast".to_string()]
            },
            lodging: if slot.is_last_day {
                None
            } else {
                Some(format!("Hotel in {}", slot.destination))
            },
            destination: slot.destination,
            description,
            activities,
        }
    }
}
