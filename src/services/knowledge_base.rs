use crate::models::destination::DestinationProfile;
use std::collections::HashMap;

/// Stay length assumed for destinations without a profile.
pub const DEFAULT_TYPICAL_STAY_LENGTH: u32 = 2;

/// Read-only destination knowledge shared by every generation request.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    country: String,
    profiles: HashMap<String, DestinationProfile>,
}

impl KnowledgeBase {
    pub fn new(country: &str, profiles: Vec<DestinationProfile>) -> Self {
        Self {
            country: country.to_string(),
            profiles: profiles.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    /// Built-in profiles for the Turkish destinations the tours cover.
    pub fn turkey() -> Self {
        Self::new(
            "Turkey",
            vec![
                DestinationProfile::new(
                    "Istanbul",
                    "Historic city bridging Europe and Asia",
                    &["Hagia Sophia", "Blue Mosque", "Topkapi Palace", "Grand Bazaar", "Bosphorus Cruise"],
                    3,
                ),
                DestinationProfile::new(
                    "Cappadocia",
                    "Famous for fairy chimneys and hot air balloons",
                    &["Hot Air Balloon Ride", "Goreme Open Air Museum", "Underground Cities", "Uchisar Castle"],
                    2,
                ),
                DestinationProfile::new(
                    "Ephesus",
                    "Ancient Greek city with remarkable ruins",
                    &["Library of Celsus", "Great Theatre", "Temple of Artemis", "House of Virgin Mary"],
                    1,
                ),
                DestinationProfile::new(
                    "Pamukkale",
                    "White travertine terraces and ancient Hierapolis",
                    &["Travertine Pools", "Hierapolis Ancient City", "Cleopatra Pool"],
                    1,
                ),
                DestinationProfile::new(
                    "Antalya",
                    "Mediterranean coast with beaches and history",
                    &["Kaleici Old Town", "Duden Waterfalls", "Perge Ancient City", "Beaches"],
                    2,
                ),
            ],
        )
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn profile(&self, destination: &str) -> Option<&DestinationProfile> {
        self.profiles.get(destination)
    }

    pub fn typical_stay_length(&self, destination: &str) -> u32 {
        self.profile(destination)
            .map(|p| p.typical_stay_length)
            .unwrap_or(DEFAULT_TYPICAL_STAY_LENGTH)
    }

    /// Highlights for a destination, empty when it is unknown.
    pub fn highlights(&self, destination: &str) -> &[String] {
        self.profile(destination)
            .map(|p| p.highlights.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::turkey()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_destination() {
        let kb = KnowledgeBase::turkey();
        assert_eq!(kb.country(), "Turkey");
        assert_eq!(kb.typical_stay_length("Istanbul"), 3);
        assert_eq!(kb.highlights("Pamukkale")[0], "Travertine Pools");
    }

    #[test]
    fn test_unknown_destination_falls_back() {
        let kb = KnowledgeBase::turkey();
        assert!(kb.profile("Bodrum").is_none());
        assert_eq!(kb.typical_stay_length("Bodrum"), DEFAULT_TYPICAL_STAY_LENGTH);
        assert!(kb.highlights("Bodrum").is_empty());
    }
}
