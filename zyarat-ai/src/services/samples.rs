//! Canned artifacts for sample-data mode
//!
//! Lets the HTTP surface and clients be exercised without calling the model.

use crate::models::RecognizedArtifact;
use rand::Rng;
use serde_json::Map;

fn sample(
    title: &str,
    period: &str,
    description: &str,
    significance: &str,
    location: &str,
    confidence: f64,
) -> RecognizedArtifact {
    RecognizedArtifact {
        title: title.to_string(),
        period: period.to_string(),
        description: description.to_string(),
        significance: significance.to_string(),
        location: location.to_string(),
        confidence,
        extra: Map::new(),
    }
}

/// The fixed sample list
pub fn sample_artifacts() -> Vec<RecognizedArtifact> {
    vec![
        sample(
            "Carthaginian Mask",
            "Punic Period (814-146 BCE)",
            "A ceremonial mask used in religious rituals by the Carthaginians, featuring distinctive facial features and symbolic decorations.",
            "These masks played a crucial role in Carthaginian religious ceremonies, particularly in worship of their primary deity Baal Hammon.",
            "Carthage, Tunisia",
            0.92,
        ),
        sample(
            "Roman Mosaic",
            "Roman Period (146 BCE-439 CE)",
            "A detailed floor mosaic depicting scenes from daily life and mythology, created using small colored stones or glass fragments.",
            "Roman mosaics in Tunisia represent some of the finest examples in the Mediterranean, showcasing the region's prosperity during Roman rule.",
            "Bardo National Museum, Tunis",
            0.88,
        ),
        sample(
            "Aghlabid Coin",
            "Aghlabid Dynasty (800-909 CE)",
            "A gold dinar featuring Arabic calligraphy and Islamic symbols, minted during the Aghlabid dynasty's rule of Ifriqiya.",
            "These coins demonstrate the economic strength of the Aghlabid emirate and the spread of Islamic culture in North Africa.",
            "Kairouan, Tunisia",
            0.85,
        ),
        sample(
            "Berber Pottery",
            "Various periods (ancient to modern)",
            "Hand-crafted ceramic vessel with geometric patterns typical of Berber artistic traditions, used for storing water or grain.",
            "Berber pottery represents one of the oldest continuous craft traditions in North Africa, with techniques passed down through generations.",
            "Sejnane, Tunisia",
            0.89,
        ),
    ]
}

/// Pick one sample uniformly at random
pub fn random_sample() -> RecognizedArtifact {
    let mut samples = sample_artifacts();
    let index = rand::thread_rng().gen_range(0..samples.len());
    samples.swap_remove(index)
}
