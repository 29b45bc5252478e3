use super::kv::KeyValueStore;

pub const HIGH_SCORE_KEY: &str = "HIGH_SCORE";

/// Read the recorded high score.
///
/// A missing, unreadable or malformed record counts as no record and
/// yields 0.
pub fn load_high_score(store: &dyn KeyValueStore) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(value)) => match value.trim().parse::<u32>() {
            Ok(score) => {
                log::info!("loaded high score {}", score);
                score
            }
            Err(_) => {
                log::warn!("ignoring malformed high score {:?}", value);
                0
            }
        },
        Ok(None) => 0,
        Err(e) => {
            log::warn!("could not read high score: {:#}", e);
            0
        }
    }
}
