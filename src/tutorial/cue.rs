use std::time::Duration;

const SLIDE_MS: u64 = 600;
const SLIDE_PAUSE_MS: u64 = 100;
const SLIDE_PERIOD_MS: u64 = 2 * (SLIDE_MS + SLIDE_PAUSE_MS);
const PULSE_HALF_MS: u64 = 400;
const PULSE_PERIOD_MS: u64 = 2 * PULSE_HALF_MS;

const PULSE_SCALE: f32 = 1.2;
const PULSE_OPACITY: f32 = 0.7;

/// One frame of the arrow animation for the current tutorial step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueFrame {
    /// How far the arrow has slid toward the expected direction, 0..=1
    pub slide: f32,
    /// Arrow scale, 1..=1.2
    pub scale: f32,
    /// Arrow opacity, 0.7..=1
    pub opacity: f32,
}

impl CueFrame {
    /// Slide distance in whole cells for a cue that travels `max_cells`
    pub fn offset_cells(&self, max_cells: u16) -> u16 {
        (self.slide * f32::from(max_cells)).round() as u16
    }

    /// True in the swollen half of the pulse
    pub fn is_emphasized(&self) -> bool {
        self.scale > (1.0 + PULSE_SCALE) / 2.0
    }
}

/// The cue at `elapsed` time since the step began.
///
/// The slide goes out for 600 ms, rests 100 ms, comes back for 600 ms and
/// rests 100 ms. The pulse grows for 400 ms and shrinks for 400 ms. Both
/// repeat until the step is matched.
pub fn cue_frame(elapsed: Duration) -> CueFrame {
    let ms = elapsed.as_millis() as u64;

    let t = ms % SLIDE_PERIOD_MS;
    let slide = if t < SLIDE_MS {
        t as f32 / SLIDE_MS as f32
    } else if t < SLIDE_MS + SLIDE_PAUSE_MS {
        1.0
    } else if t < 2 * SLIDE_MS + SLIDE_PAUSE_MS {
        1.0 - (t - SLIDE_MS - SLIDE_PAUSE_MS) as f32 / SLIDE_MS as f32
    } else {
        0.0
    };

    let p = ms % PULSE_PERIOD_MS;
    let swell = if p < PULSE_HALF_MS {
        p as f32 / PULSE_HALF_MS as f32
    } else {
        1.0 - (p - PULSE_HALF_MS) as f32 / PULSE_HALF_MS as f32
    };

    CueFrame {
        slide,
        scale: 1.0 + (PULSE_SCALE - 1.0) * swell,
        opacity: 1.0 - (1.0 - PULSE_OPACITY) * swell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> CueFrame {
        cue_frame(Duration::from_millis(ms))
    }

    #[test]
    fn test_starts_at_rest() {
        let frame = at(0);
        assert_eq!(frame.slide, 0.0);
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn test_slide_phases() {
        assert_eq!(at(300).slide, 0.5);
        assert_eq!(at(650).slide, 1.0);
        assert_eq!(at(1000).slide, 0.5);
        assert_eq!(at(1350).slide, 0.0);
    }

    #[test]
    fn test_pulse_peak() {
        let peak = at(400);
        assert!((peak.scale - 1.2).abs() < 1e-6);
        assert!((peak.opacity - 0.7).abs() < 1e-6);
        assert!(peak.is_emphasized());
        assert!(!at(50).is_emphasized());
    }

    #[test]
    fn test_repeats() {
        assert_eq!(at(300), at(300 + 5600));
    }

    #[test]
    fn test_offset_cells() {
        assert_eq!(at(650).offset_cells(2), 2);
        assert_eq!(at(0).offset_cells(2), 0);
        assert_eq!(at(300).offset_cells(2), 1);
    }
}
