use std::time::Instant;

pub struct TimeManager {
    start: Instant,
    instant: Instant,
    delta: f32,
}

impl TimeManager {
    pub fn new() -> TimeManager {
        let now = Instant::now();

        TimeManager {
            start: now,
            instant: now,
            delta: 0.0,
        }
    }

    pub fn update(&mut self) {
        let last_instant = self.instant;
        self.instant = Instant::now();
        self.delta = self.instant.duration_since(last_instant).as_secs_f32();
    }

    /// Seconds between the last two updates.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds from creation to the last update.
    pub fn elapsed(&self) -> f32 {
        self.instant.duration_since(self.start).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn delta_is_measured_in_seconds() {
        let mut time_manager = TimeManager::new();
        assert_eq!(time_manager.delta(), 0.0);

        thread::sleep(Duration::from_millis(20));
        time_manager.update();

        assert!(time_manager.delta() >= 0.02);
        assert!(time_manager.delta() < 5.0);
        assert_eq!(time_manager.elapsed(), time_manager.delta());
    }
}
