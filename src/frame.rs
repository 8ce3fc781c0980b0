/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

/// Infinite iterator that yields one `FrameInfo` per rendered frame
pub struct FrameClock {
    frame_number: u64,
    start_time: std::time::Instant,
    last_frame_time: std::time::Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = std::time::Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameClock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo {
            number: self.frame_number,
            time,
            delta,
        };

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_numbers_increase() {
        let mut clock = FrameClock::new();
        let a = clock.next().unwrap();
        let b = clock.next().unwrap();
        assert_eq!(a.number, 0);
        assert_eq!(b.number, 1);
    }

    #[test]
    fn test_time_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.next().unwrap();
        let b = clock.next().unwrap();
        assert!(b.time >= a.time);
        assert!(b.delta >= 0.0);
    }
}
