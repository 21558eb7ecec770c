//! Timing and stepping.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use super::settings::EngineParams;

/// Measures frame durations and paces the frame loop.
pub struct Clock {
    min_fps: u32,
    max_fps: u32,
    smoothing_step: usize,
    timestep: Duration,
    previous_timesteps: VecDeque<Duration>,
    last_frame_timepoint: Instant,
}

impl Clock {
    pub fn new(params: &EngineParams) -> Self {
        Clock {
            min_fps: params.min_fps,
            max_fps: params.max_fps,
            smoothing_step: params.time_smooth_step as usize,
            timestep: Duration::new(0, 0),
            previous_timesteps: VecDeque::new(),
            last_frame_timepoint: Instant::now(),
        }
    }

    /// Starts a new frame, and returns the duration of the last one.
    ///
    /// If a maximum fps is set, this blocks the calling thread until the frame budget is used
    /// up, cooperatively giving up timeslices to the OS scheduler.
    pub fn advance(&mut self) -> Duration {
        if self.max_fps > 0 {
            let td = Duration::from_millis(u64::from(1000 / self.max_fps));
            while self.last_frame_timepoint.elapsed() <= td {
                if (self.last_frame_timepoint.elapsed() + Duration::from_millis(2)) < td {
                    thread::sleep(Duration::from_millis(1));
                } else {
                    thread::yield_now();
                }
            }
        }

        let elapsed = self.last_frame_timepoint.elapsed();
        self.last_frame_timepoint = Instant::now();
        self.step(elapsed)
    }

    /// Gets the duration of the last frame.
    #[inline]
    pub fn frame_duration(&self) -> Duration {
        self.timestep
    }

    /// Gets current fps.
    #[inline]
    pub fn fps(&self) -> u32 {
        let nanos = self.timestep.as_secs() * 1_000_000_000 + u64::from(self.timestep.subsec_nanos());
        if nanos == 0 {
            0
        } else {
            (1_000_000_000.0 / nanos as f64) as u32
        }
    }

    fn step(&mut self, mut elapsed: Duration) -> Duration {
        // If fps lower than minimum, simply clamp it.
        if self.min_fps > 0 {
            elapsed = ::std::cmp::min(
                elapsed,
                Duration::from_millis(u64::from(1000 / self.min_fps)),
            );
        }

        if self.smoothing_step > 0 {
            self.previous_timesteps.push_front(elapsed);
            self.previous_timesteps.truncate(self.smoothing_step);

            let total = self
                .previous_timesteps
                .iter()
                .fold(Duration::new(0, 0), |acc, v| acc + *v);
            self.timestep = total / self.previous_timesteps.len() as u32;
        } else {
            self.timestep = elapsed;
        }

        self.timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(min_fps: u32, smooth: u32) -> Clock {
        let params = EngineParams {
            min_fps,
            max_fps: 0,
            time_smooth_step: smooth,
            ..EngineParams::default()
        };

        Clock::new(&params)
    }

    #[test]
    fn clamps_to_min_fps() {
        let mut clock = clock(10, 0);
        assert_eq!(clock.step(Duration::from_millis(500)), Duration::from_millis(100));
        assert_eq!(clock.step(Duration::from_millis(16)), Duration::from_millis(16));
    }

    #[test]
    fn smooths_over_last_frames() {
        let mut clock = clock(0, 2);
        assert_eq!(clock.step(Duration::from_millis(10)), Duration::from_millis(10));
        assert_eq!(clock.step(Duration::from_millis(30)), Duration::from_millis(20));
        assert_eq!(clock.step(Duration::from_millis(50)), Duration::from_millis(40));
        assert_eq!(clock.fps(), 25);
    }
}
