use crate::record::{Frame, Sample};
use crate::simulation::clock::Clock;
use crate::simulation::generator::TelemetryGenerator;
use std::iter::FusedIterator;
use std::time::Duration;

/// Lazy, finite sequence of samples from one production run.
///
/// The clock is asked to sleep for one sampling interval between samples,
/// so a wall-clock stream is throttled to the sampling rate. Dropping the
/// stream early releases nothing but the borrow of the generator.
pub struct SampleStream<'a, C: Clock> {
    generator: &'a mut TelemetryGenerator<C>,
    interval: Duration,
    remaining: usize,
    emitted: usize,
}

impl<'a, C: Clock> Iterator for SampleStream<'a, C> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.remaining == 0 {
            return None;
        }
        if self.emitted > 0 {
            self.generator.clock.sleep(self.interval);
        }
        let sample = self.generator.step();
        self.remaining -= 1;
        self.emitted += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, C: Clock> ExactSizeIterator for SampleStream<'a, C> {}

impl<'a, C: Clock> FusedIterator for SampleStream<'a, C> {}

impl<C: Clock> TelemetryGenerator<C> {
    /// Resets the generator and starts a new production run of
    /// `round(duration × rate)` samples.
    pub fn stream(&mut self) -> SampleStream<'_, C> {
        self.reset();
        let remaining = self.config().sample_count();
        let interval = self.config().interval();
        SampleStream {
            generator: self,
            interval,
            remaining,
            emitted: 0,
        }
    }

    pub fn collect_samples(&mut self) -> Vec<Sample> {
        self.stream().collect()
    }

    /// Materializes one full production run as a table.
    pub fn collect_frame(&mut self) -> Frame {
        Frame::from_samples(&self.collect_samples())
    }
}
