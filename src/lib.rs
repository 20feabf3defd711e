pub mod bbox;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod identity_counter;
pub mod observation;
pub mod registry;
pub mod trajectory;

mod circular_queue;

pub use classifier::{Direction, Orientation};
pub use engine::{CountingLine, CrossingEvent, LineCrossingEngine, Statistics, TickReport};
pub use frame::Frame;
pub use observation::TrackedObservation;

use clock::{Clock, SystemClock};
use config::AppConfig;
use error::Error;
use identity_counter::IdentityCounter;
use nalgebra as na;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::warn;
use trajectory::TrajectoryStore;

/// Scalar type usable by the geometry primitives.
pub trait Coord: na::Scalar + num_traits::Float {}

impl<T> Coord for T where T: na::Scalar + num_traits::Float {}

pub trait LineCounting<I> {
    fn update(&mut self, frames: &[Frame<I>], src: &str) -> TickReport<I>;
    fn statistics(&self, src: &str) -> Statistics;
    fn events(&self, src: &str) -> &[CrossingEvent<I>];
    fn total_unique(&self, src: &str) -> usize;
    fn reset(&mut self, src: &str);
}

struct Stream<I> {
    engine: LineCrossingEngine<I>,
    identities: IdentityCounter<I>,
    trajectories: TrajectoryStore<I>,
    last_frame: Option<u64>,
}

type ClockFactory = Box<dyn Fn() -> Box<dyn Clock + Send> + Send>;

/// Counts crossings for any number of video sources, each with its own engine.
pub struct StreamCounter<I = u64> {
    line: CountingLine,
    trajectory_len: usize,
    clock: ClockFactory,
    streams: HashMap<String, Stream<I>>,
}

impl<I: Clone + Eq + Hash + fmt::Debug> StreamCounter<I> {
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        Self::with_clock(config, SystemClock)
    }

    /// Every stream gets its own copy of `clock`.
    pub fn with_clock<C>(config: &AppConfig, clock: C) -> Result<Self, Error>
    where
        C: Clock + Clone + Send + 'static,
    {
        let line = CountingLine::from_config(&config.line)?;

        Ok(Self {
            line,
            trajectory_len: config.trajectory.max_len,
            clock: Box::new(move || Box::new(clock.clone()) as Box<dyn Clock + Send>),
            streams: HashMap::new(),
        })
    }

    fn stream_mut(&mut self, src: &str) -> &mut Stream<I> {
        let (line, trajectory_len, clock) = (self.line, self.trajectory_len, &self.clock);

        self.streams.entry(src.to_string()).or_insert_with(|| Stream {
            engine: LineCrossingEngine::from_line(line, clock()),
            identities: IdentityCounter::new(),
            trajectories: TrajectoryStore::new(trajectory_len),
            last_frame: None,
        })
    }

    /// Recent centroids of one identity, oldest first.
    pub fn trajectory(&self, src: &str, identity: &I) -> Vec<na::Point2<f32>> {
        self.streams
            .get(src)
            .map(|s| s.trajectories.trajectory(identity))
            .unwrap_or_default()
    }

    pub fn class_counts(&self, src: &str) -> std::collections::BTreeMap<String, u64> {
        self.streams
            .get(src)
            .map(|s| s.engine.class_counts())
            .unwrap_or_default()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.streams.keys().map(String::as_str)
    }
}

impl<I: Clone + Eq + Hash + fmt::Debug> LineCounting<I> for StreamCounter<I> {
    fn update(&mut self, frames: &[Frame<I>], src: &str) -> TickReport<I> {
        let stream = self.stream_mut(src);
        let mut report = TickReport::default();

        for frame in frames {
            if let Some(last) = stream.last_frame {
                if frame.index < last {
                    warn!(src, frame = frame.index, last, "frame delivered out of order");
                }
            }
            stream.last_frame = Some(frame.index);

            for obs in frame.iter() {
                stream.identities.observe(obs.identity.clone());

                if let Ok(c) = obs.checked_centroid() {
                    stream.trajectories.push(obs.identity.clone(), c);
                }
            }

            report.merge(stream.engine.update(&frame.observations));
        }

        report
    }

    fn statistics(&self, src: &str) -> Statistics {
        self.streams
            .get(src)
            .map(|s| s.engine.statistics())
            .unwrap_or_default()
    }

    fn events(&self, src: &str) -> &[CrossingEvent<I>] {
        self.streams
            .get(src)
            .map(|s| s.engine.events())
            .unwrap_or(&[])
    }

    fn total_unique(&self, src: &str) -> usize {
        self.streams
            .get(src)
            .map(|s| s.identities.total())
            .unwrap_or(0)
    }

    fn reset(&mut self, src: &str) {
        if let Some(stream) = self.streams.get_mut(src) {
            stream.engine.reset();
        }
    }
}
