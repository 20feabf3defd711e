use chrono::{DateTime, Local};
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, info, warn};

use crate::classifier::{classify, Direction, Orientation};
use crate::clock::{Clock, SystemClock};
use crate::config::LineConfig;
use crate::error::Error;
use crate::geometry::LineSegment;
use crate::observation::{GeometryIssue, TrackedObservation};
use crate::registry::IdentityRegistry;

/// The line being counted and the axis hint used to label crossings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountingLine {
    pub segment: LineSegment,
    pub orientation: Orientation,
}

impl CountingLine {
    pub fn new(segment: LineSegment, orientation: Orientation) -> Self {
        Self {
            segment,
            orientation,
        }
    }

    pub fn from_config(config: &LineConfig) -> Result<Self, Error> {
        Ok(Self::new(config.segment()?, config.orientation))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CrossingEvent<I = u64> {
    #[serde(rename = "id")]
    pub identity: I,
    pub timestamp: DateTime<Local>,
    pub direction: Direction,
    #[serde(rename = "class")]
    pub class_label: String,
    pub centroid: na::Point2<f32>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub total: u64,
    pub up: u64,
    pub down: u64,
    pub left: u64,
    pub right: u64,
}

impl Statistics {
    fn from_counts(counts: &[u64; 4]) -> Self {
        Self {
            total: counts.iter().sum(),
            up: counts[Direction::Up.index()],
            down: counts[Direction::Down.index()],
            left: counts[Direction::Left.index()],
            right: counts[Direction::Right.index()],
        }
    }

    pub fn get(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// An observation skipped for one tick because its geometry is unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQualityWarning<I = u64> {
    pub identity: I,
    pub issue: GeometryIssue,
}

/// Outcome of one or more ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport<I = u64> {
    /// Crossing events appended to the log.
    pub crossings: usize,
    pub warnings: Vec<DataQualityWarning<I>>,
}

impl<I> Default for TickReport<I> {
    fn default() -> Self {
        Self {
            crossings: 0,
            warnings: Vec::new(),
        }
    }
}

impl<I> TickReport<I> {
    pub fn merge(&mut self, other: TickReport<I>) {
        self.crossings += other.crossings;
        self.warnings.extend(other.warnings);
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Per-stream line-crossing state machine.
///
/// Every identity goes `unseen -> tracked -> crossed` and produces at most one
/// [`CrossingEvent`] until the next [`reset`](Self::reset). Ticks must arrive in
/// timeline order; one engine per video stream.
pub struct LineCrossingEngine<I = u64> {
    line: CountingLine,
    registry: IdentityRegistry<I>,
    events: Vec<CrossingEvent<I>>,
    counts: [u64; 4],
    clock: Box<dyn Clock + Send>,
}

impl<I> fmt::Debug for LineCrossingEngine<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineCrossingEngine")
            .field("line", &self.line)
            .field("counts", &self.counts)
            .field("events", &self.events.len())
            .finish()
    }
}

impl<I: Clone + Eq + Hash + fmt::Debug> LineCrossingEngine<I> {
    /// Engine stamping events with the wall clock.
    pub fn new(config: &LineConfig) -> Result<Self, Error> {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock<C: Clock + Send + 'static>(
        config: &LineConfig,
        clock: C,
    ) -> Result<Self, Error> {
        Ok(Self::from_line(CountingLine::from_config(config)?, clock))
    }

    pub fn from_line<C: Clock + Send + 'static>(line: CountingLine, clock: C) -> Self {
        info!(
            start = ?line.segment.start(),
            end = ?line.segment.end(),
            orientation = %line.orientation,
            "line counter initialized"
        );

        Self {
            line,
            registry: IdentityRegistry::new(),
            events: Vec::new(),
            counts: [0; 4],
            clock: Box::new(clock),
        }
    }

    /// Feeds one tick worth of tracked objects.
    ///
    /// Observations with unusable geometry are skipped for this tick and reported back;
    /// they never touch the registry.
    pub fn update(&mut self, observations: &[TrackedObservation<I>]) -> TickReport<I> {
        let mut report = TickReport::default();

        for obs in observations {
            let centroid = match obs.checked_centroid() {
                Ok(c) => c,
                Err(issue) => {
                    warn!(identity = ?obs.identity, ?issue, "skipping observation");
                    report.warnings.push(DataQualityWarning {
                        identity: obs.identity.clone(),
                        issue,
                    });
                    continue;
                }
            };

            let prev = match self.registry.observe(obs.identity.clone(), centroid) {
                Some(prev) => prev,
                None => {
                    debug!(identity = ?obs.identity, "first sighting");
                    continue;
                }
            };

            if !self.line.segment.crossed_by(&prev, &centroid)
                || self.registry.has_crossed(&obs.identity)
            {
                continue;
            }

            let direction = classify(&prev, &centroid, self.line.orientation);
            self.record(obs, direction, centroid);
            report.crossings += 1;
        }

        report
    }

    fn record(
        &mut self,
        obs: &TrackedObservation<I>,
        direction: Direction,
        centroid: na::Point2<f32>,
    ) {
        debug_assert!(
            !self.registry.has_crossed(&obs.identity),
            "identity {:?} counted twice",
            obs.identity
        );

        self.events.push(CrossingEvent {
            identity: obs.identity.clone(),
            timestamp: self.clock.now(),
            direction,
            class_label: obs.class_label.clone(),
            centroid,
        });
        self.counts[direction.index()] += 1;
        self.registry.mark_crossed(&obs.identity);

        info!(
            identity = ?obs.identity,
            class = %obs.class_label,
            %direction,
            "crossing detected"
        );
    }

    #[inline]
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    #[inline]
    pub fn count(&self, direction: Direction) -> u64 {
        self.counts[direction.index()]
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_counts(&self.counts)
    }

    /// Crossing events in detection order.
    #[inline]
    pub fn events(&self) -> &[CrossingEvent<I>] {
        &self.events
    }

    /// Crossings per class label.
    pub fn class_counts(&self) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();

        for event in &self.events {
            *counts.entry(event.class_label.clone()).or_insert(0) += 1;
        }

        counts
    }

    #[inline]
    pub fn line(&self) -> &CountingLine {
        &self.line
    }

    #[inline]
    pub fn registry(&self) -> &IdentityRegistry<I> {
        &self.registry
    }

    pub fn reset(&mut self) {
        debug!(events = self.events.len(), "resetting line counter");

        self.registry.reset();
        self.events.clear();
        self.counts = [0; 4];
    }
}
