use chrono::{DateTime, Duration, Local};

/// Time source for crossing event timestamps.
pub trait Clock {
    fn now(&mut self) -> DateTime<Local>;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    #[inline]
    fn now(&mut self) -> DateTime<Local> {
        (**self).now()
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&mut self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    #[inline]
    fn now(&mut self) -> DateTime<Local> {
        self.0
    }
}

/// Starts at `start` and advances by `step` after every reading.
#[derive(Debug, Clone, Copy)]
pub struct StepClock {
    next: DateTime<Local>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Local>, step: Duration) -> Self {
        Self { next: start, step }
    }
}

impl Clock for StepClock {
    fn now(&mut self) -> DateTime<Local> {
        let now = self.next;
        self.next = now + self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn step_clock_advances() {
        let start = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut clock = StepClock::new(start, Duration::milliseconds(40));

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::milliseconds(40));
        assert_eq!(clock.now(), start + Duration::milliseconds(80));
    }

    #[test]
    fn fixed_clock_is_constant() {
        let at = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut clock = FixedClock(at);
        assert_eq!(clock.now(), clock.now());
    }
}
