use mockdrive_types::Timestamp;

/// Monotonic clock for entry timestamps.
///
/// Combines the wall clock with the last issued value so that every
/// [`Timestamp`] it returns is strictly greater than the previous one, even
/// when the wall clock stalls or steps backwards.
///
/// # Rules
///
/// - `tick = max(wall_clock, last + 1ns)`
/// - The first tick is the wall clock.
#[derive(Debug, Default)]
pub struct Clock {
    last: Option<Timestamp>,
}

impl Clock {
    /// A clock that has not issued anything yet.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Issue a new timestamp, strictly after any previously issued one.
    pub fn tick(&mut self) -> Timestamp {
        let wall = Timestamp::now();
        let next = match self.last {
            Some(last) if wall <= last => last.successor(),
            _ => wall,
        };
        self.last = Some(next);
        next
    }
}
