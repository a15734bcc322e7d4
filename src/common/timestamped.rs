use crate::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamped<T> {
    pub t: Instant,
    pub v: T,
}

impl<T> Timestamped<T> {
    pub fn new(t: Instant, v: T) -> Self {
        Timestamped { t, v }
    }

    pub fn from_millis(t: u64, v: T) -> Self {
        Timestamped {
            t: Instant::from_ticks(t),
            v,
        }
    }
}

pub type Ts<T> = Timestamped<T>;
