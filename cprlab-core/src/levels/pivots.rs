//! Floor-trader pivot points — central pivot range plus four resistance and
//! four support tiers, from one session's high, low and close.
//!
//! ```text
//! pivot  = (H + L + C) / 3
//! bottom = (H + L) / 2            top = 2 * pivot - bottom   (swapped so bottom <= top)
//! r1 = 2 * pivot - L    r2 = pivot + (H - L)    r3 = r1 + (H - L)    r4 = r3 + (r2 - r1)
//! s1 = 2 * pivot - H    s2 = pivot - (H - L)    s3 = s1 - (H - L)    s4 = s3 + (s2 - s1)
//! ```

use crate::domain::{Level, LevelKind};

use super::SessionExtremes;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotPoints {
    pub pivot: f64,
    pub bottom_pivot: f64,
    pub top_pivot: f64,
    pub resistance: [f64; 4],
    pub support: [f64; 4],
}

impl PivotPoints {
    pub fn from_extremes(session: &SessionExtremes) -> Self {
        let SessionExtremes { high, low, close } = *session;
        let range = high - low;

        let pivot = (high + low + close) / 3.0;
        let mut bottom_pivot = (high + low) / 2.0;
        let mut top_pivot = 2.0 * pivot - bottom_pivot;
        if bottom_pivot > top_pivot {
            std::mem::swap(&mut bottom_pivot, &mut top_pivot);
        }

        let r1 = 2.0 * pivot - low;
        let r2 = pivot + range;
        let r3 = r1 + range;
        let r4 = r3 + (r2 - r1);

        let s1 = 2.0 * pivot - high;
        let s2 = pivot - range;
        let s3 = s1 - range;
        let s4 = s3 + (s2 - s1);

        Self {
            pivot,
            bottom_pivot,
            top_pivot,
            resistance: [r1, r2, r3, r4],
            support: [s1, s2, s3, s4],
        }
    }

    /// Central pivot, bottom pivot, top pivot, r1..r4, s1..s4, in that order.
    pub fn levels(&self) -> Vec<Level> {
        let mut levels = Vec::with_capacity(11);
        levels.push(Level::new(self.pivot, LevelKind::CentralPivot));
        levels.push(Level::new(self.bottom_pivot, LevelKind::BottomPivot));
        levels.push(Level::new(self.top_pivot, LevelKind::TopPivot));
        levels.extend(
            self.resistance
                .iter()
                .map(|&price| Level::new(price, LevelKind::Resistance)),
        );
        levels.extend(
            self.support
                .iter()
                .map(|&price| Level::new(price, LevelKind::Support)),
        );
        levels
    }
}
