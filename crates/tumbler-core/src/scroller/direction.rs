//! Direction selection on a circular list

use serde::Serialize;

/// Which way the strip travels
///
/// `Forward` steps indices by +1 and moves slots toward positive offsets;
/// `Backward` steps by -1 and moves them toward negative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Signed index step, also the sign of the strip's motion
    #[inline]
    pub const fn shift(self) -> isize {
        match self {
            ScrollDirection::Forward => 1,
            ScrollDirection::Backward => -1,
        }
    }

    #[inline]
    pub fn sign(self) -> f64 {
        self.shift() as f64
    }

    /// Next index in this direction, wrapping on `len`
    #[inline]
    pub fn step(self, index: usize, len: usize) -> usize {
        (index as isize + self.shift()).rem_euclid(len as isize) as usize
    }

    /// Direction with the fewest traversed slots from `current` to `target`
    ///
    /// Ties go `Forward` unless `target < current`.
    pub fn shortest(current: usize, target: usize, len: usize) -> Self {
        let forward = forward_distance(current, target, len);
        let backward = backward_distance(current, target, len);

        if forward < backward {
            ScrollDirection::Forward
        } else if backward < forward {
            ScrollDirection::Backward
        } else if target < current {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Forward
        }
    }

    /// Number of steps from `current` to `target` in this direction
    pub fn distance(self, current: usize, target: usize, len: usize) -> usize {
        match self {
            ScrollDirection::Forward => forward_distance(current, target, len),
            ScrollDirection::Backward => backward_distance(current, target, len),
        }
    }
}

pub fn forward_distance(current: usize, target: usize, len: usize) -> usize {
    if target >= current {
        target - current
    } else {
        len - (current - target)
    }
}

pub fn backward_distance(current: usize, target: usize, len: usize) -> usize {
    if target <= current {
        current - target
    } else {
        len - (target - current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps() {
        assert_eq!(ScrollDirection::Forward.step(9, 10), 0);
        assert_eq!(ScrollDirection::Backward.step(0, 10), 9);
        assert_eq!(ScrollDirection::Forward.step(3, 10), 4);
        assert_eq!(ScrollDirection::Backward.step(0, 1), 0);
    }

    #[test]
    fn test_digit_examples() {
        assert_eq!(ScrollDirection::shortest(0, 7, 10), ScrollDirection::Backward);
        assert_eq!(ScrollDirection::Backward.distance(0, 7, 10), 3);
        assert_eq!(ScrollDirection::Forward.distance(0, 7, 10), 7);

        assert_eq!(ScrollDirection::shortest(0, 3, 10), ScrollDirection::Forward);
        assert_eq!(ScrollDirection::Forward.distance(0, 3, 10), 3);
    }

    #[test]
    fn test_tie_break() {
        // 0 -> 5 and 5 -> 0 on ten slots are both five steps either way
        assert_eq!(ScrollDirection::shortest(0, 5, 10), ScrollDirection::Forward);
        assert_eq!(ScrollDirection::shortest(5, 0, 10), ScrollDirection::Backward);
        assert_eq!(ScrollDirection::shortest(4, 4, 10), ScrollDirection::Forward);
    }

    #[test]
    fn test_same_index_has_zero_distance() {
        assert_eq!(forward_distance(6, 6, 10), 0);
        assert_eq!(backward_distance(6, 6, 10), 0);
    }
}
