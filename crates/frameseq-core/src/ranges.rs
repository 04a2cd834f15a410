use std::collections::BTreeSet;
use std::fmt;

/// An inclusive run of consecutive frame numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub first: u64,
    pub last: u64,
}

impl FrameRange {
    pub fn single(frame: u64) -> Self {
        Self {
            first: frame,
            last: frame,
        }
    }

    pub fn len(&self) -> u64 {
        self.last - self.first + 1
    }

    pub fn is_single(&self) -> bool {
        self.first == self.last
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

/// Group frame numbers into consecutive ranges, lowest first.
///
/// A hole of `max_gap` or more missing frames ends the summary: frames after
/// it are left out.
pub fn frame_ranges<I>(frames: I, max_gap: u64) -> Vec<FrameRange>
where
    I: IntoIterator<Item = u64>,
{
    let frames: BTreeSet<u64> = frames.into_iter().collect();
    let mut ranges: Vec<FrameRange> = Vec::new();

    for frame in frames {
        match ranges.last_mut() {
            Some(range) if frame == range.last + 1 => range.last = frame,
            Some(range) => {
                let missing = frame - range.last - 1;
                if missing >= max_gap {
                    tracing::debug!(after = range.last, missing, "frame gap too large, summary truncated");
                    break;
                }
                ranges.push(FrameRange::single(frame));
            }
            None => ranges.push(FrameRange::single(frame)),
        }
    }
    ranges
}

/// `1-2 / 4 / 7-9`
pub fn format_ranges(ranges: &[FrameRange]) -> String {
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(frames: &[u64], max_gap: u64) -> String {
        format_ranges(&frame_ranges(frames.iter().copied(), max_gap))
    }

    #[test]
    fn contiguous_frames_make_one_range() {
        assert_eq!(summary(&[1, 2, 3, 4], 1000), "1-4");
    }

    #[test]
    fn holes_split_ranges() {
        assert_eq!(summary(&[1, 2, 4], 1000), "1-2 / 4");
        assert_eq!(summary(&[1, 3, 5, 6], 1000), "1 / 3 / 5-6");
    }

    #[test]
    fn single_frame() {
        assert_eq!(summary(&[42], 1000), "42");
    }

    #[test]
    fn empty() {
        assert!(frame_ranges(Vec::new(), 1000).is_empty());
        assert_eq!(summary(&[], 1000), "");
    }

    #[test]
    fn large_gap_truncates() {
        // 1 and 1001 are 999 frames apart, 1001 and 3000 are 1998
        assert_eq!(summary(&[1, 1001, 3000], 1000), "1 / 1001");
        assert_eq!(summary(&[1, 2, 10], 5), "1-2");
    }

    #[test]
    fn unordered_and_repeated_frames() {
        assert_eq!(summary(&[4, 2, 1, 2], 1000), "1-2 / 4");
        assert_eq!(summary(&[7, 7], 1000), "7");
    }

    #[test]
    fn range_len() {
        assert_eq!(FrameRange { first: 3, last: 7 }.len(), 5);
        assert_eq!(FrameRange::single(9).len(), 1);
    }
}
