//! Slicing an ordered sample sequence into contiguous groups.
//!
//! Both policies share one forward walk. Each element's duration is added to a
//! running total for the open group. A group is closed when the policy says the
//! current element starts a new one, or when the walk reaches the last element.
//! The closed group is the half-open range `start..i`, so the element that
//! triggers a close seeds the next group instead of ending the current one.
//!
//! The last element of the input is never part of any emitted group. It only
//! seeds a group that is dropped when the walk ends, so a one-element input
//! yields no groups. Consumers rely on this; do not extend the final group.

use std::ops::Range;

use crate::picture::PictureType;
use crate::sample::Sample;
use crate::time::TimeValue;

/// Anything with a duration that a slicing walk can accumulate.
pub trait HasDuration {
    fn duration(&self) -> TimeValue;
}

/// Anything carrying a frame picture type.
pub trait HasPictureType {
    fn picture_type(&self) -> PictureType;
}

impl HasDuration for Sample {
    fn duration(&self) -> TimeValue {
        Sample::duration(self)
    }
}

impl HasPictureType for Sample {
    fn picture_type(&self) -> PictureType {
        Sample::picture_type(self)
    }
}

/// Decides where a new group begins.
pub trait SlicePolicy<T> {
    /// Whether `item`, at a position other than the first, closes the open
    /// group. `running` is the open group's duration in ticks, `item` included.
    fn closes(&self, item: &T, running: i128) -> bool;
}

/// Close a group once its running duration exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationThreshold {
    limit: Option<i128>,
}

impl DurationThreshold {
    /// A threshold that is never exceeded.
    pub const UNBOUNDED: Self = Self { limit: None };

    pub fn new(threshold: TimeValue) -> Self {
        Self {
            limit: Some(i128::from(threshold.ticks())),
        }
    }
}

impl<T: HasDuration> SlicePolicy<T> for DurationThreshold {
    fn closes(&self, _item: &T, running: i128) -> bool {
        self.limit.is_some_and(|limit| running > limit)
    }
}

/// Close a group at every keyframe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyframe;

impl<T: HasPictureType> SlicePolicy<T> for Keyframe {
    fn closes(&self, item: &T, _running: i128) -> bool {
        item.picture_type().is_keyframe()
    }
}

/// Index ranges of the groups `policy` produces over `items`.
///
/// Every range is non-empty, ranges are contiguous and in order, and the last
/// index of `items` is never covered.
pub fn segment_ranges<T, P>(items: &[T], policy: &P) -> Vec<Range<usize>>
where
    T: HasDuration,
    P: SlicePolicy<T>,
{
    let mut ranges = Vec::new();
    walk(items, policy, |range| ranges.push(range));
    ranges
}

/// Slice `items` with `policy` and reduce every group with `reduce`.
///
/// `reduce` receives each group as a non-empty sub-slice, in input order.
pub fn slice_with<T, P, S, F>(items: &[T], policy: &P, mut reduce: F) -> Vec<S>
where
    T: HasDuration,
    P: SlicePolicy<T>,
    F: FnMut(&[T]) -> S,
{
    let mut groups = Vec::new();
    walk(items, policy, |range| groups.push(reduce(&items[range])));
    groups
}

/// Group by wall-clock duration: a group closes when its running duration
/// exceeds `threshold`.
pub fn slice_by_duration<T, S, F>(items: &[T], threshold: TimeValue, reduce: F) -> Vec<S>
where
    T: HasDuration,
    F: FnMut(&[T]) -> S,
{
    let groups = slice_with(items, &DurationThreshold::new(threshold), reduce);
    tracing::debug!(
        items = items.len(),
        groups = groups.len(),
        threshold = threshold.ticks(),
        "sliced by duration"
    );
    groups
}

/// Group by keyframe: every `I` frame after the first element opens a new group.
pub fn slice_by_keyframe<T, S, F>(items: &[T], reduce: F) -> Vec<S>
where
    T: HasDuration + HasPictureType,
    F: FnMut(&[T]) -> S,
{
    let groups = slice_with(items, &Keyframe, reduce);
    tracing::debug!(
        items = items.len(),
        groups = groups.len(),
        "sliced by keyframe"
    );
    groups
}

fn walk<T, P>(items: &[T], policy: &P, mut emit: impl FnMut(Range<usize>))
where
    T: HasDuration,
    P: SlicePolicy<T>,
{
    let last = items.len().saturating_sub(1);
    let mut running: i128 = 0;
    let mut start = 0usize;

    for (i, item) in items.iter().enumerate() {
        let ticks = i128::from(item.duration().ticks());
        running += ticks;

        // At i == 0 the range start..i is empty; nothing to emit.
        if i > 0 && (policy.closes(item, running) || i == last) {
            emit(start..i);
            running = ticks;
            start = i;
        }
    }
}
