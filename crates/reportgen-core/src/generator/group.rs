//! Recursive group factory.

use super::GeneratorConfig;
use super::case::{build_case, build_skipped};
use crate::clock::{Clock, GROUP_LEAD_IN_SECS, Gap};
use crate::model::{FlatChild, GroupContent, GroupId, TestGroup};
use crate::vocabulary::{GROUP_AREAS, GROUP_TYPES, pick};
use rand::Rng;
use tracing::trace;

/// Probability that an eligible group holds subgroups instead of cases.
pub const NESTING_PROBABILITY: f64 = 0.30;

/// Probability that a flat position is a skipped test.
pub const SKIP_PROBABILITY: f64 = 0.10;

/// Inclusive bounds on the number of subgroups of a nested group.
pub const MIN_SUBGROUPS: u32 = 1;
pub const MAX_SUBGROUPS: u32 = 3;

/// Inclusive bounds on the number of positions in a flat group.
pub const MIN_FLAT_CHILDREN: u32 = 3;
pub const MAX_FLAT_CHILDREN: u32 = 15;

/// Builds group `id` at `depth` (1 for top level), recursing into subgroups
/// when the group is drawn as nested.
///
/// Returns the group and the clock where its last child left it.
pub fn build_group<R: Rng>(
    rng: &mut R,
    clock: Clock,
    id: GroupId,
    depth: u32,
    config: &GeneratorConfig,
) -> (TestGroup, Clock) {
    let title = format!(
        "{}Level{depth}_{}_{}_{id}",
        "  ".repeat(depth.saturating_sub(1) as usize),
        pick(rng, GROUP_TYPES),
        pick(rng, GROUP_AREAS),
    );

    let mut cursor = clock.advance(GROUP_LEAD_IN_SECS);
    let nested = config.nested
        && depth < config.max_depth
        && rng.r#gen::<f64>() < NESTING_PROBABILITY;

    let content = if nested {
        let count = rng.gen_range(MIN_SUBGROUPS..=MAX_SUBGROUPS);
        let mut children = Vec::with_capacity(count as usize);
        for index in 1..=count {
            let (child, next) = build_group(rng, cursor, id.child(index), depth + 1, config);
            children.push(child);
            cursor = next.advance_by(rng, Gap::NESTED_GROUP);
        }
        GroupContent::Nested(children)
    } else {
        let count = rng.gen_range(MIN_FLAT_CHILDREN..=MAX_FLAT_CHILDREN);
        let mut children = Vec::with_capacity(count as usize);
        for sequence in 1..=count {
            if rng.r#gen::<f64>() < SKIP_PROBABILITY {
                children.push(FlatChild::Skipped(build_skipped(rng, sequence)));
            } else {
                let (case, next) = build_case(rng, cursor, sequence, &title);
                children.push(FlatChild::Case(case));
                cursor = next;
            }
            cursor = cursor.advance_by(rng, Gap::FLAT_SIBLING);
        }
        GroupContent::Flat(children)
    };

    trace!(group = %id, depth, nested, "built test group");

    let group = TestGroup {
        id,
        depth,
        title,
        content,
    };
    (group, cursor)
}
