//! Module assembler: the document root and its top-level groups.

use super::ReportRequest;
use super::group::build_group;
use crate::clock::{Clock, Gap, module_start_time};
use crate::model::{
    GroupId, MEASUREMENT_ID_SUFFIX, SETUP_NAME, TestGroup, TestModule, TestSetup,
};
use rand::Rng;

/// Draws a measurement id: eight random digits and a fixed suffix.
pub fn measurement_id<R: Rng>(rng: &mut R) -> String {
    let prefix: u32 = rng.gen_range(10_000_000..=99_999_999);
    format!("{prefix:08}{MEASUREMENT_ID_SUFFIX}")
}

/// Builds a complete module for `request` from `rng`.
///
/// The measurement id is the first value drawn, then the groups in order.
/// A group count of zero yields a module with metadata and setup but no groups.
pub fn assemble_module<R: Rng>(rng: &mut R, request: &ReportRequest) -> TestModule {
    let measurement_id = measurement_id(rng);
    let setup = TestSetup {
        name: SETUP_NAME.to_string(),
        description: format!("Stress Test Module with {} Groups", request.group_count),
    };

    let mut clock = Clock::module_start();
    let mut groups: Vec<TestGroup> = Vec::with_capacity(request.group_count as usize);
    for index in 1..=request.group_count {
        let (group, next) = build_group(rng, clock, GroupId::top_level(index), 1, &request.config);
        groups.push(group);
        clock = next.advance_by(rng, Gap::TOP_LEVEL_GROUP);
    }

    TestModule {
        start_time: module_start_time(request.file_index),
        measurement_id,
        setup,
        groups,
    }
}
