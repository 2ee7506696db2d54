use std::cmp::Ordering;

use super::programs::ProgramCandidate;

/// Order candidates by descending score. Equal scores keep catalogue priority.
pub fn rank(mut candidates: Vec<ProgramCandidate>) -> Vec<ProgramCandidate> {
    candidates.sort_by(compare);
    candidates
}

fn compare(left: &ProgramCandidate, right: &ProgramCandidate) -> Ordering {
    right
        .score
        .cmp(&left.score)
        .then_with(|| left.program_key.cmp(&right.program_key))
}
