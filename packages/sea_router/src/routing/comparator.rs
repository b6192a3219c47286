//! Picks the fastest algorithm out of a set of outcomes. Algorithms which
//! failed to find a path are left out of the running, and when two
//! algorithms take exactly the same time the one listed first in
//! [`Algorithm::ALL`] wins.

use std::collections::BTreeMap;

use crate::routing::common::Algorithm;
use crate::routing::structs::EngineOutcome;

const VERDICT_PREFIX: &str = "Best algorithm based on time complexity: ";

/// Determine which algorithm found its path in the shortest time
pub fn pick_fastest(
    outcomes: &BTreeMap<Algorithm, EngineOutcome>,
) -> Option<Algorithm> {
    let mut fastest: Option<(Algorithm, std::time::Duration)> = None;

    for algorithm in Algorithm::ALL {
        let Some(result) =
            outcomes.get(&algorithm).and_then(EngineOutcome::path_result)
        else {
            continue;
        };

        // Later algorithms have to be strictly faster to take the lead
        match fastest {
            Some((_, best)) if result.elapsed >= best => (),
            _ => fastest = Some((algorithm, result.elapsed)),
        }
    }

    fastest.map(|(algorithm, _)| algorithm)
}

/// Human readable summary of the comparison
pub fn verdict(fastest: Option<Algorithm>) -> String {
    match fastest {
        Some(algorithm) => {
            format!("{}{}.", VERDICT_PREFIX, algorithm.long_name())
        }
        None => "No algorithm found a path between the selected ports."
            .to_string(),
    }
}
