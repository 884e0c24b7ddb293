//! Cost estimation from the static rate table, no network needed.
//!
//! Run with: `cargo run --example estimate_cost`

use cineclaw::{CostEstimate, LtxModel, Resolution};

fn main() {
    for model in [LtxModel::Fast, LtxModel::Pro] {
        for resolution in [
            Resolution::Hd1080,
            Resolution::Qhd1440,
            Resolution::Uhd2160,
        ] {
            let est = CostEstimate::new(model, resolution, 10);
            println!(
                "{} @ {}: ${:.2} for {}s",
                model, resolution, est.total, est.duration_secs
            );
        }
    }
}
