use studydesk_core::grading::{Average, GradeBand, PassStatus, PASS_THRESHOLD};

use super::{print_json, CmdResult};

pub fn run(value: f64) -> CmdResult {
    let average = Average::from(Some(value));
    let band = GradeBand::classify(average);
    print_json(&serde_json::json!({
        "value": average,
        "band": band,
        "label": band.map(GradeBand::label),
        "passing": band.map(GradeBand::is_passing),
        "status": PassStatus::from_average(average),
        "passThreshold": PASS_THRESHOLD,
    }))?;
    Ok(())
}
