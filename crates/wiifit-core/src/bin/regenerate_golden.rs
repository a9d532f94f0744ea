use std::fs;
use std::path::Path;

use wiifit_core::{InputInfo, analyze_source, open_save_file};

const GOLDEN_ROOT: &str = "tests/golden";
const CASES: [&str; 3] = ["two_slots", "corrupt_header", "truncated"];
const INPUT_NAME: &str = "input.dat";

fn main() -> Result<(), String> {
    for case in CASES {
        let dir = Path::new(GOLDEN_ROOT).join(case);
        let json = render_case(&dir)?;
        let output = dir.join("expected_report.json");
        fs::write(&output, json + "\n")
            .map_err(|err| format!("{}: {}", output.display(), err))?;
        println!("{case}: ok");
    }
    Ok(())
}

// Reports record the bare file name so they do not depend on the checkout path.
fn render_case(dir: &Path) -> Result<String, String> {
    let input = dir.join(INPUT_NAME);
    let bytes = fs::metadata(&input)
        .map_err(|err| format!("{}: {}", input.display(), err))?
        .len();
    let reader = open_save_file(&input).map_err(|err| err.to_string())?;
    let info = InputInfo {
        path: INPUT_NAME.to_string(),
        bytes,
    };
    let report = analyze_source(info, reader);
    serde_json::to_string_pretty(&report).map_err(|err| err.to_string())
}
