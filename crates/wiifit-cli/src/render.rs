use time::macros::format_description;
use wiifit_core::{Profile, Record};

/// Human-readable rendering of one profile and its body test records.
pub fn render_profile(profile: &Profile) -> Result<String, time::error::Format> {
    let mut out = format!(
        "Mii: {}\nHeight: {}cm\nDOB: {}\nBody Test Records:\n\t  Date & Time          Weight  BMI   Balance",
        profile.name, profile.height_cm, profile.birth_date
    );
    for record in &profile.records {
        out.push_str("\n\t- ");
        out.push_str(&render_record(record)?);
    }
    Ok(out)
}

fn render_record(record: &Record) -> Result<String, time::error::Format> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let mut line = record.timestamp.format(format)?;
    line.push_str(&format!(
        ", {}kg, {}, {}%",
        record.weight_kg, record.bmi, record.balance_pct
    ));
    Ok(line)
}
