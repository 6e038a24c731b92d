use crate::core::time_value::convert_literal;
use anyhow::{Context, Result};

/// One `VALUE -> { minutes: M, seconds: S }` line per value. Stops at the
/// first value that is not a usable numeral.
pub fn convert_values(values: &[String]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|value| {
            let time = convert_literal(value)
                .with_context(|| format!("Cannot convert '{}'", value))?;
            Ok(format!("{} -> {}", value, time))
        })
        .collect()
}

pub fn handle_convert(values: &[String]) -> Result<()> {
    for line in convert_values(values)? {
        println!("{}", line);
    }
    Ok(())
}
