//! Interactive prompt loop over a [`ControlSession`].

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::session::{ControlSession, GreenhouseOutput};

const EXIT: &str = "exit";

/// Reads temperature/humidity pairs from `input` until `exit` or EOF.
///
/// `exit` is honored at both prompts, so a half-entered reading can be
/// abandoned; at the humidity prompt it ends the loop instead of counting as
/// an unparsable number.
///
/// Unparsable and out-of-range values are reported on `output` and the loop
/// prompts again; only I/O failures end it early.
pub fn run<R: BufRead, W: Write>(session: &ControlSession, mut input: R, mut output: W) -> Result<()> {
    loop {
        writeln!(output, "\nEnter values to simulate (or '{EXIT}' to quit):")?;

        let Some(temperature) = prompt(&mut input, &mut output, "Temperature (°C, 0-50): ")? else {
            break;
        };
        if is_exit(&temperature) {
            break;
        }

        let Some(humidity) = prompt(&mut input, &mut output, "Humidity (%, 0-100): ")? else {
            break;
        };
        if is_exit(&humidity) {
            break;
        }

        let result = parse(&temperature)
            .and_then(|t| Ok((t, parse(&humidity)?)))
            .and_then(|(t, h)| session.evaluate(t, h));

        match result {
            Ok(out) => print_output(&mut output, &out)?,
            Err(err @ FuzzyError::InputParse { .. }) => {
                debug!(%err, "rejected input");
                writeln!(output, "Invalid input: {err}. Please enter numbers.")?;
            },
            Err(err @ FuzzyError::InputOutOfRange { .. }) => {
                debug!(%err, "rejected input");
                writeln!(output, "Input outside the valid range: {err}")?;
            },
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

pub fn print_output<W: Write>(output: &mut W, out: &GreenhouseOutput) -> Result<()> {
    writeln!(output, "\nFuzzy controller result:")?;
    writeln!(output, "Cooling: {:.2} ({})", out.cooling.value(), out.cooling_category)?;
    writeln!(output, "Watering: {:.2} ({})", out.watering.value(), out.watering_category)?;

    if out.is_degenerate() {
        writeln!(output, "Warning: no rule fired for at least one output")?;
    }

    Ok(())
}

pub fn parse(text: &str) -> Result<f64> {
    text.trim()
        .parse()
        .map_err(|_| FuzzyError::InputParse { input: text.trim().to_owned() })
}

fn is_exit(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(EXIT)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_owned()))
}

#[test]
fn test_parse() {
    assert_eq!(parse(" 21.5 ").unwrap(), 21.5);
    assert!(matches!(parse("warm"), Err(FuzzyError::InputParse { .. })));
    assert!(is_exit(" EXIT "));
    assert!(!is_exit("exits"));
}
