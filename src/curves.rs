use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::io::Write;

use crate::error::Result;
use crate::variable::Variables;

/// Writes every sampled membership curve as `variable,label,x,degree` rows,
/// ready for an external plotting tool
pub fn write_csv<T, W>(variables: &Variables<T>, writer: W) -> Result<()>
where
    T: Copy + Debug + Display + Eq + Hash,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["variable", "label", "x", "degree"])?;

    for (_, var) in variables.iter() {
        for (label, curve) in var.curves() {
            let label = label.to_string();

            for (x, degree) in var.points().iter().zip(curve) {
                let (x, degree) = (x.to_string(), degree.to_string());

                wtr.write_record([var.name(), label.as_str(), x.as_str(), degree.as_str()])?;
            }
        }
    }

    wtr.flush()?;

    Ok(())
}

#[test]
fn test_write_csv() {
    let session = crate::session::ControlSession::new().unwrap();
    let mut buf = Vec::new();

    write_csv(session.variables(), &mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<_> = text.lines().collect();

    // 3 labels over 51 + 101 * 3 points
    assert_eq!(lines.len(), 1 + 3 * (51 + 3 * 101));
    assert_eq!(lines[0], "variable,label,x,degree");
    assert!(lines.contains(&"temperature,Cold,0,1"));
    assert!(lines.contains(&"humidity,Medium,50,1"));
    assert!(lines.contains(&"watering,High,80,0.5"));
}
