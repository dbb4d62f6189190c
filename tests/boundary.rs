use std::io::Cursor;

use greenhouse_fuzzy::{dataset, repl, Category, ControlSession, FuzzyError};

#[test]
fn test_repl_transcript() {
    let session = ControlSession::new().unwrap();
    let input = Cursor::new("abc\n20\n25\n50\n-1\n50\n45\n90\nexit\n");
    let mut output = Vec::new();

    repl::run(&session, input, &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("Invalid input"));
    assert!(text.contains("Cooling: 50.00 (Medium)"));
    assert!(text.contains("Watering: 50.00 (Medium)"));
    assert!(text.contains("outside the valid range"));
    assert!(text.contains("Cooling: 86.28 (High)"));
    assert_eq!(text.matches("Temperature (°C, 0-50): ").count(), 5);
}

#[test]
fn test_repl_stops_at_eof() {
    let session = ControlSession::new().unwrap();
    let mut output = Vec::new();

    repl::run(&session, Cursor::new("25\n"), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Humidity (%, 0-100): "));
    assert!(!text.contains("Cooling"));
}

#[test]
fn test_validate_dataset() {
    let data = "\
temperature,humidity,cooling_level,watering_level
5,20,Low,High
25,50,Medium,Medium
45,90,High,Medium
60,50,High,High
40,10,High,Low
";
    let session = ControlSession::new().unwrap();
    let samples = dataset::from_reader(data.as_bytes()).unwrap();
    let report = dataset::validate(&session, &samples);

    assert_eq!(report.rows.len(), 5);
    assert_eq!(report.evaluated(), 4);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.degenerate(), 0);
    assert!(matches!(
        report.rows[3].outcome,
        Err(FuzzyError::InputOutOfRange { .. })
    ));
    assert_eq!(report.rows[3].cooling_match(), None);

    // The last row predicts High watering but is labeled Low
    assert_eq!(report.rows[4].watering_match(), Some(false));
    assert_eq!(report.cooling_accuracy(), Some(1.));
    assert_eq!(report.watering_accuracy(), Some(0.75));

    let first = report.rows[0].outcome.as_ref().unwrap();
    assert_eq!(first.cooling_category, Category::Low);
}

#[test]
fn test_validate_nothing() {
    let session = ControlSession::new().unwrap();
    let report = dataset::validate(&session, &[]);

    assert_eq!(report.evaluated(), 0);
    assert_eq!(report.cooling_accuracy(), None);
}
