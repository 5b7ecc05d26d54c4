// tests/y_axis_formatting_test.rs

use acq_oscillation_report::plot_framework::format_axis_value;

#[test]
fn test_small_fractional_values_keep_decimals() {
    // mV-scale channels need decimals or every tick reads 0 or 1.
    let test_values = [0.25, 0.5, -0.75, 1.2, -1.5, 9.99];
    let expected_labels = ["0.25", "0.50", "-0.75", "1.20", "-1.50", "9.99"];

    for (value, expected) in test_values.iter().zip(expected_labels.iter()) {
        assert_eq!(
            &format_axis_value(*value),
            expected,
            "Y-axis formatting failed for value {value}"
        );
    }
}

#[test]
fn test_whole_and_medium_values_are_integers() {
    assert_eq!(format_axis_value(0.0), "0");
    assert_eq!(format_axis_value(5.0), "5");
    assert_eq!(format_axis_value(-4.0), "-4");
    assert_eq!(format_axis_value(12.4), "12");
    assert_eq!(format_axis_value(250.0), "250");
}

#[test]
fn test_large_values_use_suffixes() {
    assert_eq!(format_axis_value(2000.0), "2k");
    assert_eq!(format_axis_value(-3000.0), "-3k");
    assert_eq!(format_axis_value(2_500_000.0), "2.5M");
}
