mod common;

use common::{assert_close, convert, engine};
use omunits::Values;

#[test]
fn test_celsius_to_fahrenheit() {
    let engine = engine();
    assert_close(convert(&engine, 10.0, "degree Celsius", "degree Fahrenheit"), 49.99995922640318);
    assert_close(convert(&engine, 70.0, "degree Fahrenheit", "degree Celsius"), 21.11113465200009);
}

#[test]
fn test_reaumur_and_rankine() {
    let engine = engine();
    assert_close(convert(&engine, 20.0, "degree Réaumur", "degree Rankine"), 536.6699570664035);
    assert_close(convert(&engine, 460.67, "degree Rankine", "degree Fahrenheit"), 1.0);
    assert_close(convert(&engine, 34.25, "degree Fahrenheit", "degree Réaumur"), 1.000017561600032);
    assert_close(convert(&engine, 80.0, "degree Réaumur", "degree Fahrenheit"), 211.99994626640427);
    assert_close(convert(&engine, 30.0, "degree Réaumur", "degree Celsius"), 37.5);
}

#[test]
fn test_kelvin_pivot() {
    let engine = engine();
    let celsius = engine.unit("degree Celsius").unwrap();
    assert_close(engine.to_kelvin(&celsius, 25.0).unwrap(), 298.15);
    assert_close(engine.from_kelvin(&celsius, 298.15).unwrap(), 25.0);
    assert_close(convert(&engine, 25.0, "degree Celsius", "kelvin"), 298.15);
}

#[test]
fn test_prefixed_temperature_units() {
    let engine = engine();
    // the prefix factor scales the shifted value
    assert_close(convert(&engine, 1.0, "degree Celsius", "decidegree Celsius"), 0.1);
}

#[test]
fn test_reciprocal_temperature() {
    let engine = engine();
    assert_close(convert(&engine, 10.0, "degree Celsius", "reciprocal degree Celsius"), 0.1);
}

#[test]
fn test_percentage_of_temperature() {
    let engine = engine();
    let cases = [
        (10.0, "degree Rankine", 10.0, "centidegree Celsius", -0.26759444399999993),
        (10.0, "degree Celsius", 10.0, "degree Celsius", 1.0),
        (0.0, "degree Rankine", 50.0, "degree Réaumur", -109.26),
    ];
    for (quantity, from, percentage, to, expected) in cases {
        let from = engine.unit(from).unwrap();
        let to = engine.unit(to).unwrap();
        let result = Values::with_percentage(quantity, from, percentage)
            .to_unit(&engine, &to, None)
            .unwrap();
        assert_close(result, expected);
    }
}

#[test]
fn test_temperature_round_trip() {
    let engine = engine();
    let scales = ["degree Celsius", "degree Fahrenheit", "degree Rankine", "degree Réaumur", "kelvin"];
    for a in scales {
        for b in scales {
            let there = convert(&engine, 42.0, a, b);
            assert_close(convert(&engine, there, b, a), 42.0);
        }
    }
}
