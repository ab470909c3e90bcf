//! Property tests for formula evaluation.

use polars::prelude::*;
use proptest::prelude::*;
use tabcheck_transform::Formula;

fn frame(a: &[i64], b: &[i64], c: &[i64]) -> DataFrame {
    df![
        "a" => a,
        "b" => b,
        "c" => c,
    ]
    .unwrap()
}

fn rows() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    prop::collection::vec((-1000i64..1000, -1000i64..1000, -5i64..5), 0..40)
}

fn split(rows: &[(i64, i64, i64)]) -> (Vec<i64>, Vec<i64>, Vec<i64>) {
    let a = rows.iter().map(|r| r.0).collect();
    let b = rows.iter().map(|r| r.1).collect();
    let c = rows.iter().map(|r| r.2).collect();
    (a, b, c)
}

proptest! {
    #[test]
    fn follows_integer_arithmetic(rows in rows()) {
        let (a, b, c) = split(&rows);
        let df = frame(&a, &b, &c);
        let output = Formula::parse("a + b * c - (a - c)").unwrap().evaluate(&df).unwrap();
        let expected: Vec<Option<f64>> = rows
            .iter()
            .map(|(a, b, c)| Some((a + b * c - (a - c)) as f64))
            .collect();
        prop_assert_eq!(output.values, expected);
        prop_assert_eq!(output.division_by_zero, 0);
    }

    #[test]
    fn unary_minus_flips_subtraction(rows in rows()) {
        let (a, b, c) = split(&rows);
        let df = frame(&a, &b, &c);
        let lhs = Formula::parse("-(a - b)").unwrap().evaluate(&df).unwrap();
        let rhs = Formula::parse("b - a").unwrap().evaluate(&df).unwrap();
        prop_assert_eq!(lhs.values, rhs.values);
    }

    #[test]
    fn division_by_zero_rows_are_null(rows in rows()) {
        let (a, b, c) = split(&rows);
        let df = frame(&a, &b, &c);
        let output = Formula::parse("a / c").unwrap().evaluate(&df).unwrap();
        let zeros = c.iter().filter(|v| **v == 0).count();
        prop_assert_eq!(output.division_by_zero, zeros);
        for (value, divisor) in output.values.iter().zip(&c) {
            prop_assert_eq!(value.is_none(), *divisor == 0);
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let df = frame(&[1, 2, 3], &[4, 5, 6], &[0, 1, 2]);
    let formula = Formula::parse("`a` * 1.5 + b / c").unwrap();
    assert_eq!(formula.evaluate(&df), formula.evaluate(&df));
}
