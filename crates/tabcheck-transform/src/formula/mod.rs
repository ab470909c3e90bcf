//! Arithmetic formulas over table columns.
//!
//! A [`Formula`] is parsed once, when the configuration is compiled, and evaluated per
//! table. Operands are read as `f64`; a null operand makes the row's result null, and
//! so does a division by zero, which is also counted in [`FormulaOutput`].

mod lexer;
mod parser;

use std::collections::HashMap;
use std::fmt;

use polars::prelude::{Column, DataFrame};
use tabcheck_common::{cell_at, cell_number, is_native_missing};
use thiserror::Error;

use parser::{BinaryOp, Expr};

/// Deepest expression tree a formula may produce. Evaluation recurses over the tree.
pub const MAX_DEPTH: usize = 128;

/// Errors raised while parsing or evaluating a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unterminated back-tick quote starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("empty column name at position {position}")]
    EmptyColumnName { position: usize },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("formula nests deeper than {max} levels at position {position}", max = MAX_DEPTH)]
    TooDeep { position: usize },

    #[error("unresolved column '{0}'")]
    UnresolvedColumn(String),
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

/// Values computed for every row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaOutput {
    pub values: Vec<Option<f64>>,
    /// Rows whose result is null because of a division by zero.
    pub division_by_zero: usize,
}

impl FormulaOutput {
    pub fn into_column(self, name: &str) -> Column {
        Column::new(name.into(), self.values)
    }
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = lexer::tokenize(source)?;
        let expr = parser::parse(&tokens)?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Column names referenced by the formula, in first-seen order.
    pub fn columns(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_columns(&self.expr, &mut names);
        names
    }

    pub fn evaluate(&self, df: &DataFrame) -> Result<FormulaOutput, FormulaError> {
        let mut inputs: HashMap<&str, Vec<Option<f64>>> = HashMap::new();
        for name in self.columns() {
            let column = df
                .column(name)
                .map_err(|_| FormulaError::UnresolvedColumn(name.to_string()))?;
            inputs.insert(name, numeric_values(column));
        }

        let mut output = FormulaOutput {
            values: Vec::with_capacity(df.height()),
            division_by_zero: 0,
        };
        for row in 0..df.height() {
            let mut divided_by_zero = false;
            let value = eval(&self.expr, row, &inputs, &mut divided_by_zero);
            if divided_by_zero {
                output.division_by_zero += 1;
                output.values.push(None);
            } else {
                output.values.push(value);
            }
        }
        Ok(output)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn collect_columns<'a>(expr: &'a Expr, names: &mut Vec<&'a str>) {
    match expr {
        Expr::Number(_) => {}
        Expr::Column(name) => {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        Expr::Neg(inner) => collect_columns(inner, names),
        Expr::Binary { lhs, rhs, .. } => {
            collect_columns(lhs, names);
            collect_columns(rhs, names);
        }
    }
}

fn numeric_values(column: &Column) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|idx| {
            let value = cell_at(column, idx);
            if is_native_missing(&value) {
                None
            } else {
                cell_number(&value)
            }
        })
        .collect()
}

fn eval(
    expr: &Expr,
    row: usize,
    inputs: &HashMap<&str, Vec<Option<f64>>>,
    divided_by_zero: &mut bool,
) -> Option<f64> {
    match expr {
        Expr::Number(value) => Some(*value),
        Expr::Column(name) => inputs
            .get(name.as_str())
            .and_then(|values| values.get(row).copied().flatten()),
        Expr::Neg(inner) => eval(inner, row, inputs, divided_by_zero).map(|v| -v),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, row, inputs, divided_by_zero);
            let rhs = eval(rhs, row, inputs, divided_by_zero);
            let (lhs, rhs) = (lhs?, rhs?);
            match op {
                BinaryOp::Add => Some(lhs + rhs),
                BinaryOp::Sub => Some(lhs - rhs),
                BinaryOp::Mul => Some(lhs * rhs),
                BinaryOp::Div if rhs == 0.0 => {
                    *divided_by_zero = true;
                    None
                }
                BinaryOp::Div => Some(lhs / rhs),
            }
        }
    }
}
