//! Compiles `--calc` expressions into [`Calc`] function values.
//!
//! The expression is parsed once, before any row is read. Each row is then
//! evaluated against a context holding `c0`, `c1`, ... for the individual
//! cells and `row` for the whole row as a tuple.

use evalexpr::{
    ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, Function,
    HashMapContext, Node, Value as EvalValue, build_operator_tree,
};

use crate::{
    data::Cell,
    error::{OpError, Result},
    operation::Calc,
};

pub fn compile(expression: &str) -> Result<Calc> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(OpError::invalid("Calculation expression is empty"));
    }
    let tree: Node = build_operator_tree(trimmed).map_err(|err| {
        OpError::invalid(format!("Invalid calculation expression '{trimmed}': {err}"))
    })?;
    let base = base_context().map_err(|err| OpError::invalid(err.to_string()))?;

    Ok(Calc::new(trimmed, move |row| {
        let mut context = base.clone();
        bind_row(&mut context, row).map_err(|err| err.to_string())?;
        let value = tree
            .eval_with_context(&context)
            .map_err(|err| err.to_string())?;
        Ok(cell_from_eval(value))
    }))
}

fn base_context() -> std::result::Result<HashMapContext, EvalexprError> {
    let mut context: HashMapContext = HashMapContext::new();
    context.set_function("sum".into(), Function::new(sum_values))?;
    Ok(context)
}

fn bind_row(
    context: &mut HashMapContext,
    row: &[Cell],
) -> std::result::Result<(), EvalexprError> {
    let values = row.iter().map(cell_to_eval).collect::<Vec<_>>();
    for (idx, value) in values.iter().enumerate() {
        context.set_value(format!("c{idx}"), value.clone())?;
    }
    context.set_value("row".into(), EvalValue::Tuple(values))?;
    Ok(())
}

fn cell_to_eval(cell: &Cell) -> EvalValue {
    match cell {
        Cell::Text(s) => EvalValue::String(s.clone()),
        Cell::Integer(i) => EvalValue::Int(*i),
        Cell::Float(f) => EvalValue::Float(*f),
    }
}

fn cell_from_eval(value: EvalValue) -> Cell {
    match value {
        EvalValue::String(s) => Cell::Text(s),
        EvalValue::Int(i) => Cell::Integer(i),
        EvalValue::Float(f) => Cell::Float(f),
        EvalValue::Boolean(b) => Cell::Text(b.to_string()),
        EvalValue::Tuple(values) => Cell::Text(
            values
                .into_iter()
                .map(|v| cell_from_eval(v).to_string())
                .collect::<Vec<_>>()
                .join("|"),
        ),
        EvalValue::Empty => Cell::Text(String::new()),
    }
}

fn flatten(value: &EvalValue, out: &mut Vec<EvalValue>) {
    match value {
        EvalValue::Tuple(values) => values.iter().for_each(|v| flatten(v, out)),
        EvalValue::Empty => {}
        other => out.push(other.clone()),
    }
}

fn sum_values(argument: &EvalValue) -> std::result::Result<EvalValue, EvalexprError> {
    let mut values = Vec::new();
    flatten(argument, &mut values);

    let mut int_total: Option<i64> = Some(0);
    let mut float_total = 0f64;
    for value in &values {
        match value {
            EvalValue::Int(i) => {
                // Integer overflow degrades to a float sum.
                int_total = int_total.and_then(|total| total.checked_add(*i));
                float_total += *i as f64;
            }
            EvalValue::Float(f) => {
                int_total = None;
                float_total += f;
            }
            other => {
                return Err(eval_error(&format!("sum expects numbers, got {other}")));
            }
        }
    }
    Ok(match int_total {
        Some(total) => EvalValue::Int(total),
        None => EvalValue::Float(float_total),
    })
}

fn eval_error(message: &str) -> EvalexprError {
    EvalexprError::CustomMessage(message.to_string())
}
