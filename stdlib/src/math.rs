//! Basic arithmetic on numbers written as strings.

use quill_runtime::{prelude::*, Exception};

pub fn plugin() -> Plugin {
    Plugin::new("math")
        .with_description("Basic arithmetic")
        .function(Function::native("add", add)
            .with_description("Add an amount to the input")
            .with_parameter("input")
            .with_parameter("amount"))
        .function(Function::native("subtract", subtract)
            .with_description("Subtract an amount from the input")
            .with_parameter("input")
            .with_parameter("amount"))
}

fn number(args: &Bindings, name: &str) -> Result<f64, Exception> {
    let value = args.get(name).unwrap_or_default().trim();

    value.parse::<f64>().map_err(|e| {
        Exception::with_cause(format!("`{}` is not a number: `{}`", name, value), Exception::from(e))
    })
}

/// Format a number without a trailing `.0` for whole values.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

async fn add(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(format_number(number(&args, "input")? + number(&args, "amount")?)))
}

async fn subtract(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(format_number(number(&args, "input")? - number(&args, "amount")?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_have_no_fraction() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(2.5), "2.5");
    }
}
