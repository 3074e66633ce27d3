//! String manipulation functions.

use quill_runtime::{prelude::*, throw};

pub fn plugin() -> Plugin {
    Plugin::new("text")
        .with_description("String manipulation functions")
        .function(Function::native("upper", upper)
            .with_description("Convert the input to upper case")
            .with_parameter("input"))
        .function(Function::native("lower", lower)
            .with_description("Convert the input to lower case")
            .with_parameter("input"))
        .function(Function::native("trim", trim)
            .with_description("Remove leading and trailing whitespace")
            .with_parameter("input"))
        .function(Function::native("length", length)
            .with_description("Count the characters in the input")
            .with_parameter("input"))
        .function(Function::native("concat", concat)
            .with_description("Append a suffix to the input")
            .with_parameter("input")
            .with_parameter("suffix"))
        .function(Function::native("repeat", repeat)
            .with_description("Repeat the input a number of times")
            .with_parameter("input")
            .with_parameter(Parameter::new("count")
                .with_description("How many times to repeat the input")
                .with_default("2")))
}

fn input(args: &Bindings) -> &str {
    args.get("input").unwrap_or_default()
}

async fn upper(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(input(&args).to_uppercase()))
}

async fn lower(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(input(&args).to_lowercase()))
}

async fn trim(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(input(&args).trim().to_owned()))
}

async fn length(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(input(&args).chars().count().to_string()))
}

async fn concat(_: Runtime, args: Bindings) -> NativeResult {
    Ok(Some(format!("{}{}", input(&args), args.get("suffix").unwrap_or_default())))
}

/// Upper bound on the size of a repeated string.
const MAX_REPEAT_LEN: usize = 1 << 20;

async fn repeat(_: Runtime, args: Bindings) -> NativeResult {
    let count: usize = match args.get("count").unwrap_or_default().trim().parse() {
        Ok(count) => count,
        Err(e) => throw!("count must be a non-negative integer: {}", e),
    };

    let input = input(&args);

    if input.len().saturating_mul(count) > MAX_REPEAT_LEN {
        throw!("repeating {} bytes {} times exceeds the limit of {} bytes", input.len(), count, MAX_REPEAT_LEN);
    }

    Ok(Some(input.repeat(count)))
}
