use quill_runtime::{
    bindings,
    native_fn,
    prelude::*,
    syntax::*,
    throw,
    RegistryError,
    RenderError,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

async fn add(_: Runtime, args: Bindings) -> NativeResult {
    let a: i64 = args.get("a").unwrap_or_default().parse()?;
    let b: i64 = args.get("b").unwrap_or_default().parse()?;

    Ok(Some((a + b).to_string()))
}

async fn noop(_: Runtime, _: Bindings) -> NativeResult {
    Ok(None)
}

async fn upper(_: Runtime, args: Bindings) -> NativeResult {
    Ok(args.get("input").map(str::to_uppercase))
}

async fn fail(_: Runtime, args: Bindings) -> NativeResult {
    throw!("refusing to handle `{}`", args.get("input").unwrap_or_default())
}

async fn repeat(_: Runtime, args: Bindings) -> NativeResult {
    let count: usize = args.get("count").unwrap_or_default().parse()?;

    Ok(Some(args.get("input").unwrap_or_default().repeat(count)))
}

fn runtime() -> Runtime {
    Runtime::builder()
        .plugin(Plugin::new("math")
            .function(Function::native("add", add).with_parameter("a").with_parameter("b"))
            .function(Function::native("noop", noop)))
        .plugin(Plugin::new("text")
            .function(Function::native("upper", upper).with_parameter("input"))
            .function(Function::native("fail", fail).with_parameter("input"))
            .function(Function::native("repeat", repeat)
                .with_parameter("input")
                .with_parameter(Parameter::new("count").with_default("2"))))
        .plugin(Plugin::new("shout")
            .function(Function::native("upper", native_fn!(|_, args| {
                Ok(args.get("input").map(|input| format!("{}!", input.to_uppercase())))
            })).with_parameter("input")))
        .build()
        .unwrap()
}

fn expression(source: &str) -> Expression {
    Expression::from_source(source).unwrap()
}

#[tokio::test]
async fn value_ignores_trailing_tokens_and_bindings() {
    let expression = Expression::parse(vec![
        Token::Value("hi".into()),
        Token::Variable("x".into()),
    ]).unwrap();

    let bindings = bindings! {
        "x" => "ignored",
    };

    assert_eq!(runtime().render(&expression, &bindings).await, Ok("hi".into()));
    assert_eq!(Runtime::default().render(&expression, &Bindings::new()).await, Ok("hi".into()));
}

#[tokio::test]
async fn variables_render_their_binding_or_nothing() {
    let runtime = runtime();
    let bindings = bindings! {
        "name" => "Ada",
    };

    assert_eq!(runtime.render(&expression("$name"), &bindings).await, Ok("Ada".into()));
    assert_eq!(runtime.render(&expression("$missing"), &bindings).await, Ok("".into()));
}

#[tokio::test]
async fn positional_and_named_arguments() {
    let expression = Expression::parse(vec![
        Token::FunctionId(FunctionId::new("add")),
        Token::Value("2".into()),
        Token::NamedArg {
            name: "b".into(),
            value: Arg::Value("3".into()),
        },
    ]).unwrap();

    assert_eq!(runtime().render(&expression, &Bindings::new()).await, Ok("5".into()));
}

#[tokio::test]
async fn arguments_from_variables() {
    let bindings = bindings! {
        "x" => "40",
        "y" => "2",
    };

    assert_eq!(runtime().render(&expression("math.add $x b=$y"), &bindings).await, Ok("42".into()));
}

#[tokio::test]
async fn missing_function_is_reported() {
    let result = runtime().render(&expression("missing"), &Bindings::new()).await;

    assert_eq!(result, Err(RenderError::FunctionNotFound(FunctionId::new("missing"))));
}

#[tokio::test]
async fn qualified_lookup_does_not_fall_back() {
    let result = runtime().render(&expression("text.add '1' b='2'"), &Bindings::new()).await;

    assert_eq!(result, Err(RenderError::FunctionNotFound(FunctionId::qualified("text", "add"))));
}

#[tokio::test]
async fn unqualified_lookup_uses_registration_order() {
    let runtime = runtime();

    assert_eq!(runtime.render(&expression("upper 'a'"), &Bindings::new()).await, Ok("A".into()));
    assert_eq!(runtime.render(&expression("shout.upper 'a'"), &Bindings::new()).await, Ok("A!".into()));
}

#[tokio::test]
async fn arguments_to_parameterless_function() {
    let result = runtime().render(&expression("noop 'x'"), &Bindings::new()).await;

    match result {
        Err(RenderError::ArityMismatch {function, arguments}) => {
            assert_eq!(function.to_string(), "math.noop");
            assert_eq!(arguments, 1);
        }
        result => panic!("unexpected result: {:?}", result),
    }
}

#[tokio::test]
async fn absent_result_renders_empty() {
    assert_eq!(runtime().render(&expression("noop"), &Bindings::new()).await, Ok("".into()));
}

#[tokio::test]
async fn calls_without_registry_fail() {
    let result = Runtime::default().render(&expression("upper 'a'"), &Bindings::new()).await;

    assert_eq!(result, Err(RenderError::NoRegistry));
}

#[tokio::test]
async fn exceptions_fail_the_render() {
    let result = runtime().render(&expression("fail 'this'"), &Bindings::new()).await;

    match result {
        Err(RenderError::InvocationFailed {function, cause}) => {
            assert_eq!(function.to_string(), "text.fail");
            assert_eq!(cause.message(), "refusing to handle `this`");
        }
        result => panic!("unexpected result: {:?}", result),
    }
}

#[tokio::test]
async fn parse_errors_inside_functions_are_exceptions() {
    let result = runtime().render(&expression("add 'two' b='3'"), &Bindings::new()).await;

    assert!(matches!(result, Err(RenderError::InvocationFailed {..})));
}

#[tokio::test]
async fn parameter_defaults_fill_unbound_parameters() {
    let runtime = runtime();

    assert_eq!(runtime.render(&expression("repeat 'ab'"), &Bindings::new()).await, Ok("abab".into()));
    assert_eq!(runtime.render(&expression("repeat 'ab' count='3'"), &Bindings::new()).await, Ok("ababab".into()));
}

#[tokio::test]
async fn caller_bindings_are_never_modified() {
    let bindings = bindings! {
        "input" => "original",
    };

    let rendered = runtime().render(&expression("upper 'changed'"), &bindings).await;

    assert_eq!(rendered, Ok("CHANGED".into()));
    assert_eq!(bindings, bindings! {"input" => "original"});
}

#[tokio::test]
async fn argument_variables_read_caller_bindings() {
    let pair = Function::native("pair", native_fn!(|_, args| {
        Ok(Some(format!("a={} b={}", args.get("a").unwrap_or_default(), args.get("b").unwrap_or_default())))
    })).with_parameter("a").with_parameter("b");

    let runtime = Runtime::builder()
        .plugin(Plugin::new("test").function(pair))
        .build()
        .unwrap();
    let bindings = bindings! {
        "a" => "old",
    };

    assert_eq!(runtime.render(&expression("pair 'new' b=$a"), &bindings).await, Ok("a=new b=old".into()));
}

#[tokio::test]
async fn rendering_is_repeatable() {
    let runtime = runtime();
    let expression = expression("add '1' b=$b");

    for b in 0..3 {
        let bindings = bindings! {
            "b" => b.to_string(),
        };

        let first = runtime.render(&expression, &bindings).await;
        let second = runtime.render(&expression, &bindings).await;

        assert_eq!(first, Ok((1 + b).to_string()));
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn templates_concatenate_blocks() {
    let template = Template::parse("Hello {{ $name }}, or {{ upper $name }}. {{ 'Bye' }}").unwrap();
    let bindings = bindings! {
        "name" => "Ada",
    };

    assert_eq!(
        runtime().render_template(&template, &bindings).await,
        Ok("Hello Ada, or ADA. Bye".into()),
    );
}

#[tokio::test]
async fn failing_block_fails_the_template() {
    let template = Template::parse("a {{ upper 'b' }} {{ missing }}").unwrap();
    let result = runtime().render_template(&template, &Bindings::new()).await;

    assert_eq!(result, Err(RenderError::FunctionNotFound(FunctionId::new("missing"))));
}

#[tokio::test]
async fn functions_can_call_other_functions() {
    let greet = Function::native("greet", native_fn!(|runtime, args| {
        let mut call = Bindings::new();
        call.set("input", format!("hello {}", args.get("name").unwrap_or_default()));

        match runtime.invoke(&FunctionId::qualified("text", "upper"), call).await {
            Ok(result) => Ok(result.into_value()),
            Err(error) => throw!("could not greet: {}", error),
        }
    })).with_parameter("name");

    let runtime = Runtime::builder()
        .plugin(Plugin::new("text").function(Function::native("upper", upper).with_parameter("input")))
        .plugin(Plugin::new("greeting").function(greet))
        .build()
        .unwrap();

    assert_eq!(runtime.render(&expression("greet 'world'"), &Bindings::new()).await, Ok("HELLO WORLD".into()));
}

#[tokio::test]
async fn direct_invoke_embeds_exceptions() {
    let result = runtime()
        .invoke(&FunctionId::new("fail"), bindings! {"input" => "x"})
        .await
        .unwrap();

    assert_eq!(result.value(), None);
    assert_eq!(result.error().map(Exception::message), Some("refusing to handle `x`"));
}

#[tokio::test]
async fn slow_functions_time_out() {
    let runtime = Runtime::builder()
        .plugin(Plugin::new("slow").function(Function::native("sleep", native_fn!(|_, _| {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Some("done".into()))
        }))))
        .timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    match runtime.render(&expression("sleep"), &Bindings::new()).await {
        Err(RenderError::TimedOut {function, timeout}) => {
            assert_eq!(function.to_string(), "slow.sleep");
            assert_eq!(timeout, Duration::from_millis(20));
        }
        result => panic!("unexpected result: {:?}", result),
    }
}

#[tokio::test]
async fn cancelling_a_render_drops_the_invocation() {
    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    let dropped = Arc::new(AtomicBool::new(false));
    let flag = dropped.clone();
    let runtime = Runtime::builder()
        .plugin(Plugin::new("hang").function(Function::native("forever", native_fn!(clone flag |_, _| {
            let _guard = SetOnDrop(flag);
            std::future::pending::<()>().await;
            Ok(None)
        }))))
        .build()
        .unwrap();

    let expression = expression("forever");
    let bindings = Bindings::new();
    let result = tokio::time::timeout(Duration::from_millis(20), runtime.render(&expression, &bindings)).await;

    assert!(result.is_err());
    assert!(dropped.load(Ordering::SeqCst));
}

#[test]
fn duplicate_plugins_fail_the_build() {
    let result = Runtime::builder()
        .plugin(Plugin::new("a"))
        .plugin(Plugin::new("a"))
        .build();

    assert_eq!(result.err(), Some(RegistryError::DuplicatePlugin("a".into())));
}

#[test]
fn builder_plugins_conflict_with_external_registry() {
    let result = Runtime::builder()
        .registry(Arc::new(PluginCollectionLike))
        .plugin(Plugin::new("a"))
        .build();

    assert_eq!(result.err(), Some(RegistryError::ExternalRegistry));
}

struct PluginCollectionLike;

impl quill_runtime::Registry for PluginCollectionLike {
    fn plugins(&self) -> Vec<Arc<Plugin>> {
        Vec::new()
    }
}
