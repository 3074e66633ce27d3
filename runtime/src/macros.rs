/// Convenience macro for creating a set of bindings.
#[macro_export]
macro_rules! bindings {
    () => {
        $crate::Bindings::default()
    };

    (
        $(
            $key:expr => $value:expr
        ),* $(,)?
    ) => {
        {
            let mut bindings = $crate::Bindings::default();
            $(
                bindings.set($key, $value);
            )*
            bindings
        }
    };
}

/// Convenience macro for throwing an exception from a native function.
#[macro_export]
macro_rules! throw {
    ($($arg:tt)*) => {
        return Err($crate::Exception::from(format!($($arg)*)))
    };
}

/// Helpful macro for creating a native function from a closure. Any values
/// named with `clone` are cloned into each invocation.
#[macro_export]
macro_rules! native_fn {
    ($(clone $clone:ident),* |$runtime:pat_param, $args:pat_param| $block:expr) => {{
        $crate::NativeFn::new(move |$runtime: $crate::Runtime, $args: $crate::Bindings| {
            $(
                let $clone = $clone.clone();
            )*
            async move {
                let result: $crate::NativeResult = $block;
                result
            }
        })
    }};
}
