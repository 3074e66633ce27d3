use crate::{
    bindings::Bindings,
    exception::Exception,
    runtime::Runtime,
};
use futures::future::{BoxFuture, FutureExt};
use std::{fmt, future::Future, sync::Arc};

/// What a native function produces: an optional string, or an exception.
pub type NativeResult = Result<Option<String>, Exception>;

/// The body of a function implemented in native code.
///
/// Native functions receive a handle to the runtime they are invoked by and
/// their own copy of the bindings, with arguments already bound. The future
/// they return must be `Send` so that renders can run on any thread.
#[derive(Clone)]
pub struct NativeFn(Arc<dyn private::NativeFnTrait>);

impl NativeFn {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Runtime, Bindings) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NativeResult> + Send + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, runtime: Runtime, args: Bindings) -> BoxFuture<'static, NativeResult> {
        self.0.call(runtime, args)
    }
}

impl<F: private::NativeFnTrait> From<F> for NativeFn {
    fn from(f: F) -> Self {
        NativeFn(Arc::new(f))
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native fn@{:p}>", Arc::as_ptr(&self.0))
    }
}

mod private {
    use super::*;

    pub trait NativeFnTrait: Send + Sync + 'static {
        fn call(&self, runtime: Runtime, args: Bindings) -> BoxFuture<'static, NativeResult>;
    }

    impl<F, Fut> NativeFnTrait for F
    where
        F: Fn(Runtime, Bindings) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NativeResult> + Send + 'static,
    {
        fn call(&self, runtime: Runtime, args: Bindings) -> BoxFuture<'static, NativeResult> {
            (self)(runtime, args).boxed()
        }
    }
}
