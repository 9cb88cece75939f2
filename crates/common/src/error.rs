/// Error types that can be built from a bare message.
///
/// Crates implement this for their own `Error` and then invoke
/// [`impl_context!`] to get `.context()` / `.with_context()` on `Result` and
/// `Option` without pulling in `anyhow`.
pub trait FromMessage: Sized {
    fn from_message(message: String) -> Self;
}

/// Generate a crate-local `Context` trait for the given error type.
///
/// The error type must implement [`FromMessage`]. Existing error sources are
/// flattened into the message as `"{context}: {source}"`.
///
/// ```ignore
/// // in crates/foo/src/error.rs
/// waypoint_common::impl_context!(Error);
/// ```
#[macro_export]
macro_rules! impl_context {
    ($error:ty) => {
        pub trait Context<T> {
            fn context(self, context: impl Into<String>) -> std::result::Result<T, $error>;
            fn with_context<C, F>(self, f: F) -> std::result::Result<T, $error>
            where
                C: Into<String>,
                F: FnOnce() -> C;
        }

        impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
            fn context(self, context: impl Into<String>) -> std::result::Result<T, $error> {
                let context = context.into();
                self.map_err(|source| {
                    <$error as $crate::FromMessage>::from_message(format!("{context}: {source}"))
                })
            }

            fn with_context<C, F>(self, f: F) -> std::result::Result<T, $error>
            where
                C: Into<String>,
                F: FnOnce() -> C,
            {
                self.map_err(|source| {
                    let context = f().into();
                    <$error as $crate::FromMessage>::from_message(format!("{context}: {source}"))
                })
            }
        }

        impl<T> Context<T> for Option<T> {
            fn context(self, context: impl Into<String>) -> std::result::Result<T, $error> {
                self.ok_or_else(|| <$error as $crate::FromMessage>::from_message(context.into()))
            }

            fn with_context<C, F>(self, f: F) -> std::result::Result<T, $error>
            where
                C: Into<String>,
                F: FnOnce() -> C,
            {
                self.ok_or_else(|| <$error as $crate::FromMessage>::from_message(f().into()))
            }
        }
    };
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    #[derive(Debug, PartialEq)]
    struct Failure(String);

    impl crate::FromMessage for Failure {
        fn from_message(message: String) -> Self {
            Self(message)
        }
    }

    crate::impl_context!(Failure);

    #[test]
    fn result_context_prefixes_source() {
        let res: Result<(), &str> = Err("disk full");
        assert_eq!(
            res.context("writing state").unwrap_err(),
            Failure("writing state: disk full".into())
        );
    }

    #[test]
    fn option_context_uses_message() {
        let value: Option<u8> = None;
        assert_eq!(
            value.with_context(|| "missing key").unwrap_err(),
            Failure("missing key".into())
        );
    }
}
