// src/macros.rs

/// `String` shorthand. `s!()` is an empty string, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into a fresh `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Append formatted text to a `String` buffer. Writing to a `String` cannot fail.
#[macro_export]
macro_rules! push_fmt {
    ($buf:expr, $($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let _ = write!($buf, $($arg)*);
    }};
}
