//! Cleanup of raw native call labels.
//!
//! Built-in calls have no source location, so the tracer is expected to
//! synthesize short labels like `dict@get` or `@len`. Older captures carry
//! the interpreter's raw repr instead; those are rewritten here.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static AT_POINTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" at 0x[0-9A-Fa-f]+").expect("static regex"));

static BUILTIN_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<built-in method (\S+) of (\S+) object>").expect("static regex")
});

static BUILTIN_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<built-in function (\S+)>").expect("static regex"));

/// Rewrite raw built-in reprs into synthesized labels
///
/// * `<built-in method get of dict object at 0x7F>` -> `dict@get`
/// * `<built-in function len>` -> `@len`
///
/// Labels without a built-in repr are returned unchanged (and unallocated).
pub fn normalize_native_label(raw: &str) -> Cow<'_, str> {
    if !raw.contains("<built-in") {
        return Cow::Borrowed(raw);
    }

    let stripped = AT_POINTER.replace_all(raw, "");
    let methods = BUILTIN_METHOD.replace_all(&stripped, "$2@$1");
    let functions = BUILTIN_FUNCTION.replace_all(&methods, "@$1");

    Cow::Owned(functions.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_method() {
        assert_eq!(
            normalize_native_label("<built-in method append of list object at 0x7F3A2C>"),
            "list@append"
        );
    }

    #[test]
    fn test_builtin_function() {
        assert_eq!(normalize_native_label("<built-in function len>"), "@len");
    }

    #[test]
    fn test_plain_label_untouched() {
        let label = normalize_native_label("app.py^10^main");
        assert!(matches!(label, Cow::Borrowed(_)));
        assert_eq!(label, "app.py^10^main");
    }
}
