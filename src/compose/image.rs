use std::borrow::Cow;

/// Container runtimes treat an untagged reference as `:latest`, so a file
/// that says `nginx` and one that says `nginx:latest` reference the same
/// image. Comparison happens on the normalized form; the raw file text is
/// what gets reported.
pub fn normalize_image(image: &str) -> Cow<'_, str> {
    if image.contains(':') {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(format!("{image}:latest"))
    }
}
