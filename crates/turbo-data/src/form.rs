//! Form field collections.

/// A file chosen in an `<input type="file">`.
///
/// Opaque to Rust code: the browser transport hands the underlying `File`
/// back to `FormData` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    file_name: String,
    #[cfg(target_arch = "wasm32")]
    file: web_sys::File,
}

impl FileEntry {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            file_name: file.name(),
            file,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn file(&self) -> &web_sys::File {
        &self.file
    }

    /// A file known only by name, for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// One submitted value.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(FileEntry),
}

/// Ordered name/value pairs read from an HTML form.
///
/// Names may repeat, as in a browser `FormData`. File inputs are carried
/// as [`FormValue::File`] so a submission reaches the server complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    entries: Vec<(String, FormValue)>,
}

impl FormFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field, keeping any earlier value with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .push((name.into(), FormValue::Text(value.into())));
    }

    /// Append a file field.
    pub fn append_file(&mut self, name: impl Into<String>, file: FileEntry) {
        self.entries.push((name.into(), FormValue::File(file)));
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// First text value for `name`, if any. File entries are skipped.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|(k, v)| match v {
            FormValue::Text(text) if k == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// First non-empty text value for `name`.
    ///
    /// An unselected `<select>` submits an empty string, which counts as
    /// missing here.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Iterate over all entries in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
