//! Response container.
//!
//! Collects a status, headers and a body for an outer layer to write out.
//! Header names are normalised to `Camel-Case`, so lookups ignore case. A
//! header may carry several values; they are joined with `, ` when read back
//! as one value and emitted as separate lines by [`HttpResponse::header_lines`].

use indexmap::IndexMap;

use crate::http::status::HttpStatus;

/// `Content-Disposition` type used by [`HttpResponse::set_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    #[default]
    Attachment,
    Inline,
}

impl Disposition {
    fn as_str(self) -> &'static str {
        match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: HttpStatus,
    headers: IndexMap<String, Vec<String>>,
    body: Vec<u8>,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: HttpStatus::Ok,
            headers: IndexMap::new(),
            body: Vec::new(),
        }
    }

    pub fn set_status(&mut self, status: HttpStatus) {
        self.status = status;
    }

    pub fn status(&self) -> HttpStatus {
        self.status
    }

    pub fn clear_content(&mut self) {
        self.body.clear();
    }

    pub fn add_content(&mut self, content: impl AsRef<[u8]>) {
        self.body.extend_from_slice(content.as_ref());
    }

    pub fn set_content(&mut self, content: impl AsRef<[u8]>) {
        self.clear_content();
        self.add_content(content);
    }

    pub fn content(&self) -> &[u8] {
        &self.body
    }

    /// Replaces every value of `name`.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(to_camel_case(name), vec![value.to_string()]);
    }

    /// Appends a value to `name`, keeping existing ones.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers
            .entry(to_camel_case(name))
            .or_default()
            .push(value.to_string());
    }

    /// All values of `name` joined with `, `, empty if unset.
    pub fn header(&self, name: &str) -> String {
        self.headers
            .get(&to_camel_case(name))
            .map(|values| values.join(", "))
            .unwrap_or_default()
    }

    pub fn is_header(&self, name: &str) -> bool {
        self.headers.contains_key(&to_camel_case(name))
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.shift_remove(&to_camel_case(name));
    }

    /// One `Name: value` line per header value, in insertion order.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| format!("{name}: {v}")))
            .collect()
    }

    /// Transient warning (`199`).
    pub fn add_warning(&mut self, msg: &str) {
        self.add_header("Warning", &format!("199 {msg}"));
    }

    /// Persistent warning (`299`).
    pub fn add_persistent_warning(&mut self, msg: &str) {
        self.add_header("Warning", &format!("299 {msg}"));
    }

    /// Makes the body a file download.
    ///
    /// `content_type` defaults to `application/x-download` when `None`.
    pub fn set_file(
        &mut self,
        data: impl AsRef<[u8]>,
        file_name: &str,
        content_type: Option<&str>,
        disposition: Disposition,
    ) {
        self.set_header(
            "Content-Type",
            content_type.unwrap_or("application/x-download"),
        );
        self.set_header(
            "Content-Disposition",
            &format!("{}; filename={file_name}", disposition.as_str()),
        );
        self.set_content(data);
    }
}

/// `content-TYPE` becomes `Content-Type`.
pub fn to_camel_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_names() {
        assert_eq!(to_camel_case("content-TYPE"), "Content-Type");
        assert_eq!(to_camel_case("x--y"), "X--Y");
        assert_eq!(to_camel_case("etag"), "Etag");
    }

    #[test]
    fn status_defaults_to_ok() {
        let mut res = HttpResponse::new();
        assert_eq!(res.status().code(), 200);
        res.set_status(HttpStatus::NotFound);
        assert_eq!(res.status(), HttpStatus::NotFound);
    }

    #[test]
    fn content_is_appended_and_replaced() {
        let mut res = HttpResponse::new();
        res.add_content("foo");
        res.add_content(b"bar");
        assert_eq!(res.content(), b"foobar");

        res.set_content("baz");
        assert_eq!(res.content(), b"baz");

        res.clear_content();
        assert!(res.content().is_empty());
    }

    #[test]
    fn headers_ignore_case() {
        let mut res = HttpResponse::new();
        res.set_header("content-type", "text/html");
        assert!(res.is_header("CONTENT-TYPE"));
        assert_eq!(res.header("Content-Type"), "text/html");

        res.set_header("Content-type", "text/plain");
        assert_eq!(res.header("content-type"), "text/plain");

        res.remove_header("CONTENT-type");
        assert!(!res.is_header("content-type"));
        assert_eq!(res.header("content-type"), "");
    }

    #[test]
    fn added_headers_accumulate() {
        let mut res = HttpResponse::new();
        res.add_header("Cache-Control", "no-cache");
        res.add_header("cache-control", "no-store");
        assert_eq!(res.header("Cache-Control"), "no-cache, no-store");
        assert_eq!(
            res.header_lines(),
            vec!["Cache-Control: no-cache", "Cache-Control: no-store"]
        );
    }

    #[test]
    fn warnings() {
        let mut res = HttpResponse::new();
        res.add_warning("stale");
        res.add_persistent_warning("transformed");
        assert_eq!(res.header("warning"), "199 stale, 299 transformed");
    }

    #[test]
    fn file_download() {
        let mut res = HttpResponse::new();
        res.set_file(b"PDF", "report.pdf", None, Disposition::default());
        assert_eq!(res.header("Content-Type"), "application/x-download");
        assert_eq!(
            res.header("Content-Disposition"),
            "attachment; filename=report.pdf"
        );
        assert_eq!(res.content(), b"PDF");

        res.set_file("x", "a.txt", Some("text/plain"), Disposition::Inline);
        assert_eq!(res.header("content-disposition"), "inline; filename=a.txt");
        assert_eq!(res.header("content-type"), "text/plain");
    }
}
