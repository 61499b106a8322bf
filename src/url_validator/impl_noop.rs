use crate::url_validator::interface::UrlValidator;

/// Accepts every URL. Broken links surface later as image load errors.
#[derive(Debug, Clone, Default)]
pub struct UrlValidatorNoop;

impl UrlValidatorNoop {
    pub fn new() -> Self {
        Self
    }
}

impl UrlValidator for UrlValidatorNoop {
    fn is_valid(&self, _url: &str) -> bool {
        true
    }
}
