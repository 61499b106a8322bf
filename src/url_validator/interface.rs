pub trait UrlValidator {
    fn is_valid(&self, url: &str) -> bool;
}
