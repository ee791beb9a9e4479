/// Runtime configuration resolved from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub yelp_api_key: String,
    pub yelp_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    pub default_term: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("yelp_api_key", &"[redacted]")
            .field("yelp_base_url", &self.yelp_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("default_term", &self.default_term)
            .field("log_level", &self.log_level)
            .finish()
    }
}
