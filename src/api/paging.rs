/// `skip` / `limit` query parameters for list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paging {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl Paging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything in one page
    pub fn all() -> Self {
        Self::new().with_skip(0).with_limit(1000)
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Append the parameters to `url`
    pub fn apply(&self, url: &str) -> String {
        let params: Vec<String> = [("skip", self.skip), ("limit", self.limit)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{}={}", name, v)))
            .collect();

        if params.is_empty() {
            url.to_string()
        } else {
            format!("{}{}{}", url, determine_separator(url), params.join("&"))
        }
    }
}

fn determine_separator(url: &str) -> char {
    if url.contains('?') { '&' } else { '?' }
}
