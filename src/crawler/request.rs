use crate::crawler::filter::ItemFilter;
use crate::crawler::parser::ExtractionOptions;
use crate::url::normalize_seed;
use crate::ConfigError;
use url::Url;

/// Immutable parameter set describing one crawl
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    seed_url: Url,
    max_depth: u32,
    extraction: ExtractionOptions,
    filter: ItemFilter,
}

impl CrawlRequest {
    /// Starts building a request for the given seed
    ///
    /// # Example
    ///
    /// ```
    /// use web_scraper::CrawlRequest;
    ///
    /// let request = CrawlRequest::builder("example.com")
    ///     .max_depth(2)
    ///     .min_text_length(5)
    ///     .exclude_pattern("ads")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(request.seed_url().as_str(), "https://example.com/");
    /// ```
    pub fn builder(seed: impl Into<String>) -> CrawlRequestBuilder {
        CrawlRequestBuilder::new(seed)
    }

    pub fn seed_url(&self) -> &Url {
        &self.seed_url
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn extraction(&self) -> &ExtractionOptions {
        &self.extraction
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }
}

/// Builder for [`CrawlRequest`]; all validation happens in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct CrawlRequestBuilder {
    seed: String,
    max_depth: u32,
    extraction: ExtractionOptions,
    min_text_length: usize,
    exclude_pattern: String,
}

impl CrawlRequestBuilder {
    fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_depth: 1,
            extraction: ExtractionOptions::default(),
            min_text_length: 0,
            exclude_pattern: String::new(),
        }
    }

    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn extraction(mut self, options: ExtractionOptions) -> Self {
        self.extraction = options;
        self
    }

    pub fn extract_links(mut self, enabled: bool) -> Self {
        self.extraction.links = enabled;
        self
    }

    pub fn extract_headings(mut self, enabled: bool) -> Self {
        self.extraction.headings = enabled;
        self
    }

    pub fn extract_text(mut self, enabled: bool) -> Self {
        self.extraction.text = enabled;
        self
    }

    pub fn min_text_length(mut self, length: usize) -> Self {
        self.min_text_length = length;
        self
    }

    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = pattern.into();
        self
    }

    /// Validates every parameter before any network access can happen
    ///
    /// # Returns
    ///
    /// * `Err(ScraperError::Validation)` - Empty or unusable seed URL
    /// * `Err(ScraperError::Config)` - Depth below 1 or invalid exclusion pattern
    pub fn build(self) -> crate::Result<CrawlRequest> {
        let seed_url = normalize_seed(&self.seed)?;

        if self.max_depth < 1 {
            return Err(ConfigError::InvalidDepth(self.max_depth).into());
        }

        let filter = ItemFilter::new(self.min_text_length, &self.exclude_pattern)?;

        Ok(CrawlRequest {
            seed_url,
            max_depth: self.max_depth,
            extraction: self.extraction,
            filter,
        })
    }
}
