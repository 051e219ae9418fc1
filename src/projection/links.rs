//! Absolute URLs for synthesized identifiers

/// Builds public URLs rooted at the deployment's host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// `host` is a bare host (optionally with port), e.g. "library.example.org"
    pub fn new(host: &str) -> Self {
        Self {
            base_url: format!("http://{}", host.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `http://<host>/documents/<id>`
    pub fn document_url(&self, id: &str) -> String {
        format!("{}/documents/{}", self.base_url, id)
    }

    /// `http://<host>/creators/<cid>`
    pub fn creator_url(&self, cid: &str) -> String {
        format!("{}/creators/{}", self.base_url, cid)
    }

    /// Resolver URL for a DOI
    pub fn doi_url(doi: &str) -> String {
        let doi = doi.trim();
        let doi = doi
            .strip_prefix("https://doi.org/")
            .or_else(|| doi.strip_prefix("doi:"))
            .unwrap_or(doi);
        format!("https://doi.org/{}", doi)
    }
}
