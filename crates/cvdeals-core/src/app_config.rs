use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Hard per-request timeout; bounds worst-case single-call latency.
    /// There is no run-wide deadline.
    pub request_timeout_secs: u64,
    /// Uniform client identity sent on every outbound request.
    pub user_agent: String,
    /// Directory dated snapshot files are written into.
    pub out_dir: PathBuf,
    pub brands_path: PathBuf,
    /// Runaway-pagination guard per category.
    pub max_pages: u32,
    /// `pageSize` for the token-API search endpoint.
    pub api_page_size: u32,
    pub log_level: String,
}
