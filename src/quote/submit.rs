//! Quote submission to the backend

use crate::config::DirectorySection;
use crate::error::{QuoteError, QuoteResult};
use crate::quote::request::QuoteRequest;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use tracing::{info, warn};

/// Sends composed quote requests
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    async fn submit(&self, request: &QuoteRequest) -> QuoteResult<()>;
}

/// Posts quote requests to `/directory/freightfirststep/`
#[derive(Debug, Clone)]
pub struct HttpQuoteSubmitter {
    transport: HttpTransport,
}

impl HttpQuoteSubmitter {
    pub fn new(config: &DirectorySection) -> QuoteResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl QuoteSubmitter for HttpQuoteSubmitter {
    async fn submit(&self, request: &QuoteRequest) -> QuoteResult<()> {
        let url = self.transport.endpoint(&["directory", "freightfirststep", ""]);
        let endpoint = url.path().to_string();

        let response = self.transport.post_json(url, request).await?;
        let status = response.status();

        if status.is_success() {
            info!(status = %status, obj_type = %request.obj_type, "Quote request accepted");
            return Ok(());
        }

        // Keep the body in the log; validation messages from the backend live there
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Quote request rejected");

        Err(QuoteError::unexpected_status(endpoint, status))
    }
}
