use crate::domain::payment::PaymentRequest;
use crate::gateways::{
    BankAuthorization, BankError, BankGateway, BankPaymentRequest, BankPaymentResponse,
};
use reqwest::StatusCode;

pub struct AcquiringBankClient {
    pub base_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl AcquiringBankClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl BankGateway for AcquiringBankClient {
    fn name(&self) -> &'static str {
        "acquiring_bank"
    }

    async fn authorize(&self, request: &PaymentRequest) -> Result<BankAuthorization, BankError> {
        let url = format!("{}/payments", self.base_url);
        let body = BankPaymentRequest::from_request(request);

        let resp = self
            .client
            .post(url)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return Err(BankError::Unavailable(format!(
                    "no response within {}ms",
                    self.timeout_ms
                )))
            }
            Err(e) => return Err(BankError::Unavailable(e.to_string())),
        };

        match resp.status() {
            StatusCode::OK => {
                let decoded: BankPaymentResponse = resp
                    .json()
                    .await
                    .map_err(|e| BankError::Decode(e.to_string()))?;
                Ok(decoded.into())
            }
            StatusCode::BAD_REQUEST => {
                let payload = resp
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("unreadable error body: {e}"));
                Err(BankError::Rejected(payload))
            }
            StatusCode::SERVICE_UNAVAILABLE => Err(BankError::Unavailable(
                "bank returned 503 Service Unavailable".to_string(),
            )),
            other => Err(BankError::UnexpectedStatus(other.as_u16())),
        }
    }
}
