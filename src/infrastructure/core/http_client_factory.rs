use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the client used to poll the breaker box.
    ///
    /// No retry middleware: a failed fetch fails the scrape. With `timeout`
    /// unset the transport defaults apply.
    pub fn create_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(1)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_and_without_timeout() {
        assert!(HttpClientFactory::create_client(None).is_ok());
        assert!(HttpClientFactory::create_client(Some(Duration::from_secs(5))).is_ok());
    }
}
