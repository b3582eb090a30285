//! Forecast page scraping
//!
//! One blocking GET per call, then extraction of the text inside the first
//! element matching a tag and class (by default `<em class="temp">`). The
//! extraction is a pure function over the page body so it can be tested
//! without a network.

use super::TemperatureSource;
use crate::config::SourceConfig;
use crate::error::{FetchError, LiveTempError, Result};
use regex::Regex;

/// Matches one element by tag name and class token
#[derive(Debug, Clone)]
pub struct MarkupSelector {
    tag: String,
    class: String,
    element: Regex,
    class_attr: Regex,
    inner_tags: Regex,
}

impl MarkupSelector {
    /// Compile a selector for `<tag class="... class ...">`
    pub fn new(tag: &str, class: &str) -> std::result::Result<Self, regex::Error> {
        let tag_pattern = regex::escape(tag.trim());
        let element = Regex::new(&format!(
            r"(?is)<{tag}\b([^>]*)>(.*?)</{tag}\s*>",
            tag = tag_pattern
        ))?;
        let class_attr = Regex::new(r#"(?is)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)?;
        let inner_tags = Regex::new(r"(?s)<[^>]*>")?;

        Ok(Self {
            tag: tag.trim().to_string(),
            class: class.trim().to_string(),
            element,
            class_attr,
            inner_tags,
        })
    }

    fn has_class(&self, attributes: &str) -> bool {
        self.class_attr
            .captures_iter(attributes)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .any(|value| value.as_str().split_whitespace().any(|c| c == self.class))
    }

    /// Text content of the first matching element
    pub fn find_text(&self, html: &str) -> Option<String> {
        self.element
            .captures_iter(html)
            .find(|caps| caps.get(1).is_some_and(|attrs| self.has_class(attrs.as_str())))
            .and_then(|caps| caps.get(2))
            .map(|inner| self.inner_tags.replace_all(inner.as_str(), "").into_owned())
    }

    /// Extract the temperature value from a page body
    pub fn extract(&self, html: &str) -> std::result::Result<f64, FetchError> {
        let text = self
            .find_text(html)
            .ok_or_else(|| FetchError::ElementNotFound {
                tag: self.tag.clone(),
                class: self.class.clone(),
            })?;
        parse_degrees(&text)
    }
}

/// Parse element text such as `26.5°` into a Celsius value
fn parse_degrees(text: &str) -> std::result::Result<f64, FetchError> {
    let cleaned = text
        .replace("&deg;", "°")
        .replace("&#176;", "°")
        .trim()
        .trim_matches('°')
        .trim()
        .to_string();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FetchError::Parse(text.trim().to_string())),
    }
}

/// Extract the temperature inside the first `<tag class="class">` element
pub fn parse_temperature_markup(
    html: &str,
    tag: &str,
    class: &str,
) -> std::result::Result<f64, FetchError> {
    let selector =
        MarkupSelector::new(tag, class).map_err(|e| FetchError::Parse(e.to_string()))?;
    selector.extract(html)
}

/// Temperature source backed by a forecast web page
pub struct ScrapedSource {
    client: reqwest::blocking::Client,
    url: String,
    selector: MarkupSelector,
}

impl ScrapedSource {
    /// Build an HTTP client and selector from the source configuration
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::with_client_builder(config, reqwest::blocking::Client::builder())
    }

    fn with_client_builder(
        config: &SourceConfig,
        mut builder: reqwest::blocking::ClientBuilder,
    ) -> Result<Self> {
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build()?;

        let selector = MarkupSelector::new(&config.element, &config.class).map_err(|e| {
            LiveTempError::Config(format!(
                "Invalid element selector {}.{}: {}",
                config.element, config.class, e
            ))
        })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            selector,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TemperatureSource for ScrapedSource {
    fn fetch(&mut self) -> std::result::Result<f64, FetchError> {
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        self.selector.extract(&body)
    }

    fn describe(&self) -> String {
        format!("scrape {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_PAGE: &str = r#"
        <html><body>
          <div class="forecast">
            <h2>Sydney</h2>
            <em class="summary">Partly cloudy.</em>
            <p>Max <em class="temp">26.5°</em></p>
            <p>Min <em class="temp">17°</em></p>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_first_matching_element() {
        let value = parse_temperature_markup(FORECAST_PAGE, "em", "temp").unwrap();
        assert_eq!(value, 26.5);
    }

    #[test]
    fn test_parse_class_among_several() {
        let html = r#"<span><EM class='max temp' title="x"> 31.2 ° </EM></span>"#;
        assert_eq!(parse_temperature_markup(html, "em", "temp").unwrap(), 31.2);
    }

    #[test]
    fn test_parse_nested_markup_and_entity() {
        let html = r#"<em class="temp"><b>-3</b>&deg;</em>"#;
        assert_eq!(parse_temperature_markup(html, "em", "temp").unwrap(), -3.0);
    }

    #[test]
    fn test_missing_element() {
        let html = r#"<em class="summary">Sunny</em><em class="temperature">20</em>"#;
        let err = parse_temperature_markup(html, "em", "temp").unwrap_err();
        assert_eq!(
            err,
            FetchError::ElementNotFound {
                tag: "em".to_string(),
                class: "temp".to_string()
            }
        );
    }

    #[test]
    fn test_unparseable_text() {
        let html = r#"<em class="temp">n/a</em>"#;
        let err = parse_temperature_markup(html, "em", "temp").unwrap_err();
        assert_eq!(err, FetchError::Parse("n/a".to_string()));
    }

    #[test]
    fn test_non_finite_rejected() {
        let html = r#"<em class="temp">NaN°</em>"#;
        assert!(matches!(
            parse_temperature_markup(html, "em", "temp"),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_custom_selector() {
        let html = r#"<span class="reading">12.0</span><em class="temp">30</em>"#;
        assert_eq!(parse_temperature_markup(html, "span", "reading").unwrap(), 12.0);
    }

    #[test]
    fn test_source_from_config() {
        let config = SourceConfig {
            url: "http://localhost:9/forecast".to_string(),
            timeout_secs: Some(1),
            user_agent: Some("livetemp-test".to_string()),
            ..Default::default()
        };
        let source = ScrapedSource::from_config(&config).unwrap();
        assert_eq!(source.url(), "http://localhost:9/forecast");
        assert_eq!(source.describe(), "scrape http://localhost:9/forecast");
    }

    mod http {
        use super::*;
        use std::io::{Read, Write};
        use std::net::TcpListener;
        use std::thread::JoinHandle;

        /// Answer one request with `response`, returning the raw request
        fn serve_once(response: String) -> (String, JoinHandle<String>) {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            let handle = std::thread::spawn(move || {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                stream.write_all(response.as_bytes()).unwrap();
                String::from_utf8_lossy(&request).into_owned()
            });
            (format!("http://{}/forecast", addr), handle)
        }

        fn http_response(status: &str, body: &str) -> String {
            format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
        }

        fn local_source(url: String) -> ScrapedSource {
            let config = SourceConfig {
                url,
                timeout_secs: Some(5),
                user_agent: Some("livetemp-test".to_string()),
                ..Default::default()
            };
            ScrapedSource::with_client_builder(
                &config,
                reqwest::blocking::Client::builder().no_proxy(),
            )
            .unwrap()
        }

        #[test]
        fn test_fetch_parses_served_page() {
            let body = r#"<html><p>Max <em class="temp">26.5°</em></p></html>"#;
            let (url, server) = serve_once(http_response("200 OK", body));
            let mut source = local_source(url);

            assert_eq!(source.fetch(), Ok(26.5));

            let request = server.join().unwrap().to_ascii_lowercase();
            assert!(request.starts_with("get /forecast "));
            assert!(request.contains("user-agent: livetemp-test"));
        }

        #[test]
        fn test_fetch_reports_error_status() {
            let (url, server) = serve_once(http_response(
                "503 Service Unavailable",
                "<em class=\"temp\">20</em>",
            ));
            let mut source = local_source(url);

            assert_eq!(source.fetch(), Err(FetchError::Status(503)));
            server.join().unwrap();
        }

        #[test]
        fn test_fetch_page_without_element() {
            let (url, server) = serve_once(http_response("200 OK", "<p>Sunny</p>"));
            let mut source = local_source(url);

            assert!(matches!(
                source.fetch(),
                Err(FetchError::ElementNotFound { .. })
            ));
            server.join().unwrap();
        }

        #[test]
        fn test_fetch_closed_port_is_network_error() {
            let port = {
                let listener = TcpListener::bind("127.0.0.1:0").unwrap();
                listener.local_addr().unwrap().port()
            };
            let mut source = local_source(format!("http://127.0.0.1:{}/forecast", port));

            assert!(matches!(source.fetch(), Err(FetchError::Network(_))));
        }
    }
}
