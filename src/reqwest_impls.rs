use http::header::{HeaderName, HeaderValue};

use super::*;

/// Returns the request target for a given URL, in the form `<path>?<query>`.
fn target_from_url(url: &url::Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().into(),
    }
}

macro_rules! reqwest_request_like {
    ($request:ty) => {
        impl RequestLike for $request {
            fn method(&self) -> Option<String> {
                Some(<$request>::method(self).as_str().into())
            }
            fn header(&self, name: &str) -> Option<String> {
                self.headers()
                    .get(name)
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            }
            fn set_header(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
                let header_name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| HeaderError::InvalidName(name.into()))?;
                let header_value =
                    HeaderValue::from_str(value).map_err(|_| HeaderError::InvalidValue {
                        name: name.into(),
                        value: value.into(),
                    })?;
                self.headers_mut().insert(header_name, header_value);
                Ok(())
            }
            fn raw_uri(&self) -> Option<String> {
                Some(target_from_url(self.url()))
            }
            fn path(&self) -> Option<String> {
                Some(self.url().path().into())
            }
        }
    };
}

reqwest_request_like!(reqwest::Request);
reqwest_request_like!(reqwest::blocking::Request);
