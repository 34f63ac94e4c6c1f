use http::header::{HeaderName, HeaderValue};

use super::*;

impl<B> RequestLike for http::Request<B> {
    fn method(&self) -> Option<String> {
        Some(http::Request::method(self).as_str().into())
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
        self.uri().path_and_query().map(|pq| pq.as_str().into())
    }
    fn path(&self) -> Option<String> {
        Some(self.uri().path().into())
    }
}

#[cfg(test)]
mod tests {
    use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
    use http::Request;

    use super::*;

    fn test_config() -> AuthHmac {
        AuthHmac::new(SimpleCredentialStore::new(vec![("my-key-id", "secret")]))
    }

    #[test]
    fn signs_http_request() {
        let req = Request::put("http://localhost/notify?x=1")
            .header(CONTENT_TYPE, "text/plain")
            .header("Content-MD5", "blahblah")
            .header(DATE, "Thu, 10 Jul 2008 03:29:56 GMT")
            .body(())
            .unwrap()
            .signed(&test_config(), "my-key-id")
            .unwrap();

        assert_eq!(
            req.headers().get(AUTHORIZATION).unwrap(),
            "AuthHMAC my-key-id:etwbACCFSfwZiTGGvCIR+lpDPNo="
        );
    }

    #[test]
    fn verifies_http_request() {
        let config = test_config();
        let mut req = Request::post("/foo/bar")
            .header(CONTENT_TYPE, "application/json")
            .body(br#"{ "x": 1, "y": 2}"#.to_vec())
            .unwrap();
        req.sign(&config, "my-key-id").unwrap();

        assert!(req.headers().contains_key(DATE));
        assert!(req.authenticated(&config));

        *req.uri_mut() = "/foo/baz".parse().unwrap();
        assert!(!req.authenticated(&config));
    }

    #[test]
    fn matches_fixed_vector() {
        let mut req = Request::post("http://test.com/foo/bar")
            .header(CONTENT_TYPE, "application/json")
            .header(DATE, "Tue, 08 Jul 2014 09:10:11 GMT")
            .body(())
            .unwrap();
        assert_eq!(
            test_config().signature(&mut req, b"abcdefgh").unwrap(),
            "SMVwqbDL7YP08hfh8+N9RLIL3MI="
        );
    }

    #[test]
    fn keeps_non_ascii_header_values() {
        let date = &b"Thu, 10 Jul 2008 03:29:56 GMT \xe9"[..];
        let mut req = Request::get("/x")
            .header(DATE, HeaderValue::from_bytes(date).unwrap())
            .header(CONTENT_TYPE, "text/plain; name=\u{e9}")
            .body(())
            .unwrap();

        assert_eq!(
            req.canonicalize().unwrap().as_str(),
            "GET\ntext/plain; name=\u{e9}\n\nThu, 10 Jul 2008 03:29:56 GMT \u{fffd}\n/x"
        );
        // The caller's date is left alone
        assert_eq!(req.headers().get(DATE).unwrap().as_bytes(), date);
    }
}
