use crate::Error;
use reqwest::header::HeaderValue;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

// Most calls are a JSON POST to the api url with the account token
// Send 'body', check the status and decode the answer
pub(crate) async fn post_json<B, R>(
    client: &Client,
    url: &str,
    token: &str,
    body: &B,
) -> Result<R, Error>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let req_body = serde_json::to_string(body)?;

    tracing::debug!(url, "calling b2 api");
    let resp = client
        .post(url)
        .header(reqwest::header::AUTHORIZATION, header_value(token)?)
        .body(req_body)
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(Error::from_response(resp).await);
    }

    decode_body(resp).await
}

// Attempt to deserialize the JSON
// There are 3 cases here
// 1. API call succeeded and it deserializes to R
// 2. API call succeeded but response is an API Error - returns B2Error
// 3. Response matches neither R nor an API Error - returns SerdeError
pub(crate) async fn decode_body<R: DeserializeOwned>(resp: Response) -> Result<R, Error> {
    let response_string = resp.text().await?;
    match serde_json::from_str(&response_string) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::debug!(error = %e, body = %response_string, "could not decode b2 response");
            Err(Error::from_json(&response_string))
        }
    }
}

// Tokens and urls come from the server, but a broken one shouldn't panic
pub(crate) fn header_value<T: AsRef<str>>(value: T) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value.as_ref()).map_err(|_| {
        Error::InvalidInput("value contains characters not allowed in a header".to_owned())
    })
}

// Encode the file name
// See https://www.backblaze.com/b2/docs/string_encoding.html
// Note we need to drop the first character, as it is always an equals '=' symbol
pub(crate) fn encode_file_name(file_name: &str) -> String {
    url::form_urlencoded::Serializer::new(String::with_capacity(file_name.len() + 1))
        .append_pair("", file_name)
        .finish()[1..]
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_form_encoded() {
        assert_eq!(encode_file_name("plain.txt"), "plain.txt");
        assert_eq!(encode_file_name("my folder/ä.txt"), "my+folder%2F%C3%A4.txt");
    }

    #[test]
    fn bad_header_value() {
        assert!(header_value("line\nbreak").is_err());
        assert!(header_value("token_123").is_ok());
    }
}
