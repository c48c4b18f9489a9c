/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! common utility functions for network operations

use std::time::Duration;
use reqwest::{header::{HeaderMap,HeaderValue,CACHE_CONTROL,PRAGMA}, Client, StatusCode, Response};
use serde::de::DeserializeOwned;

use crate::{define_error, datetime::epoch_millis};

define_error!{ pub FirNetError = 
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, FirNetError>;

/// optional basic authentication for a request
#[derive(Debug,Clone)]
pub struct BasicAuth {
    pub user: String,
    pub password: Option<String>,
}

pub fn create_client (timeout: Option<Duration>)->Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok( builder.build()? )
}

/// request headers that ask every cache along the way to revalidate
pub fn no_cache_headers ()->HeaderMap {
    let mut hm = HeaderMap::new();
    hm.insert( CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store, max-age=0"));
    hm.insert( PRAGMA, HeaderValue::from_static("no-cache"));
    hm
}

/// append a unique query parameter so that the URL can't be served from a cache
pub fn cache_busting_url (url: &str)->String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}_={}", epoch_millis())
}

/// GET the URL and map the response status to our error types
pub async fn get_response (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, opt_auth: &Option<BasicAuth>) -> Result<Response> {
    let mut req = client.get( url);
    if let Some(headermap) = opt_headers {
        req = req.headers( headermap.clone())
    }
    if let Some(auth) = opt_auth {
        req = req.basic_auth( &auth.user, auth.password.as_ref())
    }

    let response = req.send().await?;

    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err( FirNetError::NotFoundError(format!("{url}"))),
        other => Err( FirNetError::OpFailed(format!("response status {other:?}")))
    }
}

pub async fn get_json<T> (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, opt_auth: &Option<BasicAuth>) -> Result<T> where T: DeserializeOwned {
    let response = get_response( client, url, opt_headers, opt_auth).await?;
    from_json( response).await
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| FirNetError::ParseError(e.to_string()))
}
