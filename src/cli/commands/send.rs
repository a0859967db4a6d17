use anyhow::{Context, Result};
use colored::*;
use reqwest::Method;

use crate::api::Sfdc;
use crate::api::constants::headers;

pub async fn send(sfdc: &Sfdc, method: &str, path: &str, data: Option<String>) -> Result<bool> {
    let method: Method = method
        .to_uppercase()
        .parse()
        .with_context(|| format!("Invalid HTTP method: {}", method))?;

    let authorization = format!("Bearer {}", sfdc.session().token());
    let request_headers = [
        (headers::AUTHORIZATION, authorization.as_str()),
        (headers::CONTENT_TYPE, headers::CONTENT_TYPE_JSON),
        (headers::ACCEPT, headers::ACCEPT_JSON),
    ];

    let response = sfdc.rest().send(method, path, &request_headers, data).await?;

    let status = if response.is_success() {
        response.status.to_string().green()
    } else {
        response.status.to_string().red()
    };
    println!("Status: {}", status);
    if !response.body.is_empty() {
        println!("{}", response.body);
    }

    Ok(response.is_success())
}
